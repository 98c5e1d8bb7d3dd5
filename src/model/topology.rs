//! Cube topology of a single voxel

use crate::core::types::Vec3;
use crate::voxel::{Color, Voxel};

use super::{CUBE_FACES, CUBE_VERTICES};

/// Corner offsets, in half-extents, in export order.
///
/// The first corner is the anchor the loader reads back.
const CORNERS: [Vec3; CUBE_VERTICES] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
];

/// Vertices, faces and color of one exported cube
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelTopology {
    pub vertices: [Vec3; CUBE_VERTICES],
    /// 1-based vertex indices, already offset by the block's vertex base
    pub faces: [[u32; 4]; 6],
    pub color: Color,
}

/// Offset from the anchor (first) vertex back to the cube center
pub fn anchor_offset(half_extent: f32) -> Vec3 {
    -CORNERS[0] * half_extent
}

/// Encode `voxel` as a cube whose face indices start after `vertex_base`
/// previously written vertices
pub fn topologize(voxel: &Voxel, vertex_base: u32, half_extent: f32) -> VoxelTopology {
    VoxelTopology {
        vertices: CORNERS.map(|corner| voxel.position + corner * half_extent),
        faces: CUBE_FACES.map(|face| face.map(|index| index + vertex_base)),
        color: voxel.color,
    }
}
