//! Voxel data type

use crate::core::types::Vec3;
use crate::math::Aabb;
use super::color::Color;

/// Stable handle for a voxel in a [`VoxelGrid`](super::VoxelGrid).
///
/// Handles are never reused, so a stale id simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelId(pub u64);

/// A colored cube centered on a lattice cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
    pub id: VoxelId,
    /// World-space cell center
    pub position: Vec3,
    pub color: Color,
}

impl Voxel {
    /// Bounding box for a voxel of edge `size`
    pub fn bounds(&self, size: f32) -> Aabb {
        Aabb::cube(self.position, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let voxel = Voxel {
            id: VoxelId(1),
            position: Vec3::new(25.0, 25.0, -25.0),
            color: Color::WHITE,
        };
        let bounds = voxel.bounds(50.0);
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -50.0));
        assert_eq!(bounds.max, Vec3::new(50.0, 50.0, 0.0));
    }
}
