//! `.obj` text -> voxel colors and positions
//!
//! Only the `usemtl` line and the anchor vertex of each block are read; the
//! remaining vertices and faces are implied by the cube topology.

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::voxel::Color;

use super::topology::anchor_offset;
use super::{body_lines, Model3d, ModelFormat, BLOCK_LINES};

/// One voxel read back from a model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadedVoxel {
    pub color: Color,
    /// Reconstructed cell center
    pub position: Vec3,
}

/// Read every voxel block of `model.obj` in file order.
///
/// Run [`validate`](super::validate) first; this only fails on text it
/// cannot interpret at all.
pub fn parse(model: &Model3d, format: &ModelFormat) -> Result<Vec<LoadedVoxel>> {
    let offset = anchor_offset(format.half_extent);
    let lines = body_lines(&model.obj);

    let mut voxels = Vec::with_capacity(lines.len() / BLOCK_LINES + 1);
    for block in lines.chunks(BLOCK_LINES) {
        let (line_no, color_line) = block[0];
        let name = color_line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::Parse(format!("line {line_no}: missing material name")))?;
        let color = Color::from_hex_str(name)?;

        let &(line_no, vertex_line) = block
            .get(1)
            .ok_or_else(|| Error::Parse(format!("line {line_no}: block has no vertex")))?;
        let coords = vertex_line
            .split_whitespace()
            .skip(1)
            .map(|raw| {
                raw.parse::<f32>()
                    .map_err(|e| Error::Parse(format!("line {line_no}: '{raw}': {e}")))
            })
            .collect::<Result<Vec<f32>>>()?;
        let [x, y, z] = coords[..] else {
            return Err(Error::Parse(format!(
                "line {line_no}: expected 3 coordinates, found {}",
                coords.len()
            )));
        };

        voxels.push(LoadedVoxel {
            color,
            position: Vec3::new(x, y, z) + offset,
        });
    }

    log::debug!("Parsed {} voxels", voxels.len());
    Ok(voxels)
}
