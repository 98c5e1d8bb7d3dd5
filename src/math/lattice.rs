//! Cubic lattice helpers
//!
//! Voxels sit on a lattice of pitch `size`. A cell is addressed by an integer
//! coordinate; its center lies half a pitch inside the cell on every axis.

use crate::core::types::{IVec3, Vec3};

/// Center of the cell adjacent to a picked surface.
///
/// Offsetting the hit point by the unit surface normal before flooring makes
/// a hit on a voxel face land in the neighbouring cell, and a hit on the
/// ground plane land in the cell resting on it.
pub fn snap_to_cell_center(point: Vec3, normal: Vec3, size: f32) -> Vec3 {
    let cell = ((point + normal) / size).floor();
    cell * size + Vec3::splat(size * 0.5)
}

/// Integer cell containing `point`
pub fn cell_of(point: Vec3, size: f32) -> IVec3 {
    (point / size).floor().as_ivec3()
}

/// World-space center of `cell`
pub fn cell_center(cell: IVec3, size: f32) -> Vec3 {
    cell.as_vec3() * size + Vec3::splat(size * 0.5)
}

/// True if `point` is exactly a cell center (within float tolerance)
pub fn is_cell_center(point: Vec3, size: f32) -> bool {
    let snapped = cell_center(cell_of(point, size), size);
    (snapped - point).abs().max_element() <= size * 1e-4
}
