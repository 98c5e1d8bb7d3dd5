//! Voxeldesk - scene and edit engine for a voxel-art editor
//!
//! Turns pointer input into voxel placement on a 50-unit lattice, keeps an
//! undoable edit history and exports/imports models as `.obj`/`.mtl` text.

pub mod core;
pub mod math;
pub mod voxel;
pub mod scene;
pub mod model;
pub mod editor;
