//! Voxel data structures and operations

pub mod color;
pub mod voxel;
pub mod grid;
pub mod edit;

pub use color::Color;
pub use voxel::{Voxel, VoxelId};
pub use grid::VoxelGrid;
pub use edit::{EditHistory, Step};
