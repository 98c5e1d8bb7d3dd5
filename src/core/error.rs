//! Error types for the voxel editor core

use glam::{IVec3, Vec3};
use thiserror::Error;

/// Main error type for the editor core
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid model (line {line}): {msg}")]
    Validation { line: usize, msg: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cell {0} is already occupied")]
    CellOccupied(IVec3),

    #[error("Position {0} is not a cell center")]
    OffLattice(Vec3),

    #[error("Position {position} is outside the editable volume (max {max})")]
    OutOfBounds { position: Vec3, max: f32 },
}
