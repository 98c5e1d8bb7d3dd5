//! Wavefront `.obj`/`.mtl` export and import for voxel models.
//!
//! Every voxel is written as one fixed-size block of 15 lines:
//!
//! ```text
//! usemtl feb74c
//! v -25 0 50      <- anchor vertex (center + (-25, -25, +25))
//! v ...           (7 more vertices)
//! f 1 2 3 4       (6 quad faces)
//! ```
//!
//! Colors are shared through `material.mtl`, one `newmtl`/`Kd` pair per
//! distinct color.

pub mod topology;
pub mod serializer;
pub mod validator;
pub mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::config::EditorConfig;
use crate::core::types::Result;

pub use loader::{parse, LoadedVoxel};
pub use serializer::serialize;
pub use topology::{topologize, VoxelTopology};
pub use validator::{validate, Validation};

/// Lines per voxel block: 1 `usemtl`, 8 `v`, 6 `f`
pub const BLOCK_LINES: usize = 15;
/// Vertices per voxel block
pub const CUBE_VERTICES: usize = 8;
/// Header line referencing the material library
pub const MATERIAL_LIBRARY: &str = "mtllib ./material.mtl";
/// Material library file name
pub const MATERIAL_FILE: &str = "material.mtl";
/// Geometry file name used by [`Model3d::write_to_dir`]
pub const OBJ_FILE: &str = "model.obj";

/// Quad faces of a cube, as 1-based indices into its 8 vertices
pub const CUBE_FACES: [[u32; 4]; 6] = [
    [1, 2, 3, 4],
    [2, 5, 6, 3],
    [5, 6, 7, 8],
    [8, 7, 4, 1],
    [3, 6, 7, 4],
    [2, 1, 8, 5],
];

/// An exported model: geometry text plus its material library
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model3d {
    pub obj: String,
    pub mtl: String,
}

impl Model3d {
    pub fn new(obj: impl Into<String>, mtl: impl Into<String>) -> Self {
        Self {
            obj: obj.into(),
            mtl: mtl.into(),
        }
    }

    /// Write `model.obj` and `material.mtl` into `dir`, creating it if needed
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(OBJ_FILE), &self.obj)?;
        std::fs::write(dir.join(MATERIAL_FILE), &self.mtl)?;
        log::info!("Saved model to {}", dir.display());
        Ok(())
    }

    /// Read a model previously written by [`write_to_dir`](Self::write_to_dir).
    ///
    /// A missing material file reads as empty; the geometry file is required.
    pub fn read_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let obj = std::fs::read_to_string(dir.join(OBJ_FILE))?;
        let mtl = match std::fs::read_to_string(dir.join(MATERIAL_FILE)) {
            Ok(mtl) => mtl,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { obj, mtl })
    }
}

/// Geometry parameters shared by the encoder, validator and loader
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelFormat {
    /// Distance from a voxel center to its faces
    pub half_extent: f32,
    /// Max reconstructed coordinate magnitude, in multiples of `half_extent`
    pub max_cells: u32,
}

impl ModelFormat {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            half_extent: config.half_voxel(),
            max_cells: config.max_cells,
        }
    }

    /// Largest accepted coordinate magnitude, equal to
    /// [`EditorConfig::max_coordinate`] for the same configuration
    pub fn max_coordinate(&self) -> f32 {
        self.half_extent * self.max_cells as f32
    }
}

impl Default for ModelFormat {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Voxel block lines of an `.obj` body, with their 1-based line numbers.
///
/// Numbers count from the first line of the raw text. Blank lines around the
/// body are skipped and a leading `mtllib` header is dropped.
pub(crate) fn body_lines(obj: &str) -> Vec<(usize, &str)> {
    let mut lines: Vec<(usize, &str)> = obj
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .skip_while(|(_, line)| line.trim().is_empty())
        .collect();
    while lines.last().is_some_and(|(_, line)| line.trim().is_empty()) {
        lines.pop();
    }
    if let Some((_, first)) = lines.first_mut() {
        *first = first.trim_start();
    }
    if let Some((_, last)) = lines.last_mut() {
        *last = last.trim_end();
    }

    if lines.first().is_some_and(|(_, line)| line.starts_with("mtllib")) {
        lines.remove(0);
    }
    lines
}
