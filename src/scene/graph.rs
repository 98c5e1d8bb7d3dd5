//! Editor scene: ground plane, roll-over preview and voxels.

use crate::core::config::EditorConfig;
use crate::voxel::{Color, VoxelGrid};

use super::node::{GroundPlane, RollOver, SceneObject};

/// Everything the editor renders and picks against
#[derive(Clone, Debug)]
pub struct Scene {
    pub plane: GroundPlane,
    pub roll_over: RollOver,
    pub voxels: VoxelGrid,
    /// Clear color
    pub background: Color,
}

impl Scene {
    /// Create an empty scene from editor configuration
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            plane: GroundPlane::from_config(config),
            roll_over: RollOver::new(Color::from_hex(config.roll_over_color)),
            voxels: VoxelGrid::new(config.voxel_size).with_max_coordinate(config.max_coordinate()),
            background: Color::from_hex(config.background_color),
        }
    }

    /// All objects in draw order: plane, roll-over, then voxels by insertion
    pub fn objects(&self) -> impl Iterator<Item = SceneObject<'_>> {
        [
            SceneObject::Plane(&self.plane),
            SceneObject::RollOver(&self.roll_over),
        ]
        .into_iter()
        .chain(self.voxels.iter().map(SceneObject::Voxel))
    }

    /// Number of renderable objects
    pub fn object_count(&self) -> usize {
        2 + self.voxels.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
