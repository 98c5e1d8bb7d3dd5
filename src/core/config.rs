//! Editor configuration
//!
//! Every tunable the editor reads lives here. The defaults reproduce the
//! stock editor: 50-unit voxels on a 1000-unit ground plane, an orbit radius
//! of 1600 and a 5-pixel click threshold.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};

/// Configuration for a [`VoxelWorld`](crate::editor::VoxelWorld)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Edge length of one voxel (lattice pitch) in world units
    pub voxel_size: f32,
    /// Distance from the camera to the origin while orbiting
    pub orbit_radius: f32,
    /// Initial orbit azimuth in degrees
    pub initial_theta: f32,
    /// Initial orbit polar angle in degrees
    pub initial_phi: f32,
    /// Orbit degrees per dragged pixel
    pub orbit_speed: f32,
    /// Max pointer travel (pixels) for a press/release to count as a click
    pub click_threshold: f32,
    /// Max distance from the origin, in half-voxel units, accepted on import
    pub max_cells: u32,
    /// Edge length of the square ground plane
    pub plane_size: f32,
    /// Grid line divisions drawn across the ground plane
    pub grid_divisions: u32,
    /// Color applied to new voxels until the user picks another (0xRRGGBB)
    pub default_color: u32,
    /// Color of the translucent placement preview (0xRRGGBB)
    pub roll_over_color: u32,
    /// Scene clear color (0xRRGGBB)
    pub background_color: u32,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Camera position before the first orbit drag
    pub initial_camera_position: [f32; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            voxel_size: 50.0,
            orbit_radius: 1600.0,
            initial_theta: 45.0,
            initial_phi: 60.0,
            orbit_speed: 0.5,
            click_threshold: 5.0,
            max_cells: 100,
            plane_size: 1000.0,
            grid_divisions: 20,
            default_color: 0xfeb74c,
            roll_over_color: 0xff0000,
            background_color: 0xf0f0f0,
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 10000.0,
            initial_camera_position: [500.0, 800.0, 1300.0],
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the editor cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("voxel_size", self.voxel_size),
            ("orbit_radius", self.orbit_radius),
            ("plane_size", self.plane_size),
            ("fov_y_degrees", self.fov_y_degrees),
            ("near", self.near),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.far > self.near) {
            return Err(Error::Config(format!(
                "far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }
        if !(self.click_threshold >= 0.0) {
            return Err(Error::Config("click_threshold must not be negative".into()));
        }
        Ok(())
    }

    /// Half the voxel edge: offset from a cell center to its faces
    pub fn half_voxel(&self) -> f32 {
        self.voxel_size * 0.5
    }

    /// Largest cell-center coordinate magnitude a saved model can hold
    pub fn max_coordinate(&self) -> f32 {
        self.half_voxel() * self.max_cells as f32
    }

    /// Initial camera position as a vector
    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.initial_camera_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.half_voxel(), 25.0);
        assert_eq!(config.camera_position(), Vec3::new(500.0, 800.0, 1300.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "orbit_radius": 900.0 }"#).unwrap();
        assert_eq!(config.orbit_radius, 900.0);
        assert_eq!(config.voxel_size, 50.0);
        assert_eq!(config.default_color, 0xfeb74c);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{ "voxel_size": 0.0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "near": 10.0, "far": 5.0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            EditorConfig::from_json("not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("editor.json");

        let config = EditorConfig {
            click_threshold: 8.0,
            initial_phi: 30.0,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = EditorConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
