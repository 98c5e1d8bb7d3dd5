//! Scene object types
//!
//! The editor scene holds exactly three kinds of object: the ground plane,
//! the roll-over preview and the voxels. Each kind has its own type so that
//! a preview can never end up in an export or the undo history.

use crate::core::config::EditorConfig;
use crate::core::types::Vec3;
use crate::voxel::{Color, Voxel};

/// Square ground plane at `y = 0`, the default ray target.
///
/// The plane itself is invisible; renderers draw a line grid with
/// `divisions` cells per side in its place.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundPlane {
    /// Edge length in world units, centered on the origin
    pub size: f32,
    /// Grid cells per side
    pub divisions: u32,
    pub visible: bool,
}

impl GroundPlane {
    /// Upward normal of the pickable side
    pub const NORMAL: Vec3 = Vec3::Y;

    pub fn new(size: f32, divisions: u32) -> Self {
        Self {
            size,
            divisions,
            visible: false,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.plane_size, config.grid_divisions)
    }

    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// True if a point on the plane lies within its bounds
    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.half_size();
        point.x.abs() <= half && point.z.abs() <= half
    }
}

/// Translucent cube showing where the next voxel would land
#[derive(Clone, Debug, PartialEq)]
pub struct RollOver {
    pub position: Vec3,
    pub color: Color,
    pub opacity: f32,
}

impl RollOver {
    pub fn new(color: Color) -> Self {
        Self {
            position: Vec3::ZERO,
            color,
            opacity: 0.5,
        }
    }
}

/// Borrowed view of one renderable object
#[derive(Clone, Copy, Debug)]
pub enum SceneObject<'a> {
    Plane(&'a GroundPlane),
    RollOver(&'a RollOver),
    Voxel(&'a Voxel),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_bounds() {
        let plane = GroundPlane::new(1000.0, 20);
        assert!(!plane.visible);
        assert!(plane.contains(Vec3::new(500.0, 0.0, -500.0)));
        assert!(!plane.contains(Vec3::new(500.1, 0.0, 0.0)));
    }

    #[test]
    fn test_roll_over_defaults() {
        let roll_over = RollOver::new(Color::from_hex(0xff0000));
        assert_eq!(roll_over.opacity, 0.5);
        assert_eq!(roll_over.position, Vec3::ZERO);
    }
}
