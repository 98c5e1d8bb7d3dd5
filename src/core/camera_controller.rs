//! Orbit camera controller
//!
//! The camera rides a sphere of fixed radius around the origin. Dragging
//! changes the azimuth `theta` and the polar angle `phi` (both in degrees).
//! The sphere mapping uses half angles (`θπ/360`), which halves the apparent
//! rotation per dragged pixel.

use crate::core::camera::Camera;
use crate::core::config::EditorConfig;
use crate::core::types::{Vec2, Vec3};

/// Lowest allowed polar angle (camera level with the ground)
pub const PHI_MIN: f32 = 0.0;
/// Highest allowed polar angle (camera directly overhead)
pub const PHI_MAX: f32 = 180.0;

/// Orbit angles in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitAngles {
    pub theta: f32,
    pub phi: f32,
}

/// Clamp a polar angle so the camera never flips over a pole
pub fn clamp_phi(phi: f32) -> f32 {
    phi.clamp(PHI_MIN, PHI_MAX)
}

/// Drag-to-orbit camera controller
#[derive(Clone, Debug)]
pub struct OrbitCameraController {
    /// Orbit radius in world units
    pub radius: f32,
    /// Degrees of rotation per dragged pixel
    pub speed: f32,
    theta: f32,
    phi: f32,
}

impl OrbitCameraController {
    /// Create new controller
    pub fn new(radius: f32, speed: f32, theta: f32, phi: f32) -> Self {
        Self {
            radius,
            speed,
            theta,
            phi: clamp_phi(phi),
        }
    }

    /// Create a controller from editor configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.orbit_radius,
            config.orbit_speed,
            config.initial_theta,
            config.initial_phi,
        )
    }

    /// Current angles, used as the drag start snapshot
    pub fn angles(&self) -> OrbitAngles {
        OrbitAngles {
            theta: self.theta,
            phi: self.phi,
        }
    }

    /// Get current theta
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Get current phi
    pub fn phi(&self) -> f32 {
        self.phi
    }

    /// Advance the orbit for a drag that started at `start` and has moved
    /// `delta` pixels since the press
    pub fn drag(&mut self, start: OrbitAngles, delta: Vec2) {
        self.theta = start.theta - delta.x * self.speed;
        self.phi = clamp_phi(start.phi + delta.y * self.speed);
    }

    /// Point on the orbit sphere for the current angles
    pub fn orbit_position(&self) -> Vec3 {
        let theta = self.theta.to_radians() * 0.5;
        let phi = self.phi.to_radians() * 0.5;
        Vec3::new(
            self.radius * theta.sin() * phi.cos(),
            self.radius * phi.sin(),
            self.radius * theta.cos() * phi.cos(),
        )
    }

    /// Move the camera onto the orbit and aim it at the origin
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.orbit_position();
        camera.look_at(Vec3::ZERO);
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
