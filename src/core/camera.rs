//! Perspective camera and picking rays

use crate::core::types::{Mat3, Mat4, Quat, Vec2, Vec3};
use crate::math::Ray;

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 1.0,
            far: 10000.0,
        }
    }

    /// Set clip planes
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Rotate the camera so it faces `target`, keeping +Y as up
    pub fn look_at(&mut self, target: Vec3) {
        let mut forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }

        // Looking straight up or down: nudge off the pole so `right` is defined
        if forward.cross(Vec3::Y).length_squared() < 1e-12 {
            forward.z += 1e-4;
            forward = forward.normalize();
        }

        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Update aspect ratio (call on viewport resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ray from the camera through a point in normalized device coordinates.
    ///
    /// `ndc` spans [-1, 1] on both axes with +y up.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect;
        let direction = self.forward()
            + self.right() * (ndc.x * half_width)
            + self.up() * (ndc.y * half_height);
        Ray::new(self.position, direction.normalize())
    }

    /// Project a world point to normalized device coordinates
    pub fn world_to_ndc(&self, point: Vec3) -> Vec2 {
        self.view_projection().project_point3(point).truncate()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), 45.0, 16.0 / 9.0)
    }
}
