//! Rendering seam
//!
//! The editor decides what is on screen; a [`SceneRenderer`] decides how it
//! is drawn.

use crate::core::camera::Camera;

use super::graph::Scene;

/// Drawable surface size in logical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Physical pixels per logical pixel
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Width over height, or 1 for a degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Backend that draws the editor scene
pub trait SceneRenderer {
    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &Camera);

    /// Called when the drawable surface changes size
    fn set_viewport(&mut self, viewport: Viewport);
}

/// Renderer that draws nothing and records what it was asked to do
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub frames: usize,
    pub viewport: Option<Viewport>,
    /// Object count of the most recent frame
    pub last_object_count: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneRenderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        self.frames += 1;
        self.last_object_count = scene.object_count();
        log::trace!("frame {} ({} objects)", self.frames, self.last_object_count);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}
