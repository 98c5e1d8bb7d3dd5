//! Editor scene: typed objects, picking and the renderer seam

pub mod graph;
pub mod node;
pub mod picking;
pub mod renderer;

pub use graph::Scene;
pub use node::{GroundPlane, RollOver, SceneObject};
pub use picking::{Hit, HitTarget};
pub use renderer::{RecordingRenderer, SceneRenderer, Viewport};
