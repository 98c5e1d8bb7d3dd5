//! Pointer and touch input
//!
//! Hosts hand the editor plain event values: client coordinates plus the
//! canvas rectangle they were measured against. Browser hosts build these
//! from DOM events; native hosts can feed `winit` window events through
//! [`WinitPointerAdapter`].

use winit::event::{ElementState, TouchPhase, WindowEvent};

pub use winit::event::MouseButton;

use crate::core::camera_controller::OrbitAngles;
use crate::core::types::Vec2;

/// Bounding rectangle of the canvas in client coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    /// Create a canvas rectangle
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Canvas anchored at the client origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Client point relative to the canvas top-left corner
    pub fn local(&self, client: Vec2) -> Vec2 {
        Vec2::new(client.x - self.left, client.y - self.top)
    }

    /// Normalized device coordinates of a client point (+y up).
    ///
    /// Returns `None` for a degenerate (zero-area) canvas.
    pub fn to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let local = self.local(client);
        Some(Vec2::new(
            local.x / self.width * 2.0 - 1.0,
            -(local.y / self.height * 2.0 - 1.0),
        ))
    }

    /// Client point for given normalized device coordinates
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (ndc.x + 1.0) * 0.5 * self.width,
            self.top + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// A mouse event on the canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in client coordinates
    pub client: Vec2,
    /// Button that changed (or is reported) with this event
    pub button: MouseButton,
    /// Canvas rectangle at the time of the event
    pub rect: CanvasRect,
}

impl PointerEvent {
    /// Create a pointer event
    pub fn new(client: Vec2, button: MouseButton, rect: CanvasRect) -> Self {
        Self { client, button, rect }
    }

    /// Primary (left) button event
    pub fn primary(client: Vec2, rect: CanvasRect) -> Self {
        Self::new(client, MouseButton::Left, rect)
    }

    /// Whether this event belongs to the primary button
    pub fn is_primary(&self) -> bool {
        self.button == MouseButton::Left
    }
}

/// A touch event on the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Touch points still on the surface
    pub touches: Vec<Vec2>,
    /// Touch points that changed with this event
    pub changed_touches: Vec<Vec2>,
    /// Canvas rectangle at the time of the event
    pub rect: CanvasRect,
}

impl TouchEvent {
    /// Event for a single touch point that is down (start/move)
    pub fn single(point: Vec2, rect: CanvasRect) -> Self {
        Self {
            touches: vec![point],
            changed_touches: vec![point],
            rect,
        }
    }

    /// Event for a single touch point that was lifted (end)
    pub fn lifted(point: Vec2, rect: CanvasRect) -> Self {
        Self {
            touches: Vec::new(),
            changed_touches: vec![point],
            rect,
        }
    }

    /// First active touch point
    pub fn first_touch(&self) -> Option<Vec2> {
        self.touches.first().copied()
    }

    /// First changed touch point (the lifted finger on touch end)
    pub fn first_changed_touch(&self) -> Option<Vec2> {
        self.changed_touches.first().copied()
    }
}

/// What a click does to the voxel under the pointer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Add,
    Remove,
}

/// Press/drag state of the primary pointer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No button or touch is held
    #[default]
    Idle,
    /// Primary button or first touch is held
    Dragging {
        /// Press position relative to the canvas
        press: Vec2,
        /// Orbit angles at the moment of the press
        start: OrbitAngles,
    },
}

impl DragState {
    /// Whether the pointer is held
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Whether a press/release pair is a click rather than a drag
pub fn is_click(press: Vec2, release: Vec2, threshold: f32) -> bool {
    (release - press).length() <= threshold
}

/// Input event routed to [`VoxelWorld::handle_input`](crate::editor::VoxelWorld::handle_input)
#[derive(Clone, Debug, PartialEq)]
pub enum EditorInput {
    MouseDown(PointerEvent),
    MouseMove(PointerEvent),
    MouseUp(PointerEvent),
    RightClick(PointerEvent),
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
    TouchEnd(TouchEvent),
}

/// Translates `winit` window events into editor input for native hosts
#[derive(Clone, Debug)]
pub struct WinitPointerAdapter {
    rect: CanvasRect,
    cursor: Vec2,
    /// Active touches by id, in the order they went down
    touches: Vec<(u64, Vec2)>,
}

impl WinitPointerAdapter {
    /// Create an adapter for a window of the given size
    pub fn new(rect: CanvasRect) -> Self {
        Self {
            rect,
            cursor: Vec2::ZERO,
            touches: Vec::new(),
        }
    }

    /// Current canvas rectangle
    pub fn canvas(&self) -> CanvasRect {
        self.rect
    }

    /// Last known cursor position
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<EditorInput> {
        match event {
            WindowEvent::Resized(size) => {
                self.resized(size.width as f32, size.height as f32);
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::Touch(touch) => Some(self.touch(
                touch.phase,
                touch.id,
                Vec2::new(touch.location.x as f32, touch.location.y as f32),
            )),
            _ => None,
        }
    }

    /// Window was resized; the canvas fills the window
    pub fn resized(&mut self, width: f32, height: f32) {
        self.rect = CanvasRect::from_size(width, height);
    }

    /// Cursor moved to a new client position
    pub fn cursor_moved(&mut self, position: Vec2) -> EditorInput {
        self.cursor = position;
        EditorInput::MouseMove(PointerEvent::primary(position, self.rect))
    }

    /// Mouse button changed state at the last cursor position
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<EditorInput> {
        let event = PointerEvent::new(self.cursor, button, self.rect);
        match (state, button) {
            (ElementState::Pressed, MouseButton::Left) => Some(EditorInput::MouseDown(event)),
            (ElementState::Released, MouseButton::Left) => Some(EditorInput::MouseUp(event)),
            (ElementState::Pressed, MouseButton::Right) => Some(EditorInput::RightClick(event)),
            _ => None,
        }
    }

    /// Touch point changed phase
    pub fn touch(&mut self, phase: TouchPhase, id: u64, location: Vec2) -> EditorInput {
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|(existing, _)| *existing != id);
                self.touches.push((id, location));
                EditorInput::TouchStart(self.touch_event(location))
            }
            TouchPhase::Moved => {
                if let Some(entry) = self.touches.iter_mut().find(|(existing, _)| *existing == id) {
                    entry.1 = location;
                }
                EditorInput::TouchMove(self.touch_event(location))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|(existing, _)| *existing != id);
                EditorInput::TouchEnd(self.touch_event(location))
            }
        }
    }

    fn touch_event(&self, changed: Vec2) -> TouchEvent {
        TouchEvent {
            touches: self.touches.iter().map(|(_, point)| *point).collect(),
            changed_touches: vec![changed],
            rect: self.rect,
        }
    }
}

impl Default for WinitPointerAdapter {
    fn default() -> Self {
        Self::new(CanvasRect::from_size(1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners_and_center() {
        let rect = CanvasRect::new(100.0, 50.0, 800.0, 600.0);

        assert_eq!(rect.to_ndc(Vec2::new(100.0, 50.0)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(rect.to_ndc(Vec2::new(900.0, 650.0)), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(rect.to_ndc(Vec2::new(500.0, 350.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_ndc_degenerate_canvas() {
        let rect = CanvasRect::from_size(0.0, 600.0);
        assert!(rect.to_ndc(Vec2::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_from_ndc_inverts_to_ndc() {
        let rect = CanvasRect::new(10.0, 20.0, 640.0, 480.0);
        let client = Vec2::new(123.0, 321.0);
        let ndc = rect.to_ndc(client).unwrap();
        assert!((rect.from_ndc(ndc) - client).length() < 1e-3);
    }

    #[test]
    fn test_click_threshold() {
        let press = Vec2::new(100.0, 100.0);
        assert!(is_click(press, press, 5.0));
        assert!(is_click(press, Vec2::new(103.0, 104.0), 5.0));
        assert!(!is_click(press, Vec2::new(104.0, 104.0), 5.0));
    }

    #[test]
    fn test_touch_event_points() {
        let rect = CanvasRect::from_size(100.0, 100.0);
        let down = TouchEvent::single(Vec2::new(1.0, 2.0), rect);
        assert_eq!(down.first_touch(), Some(Vec2::new(1.0, 2.0)));

        let up = TouchEvent::lifted(Vec2::new(3.0, 4.0), rect);
        assert_eq!(up.first_touch(), None);
        assert_eq!(up.first_changed_touch(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_adapter_mouse_sequence() {
        let mut adapter = WinitPointerAdapter::new(CanvasRect::from_size(800.0, 600.0));

        let moved = adapter.cursor_moved(Vec2::new(40.0, 60.0));
        assert!(matches!(moved, EditorInput::MouseMove(e) if e.client == Vec2::new(40.0, 60.0)));

        let down = adapter.mouse_input(ElementState::Pressed, MouseButton::Left);
        assert!(matches!(down, Some(EditorInput::MouseDown(e)) if e.client == Vec2::new(40.0, 60.0)));

        let up = adapter.mouse_input(ElementState::Released, MouseButton::Left);
        assert!(matches!(up, Some(EditorInput::MouseUp(_))));

        let right = adapter.mouse_input(ElementState::Pressed, MouseButton::Right);
        assert!(matches!(right, Some(EditorInput::RightClick(e)) if e.button == MouseButton::Right));

        assert!(adapter.mouse_input(ElementState::Pressed, MouseButton::Middle).is_none());
    }

    #[test]
    fn test_adapter_touch_tracking() {
        let mut adapter = WinitPointerAdapter::new(CanvasRect::from_size(800.0, 600.0));

        adapter.touch(TouchPhase::Started, 7, Vec2::new(10.0, 10.0));
        adapter.touch(TouchPhase::Started, 9, Vec2::new(50.0, 50.0));

        let moved = adapter.touch(TouchPhase::Moved, 7, Vec2::new(12.0, 11.0));
        match moved {
            EditorInput::TouchMove(event) => {
                assert_eq!(event.first_touch(), Some(Vec2::new(12.0, 11.0)));
                assert_eq!(event.touches.len(), 2);
            }
            other => panic!("unexpected input {other:?}"),
        }

        let ended = adapter.touch(TouchPhase::Ended, 7, Vec2::new(12.0, 11.0));
        match ended {
            EditorInput::TouchEnd(event) => {
                assert_eq!(event.first_changed_touch(), Some(Vec2::new(12.0, 11.0)));
                assert_eq!(event.first_touch(), Some(Vec2::new(50.0, 50.0)));
            }
            other => panic!("unexpected input {other:?}"),
        }
    }

    #[test]
    fn test_adapter_resize_updates_canvas() {
        let mut adapter = WinitPointerAdapter::default();
        adapter.resized(1024.0, 768.0);
        assert_eq!(adapter.canvas(), CanvasRect::from_size(1024.0, 768.0));
    }
}
