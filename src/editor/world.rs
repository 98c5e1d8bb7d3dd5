//! The editable voxel world.
//!
//! `VoxelWorld` owns the scene, camera, orbit controller, edit history and
//! color notifications, and exposes them as a command surface for a UI:
//! pointer and touch handlers, undo, save and load.
//!
//! Pointer flow:
//! - press: snapshot the orbit angles and the press position
//! - move: orbit while pressed, then move the roll-over to the picked cell
//! - release: if the pointer travelled no further than the click threshold,
//!   add or remove a voxel at the picked point

use crate::core::camera::Camera;
use crate::core::camera_controller::OrbitCameraController;
use crate::core::config::EditorConfig;
use crate::core::error::Error;
use crate::core::input::{
    is_click, CanvasRect, DragState, EditMode, EditorInput, PointerEvent, TouchEvent,
};
use crate::core::types::{Result, Vec2, Vec3};
use crate::model::{self, Model3d, ModelFormat};
use crate::scene::{Hit, HitTarget, RecordingRenderer, RollOver, Scene, SceneRenderer, Viewport};
use crate::voxel::{Color, EditHistory, Step, VoxelGrid, VoxelId};

use super::notify::{ColorsUsedListener, SubscriptionId, Subscribers};

/// Effect of a pointer release, right click or undo on the voxel set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing changed
    #[default]
    None,
    Added(VoxelId),
    Removed(VoxelId),
}

/// Interactive voxel editor state
#[derive(Debug)]
pub struct VoxelWorld<R: SceneRenderer = RecordingRenderer> {
    config: EditorConfig,
    format: ModelFormat,
    scene: Scene,
    camera: Camera,
    orbit: OrbitCameraController,
    drag: DragState,
    history: EditHistory,
    picked_color: Color,
    /// Distinct colors placed so far, in first-use order
    used_colors: Vec<Color>,
    subscribers: Subscribers,
    viewport: Viewport,
    renderer: Option<R>,
}

impl<R: SceneRenderer> VoxelWorld<R> {
    /// Create an empty world with default configuration
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Create an empty world from a validated configuration
    pub fn with_config(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        let mut camera = Camera::new(config.camera_position(), config.fov_y_degrees, 1.0)
            .with_clip(config.near, config.far);
        camera.look_at(Vec3::ZERO);

        Self {
            format: ModelFormat::from_config(&config),
            scene: Scene::new(&config),
            orbit: OrbitCameraController::from_config(&config),
            picked_color: Color::from_hex(config.default_color),
            drag: DragState::Idle,
            history: EditHistory::new(),
            used_colors: Vec::new(),
            subscribers: Subscribers::new(),
            viewport: Viewport::new(1.0, 1.0),
            renderer: None,
            camera,
            config,
        }
    }

    // ----- Renderer lifecycle -----

    /// Attach a renderer and draw the first frame. Returns the renderer it replaces.
    pub fn attach(&mut self, renderer: R) -> Option<R> {
        let previous = self.renderer.replace(renderer);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_viewport(self.viewport);
        }
        self.render();
        previous
    }

    /// Detach and return the renderer; the world keeps editing headless
    pub fn detach(&mut self) -> Option<R> {
        self.renderer.take()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Draw the current scene if a renderer is attached
    pub fn render(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&self.scene, &self.camera);
        }
    }

    /// Surface changed size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.width, viewport.height);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_viewport(viewport);
        }
        self.render();
    }

    // ----- Notifications -----

    pub fn subscribe_colors_used(
        &mut self,
        listener: impl ColorsUsedListener + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ----- Pointer input -----

    /// Primary button pressed: start a potential drag
    pub fn on_mouse_down(&mut self, event: &PointerEvent) {
        if !event.is_primary() {
            return;
        }
        self.press(&event.rect, event.client);
    }

    /// Pointer moved: orbit while pressed, then update the placement preview
    pub fn on_mouse_move(&mut self, event: &PointerEvent) {
        if !event.is_primary() {
            return;
        }
        self.pointer_move(&event.rect, event.client);
    }

    /// Primary button released: edit if the gesture was a click
    pub fn on_mouse_up(&mut self, event: &PointerEvent, mode: EditMode) -> EditOutcome {
        if !event.is_primary() {
            return EditOutcome::None;
        }
        self.release(&event.rect, event.client, mode)
    }

    /// Secondary click: remove the voxel under the pointer
    pub fn on_right_click(&mut self, event: &PointerEvent) -> EditOutcome {
        if event.is_primary() {
            return EditOutcome::None;
        }
        let Some(hit) = self.intersect(&event.rect, event.client) else {
            return EditOutcome::None;
        };
        let outcome = self.remove_at(&hit);
        self.render();
        outcome
    }

    // ----- Touch input -----

    pub fn on_touch_start(&mut self, event: &TouchEvent) {
        match event.first_touch() {
            Some(point) => self.press(&event.rect, point),
            None => log::trace!("touch start without touch points"),
        }
    }

    pub fn on_touch_move(&mut self, event: &TouchEvent) {
        match event.first_touch() {
            Some(point) => self.pointer_move(&event.rect, point),
            None => log::trace!("touch move without touch points"),
        }
    }

    pub fn on_touch_end(&mut self, event: &TouchEvent, mode: EditMode) -> EditOutcome {
        match event.first_changed_touch() {
            Some(point) => self.release(&event.rect, point, mode),
            None => {
                log::trace!("touch end without changed touches");
                EditOutcome::None
            }
        }
    }

    /// Route one input event to its handler
    pub fn handle_input(&mut self, input: &EditorInput, mode: EditMode) -> EditOutcome {
        match input {
            EditorInput::MouseDown(event) => {
                self.on_mouse_down(event);
                EditOutcome::None
            }
            EditorInput::MouseMove(event) => {
                self.on_mouse_move(event);
                EditOutcome::None
            }
            EditorInput::MouseUp(event) => self.on_mouse_up(event, mode),
            EditorInput::RightClick(event) => self.on_right_click(event),
            EditorInput::TouchStart(event) => {
                self.on_touch_start(event);
                EditOutcome::None
            }
            EditorInput::TouchMove(event) => {
                self.on_touch_move(event);
                EditOutcome::None
            }
            EditorInput::TouchEnd(event) => self.on_touch_end(event, mode),
        }
    }

    fn press(&mut self, rect: &CanvasRect, client: Vec2) {
        self.drag = DragState::Dragging {
            press: rect.local(client),
            start: self.orbit.angles(),
        };
    }

    fn pointer_move(&mut self, rect: &CanvasRect, client: Vec2) {
        if let DragState::Dragging { press, start } = self.drag {
            self.orbit.drag(start, rect.local(client) - press);
            self.orbit.apply(&mut self.camera);
        }

        if let Some(cell) = self
            .intersect(rect, client)
            .and_then(|hit| hit.placement(self.config.voxel_size))
        {
            self.scene.roll_over.position = cell;
        }
        self.render();
    }

    fn release(&mut self, rect: &CanvasRect, client: Vec2, mode: EditMode) -> EditOutcome {
        let DragState::Dragging { press, .. } = std::mem::take(&mut self.drag) else {
            log::trace!("release without press");
            return EditOutcome::None;
        };

        if !is_click(press, rect.local(client), self.config.click_threshold) {
            log::trace!("release ended a drag");
            return EditOutcome::None;
        }

        let Some(hit) = self.intersect(rect, client) else {
            return EditOutcome::None;
        };
        let outcome = match mode {
            EditMode::Add => self.add_at(&hit),
            EditMode::Remove => self.remove_at(&hit),
        };
        self.render();
        outcome
    }

    /// Nearest scene hit under a client point
    fn intersect(&self, rect: &CanvasRect, client: Vec2) -> Option<Hit> {
        let ndc = rect.to_ndc(client)?;
        self.scene.pick(&self.camera.ray_from_ndc(ndc))
    }

    // ----- Editing -----

    /// Set the color used by the next add
    pub fn set_picked_color(&mut self, color: impl Into<Color>) {
        self.picked_color = color.into();
    }

    fn add_at(&mut self, hit: &Hit) -> EditOutcome {
        let Some(position) = hit.placement(self.config.voxel_size) else {
            log::debug!("hit at {} has no face normal, nothing added", hit.point);
            return EditOutcome::None;
        };

        match self.add_voxel(position, self.picked_color) {
            Ok(id) => EditOutcome::Added(id),
            Err(e @ Error::OutOfBounds { .. }) => {
                log::debug!("{e}, nothing added");
                EditOutcome::None
            }
            Err(e) => {
                log::warn!("Could not add voxel: {e}");
                EditOutcome::None
            }
        }
    }

    /// Place a voxel, record it and announce its color
    fn add_voxel(&mut self, position: Vec3, color: Color) -> Result<VoxelId> {
        let id = self.scene.voxels.insert(position, color)?;
        let position = self
            .scene
            .voxels
            .get(id)
            .map_or(position, |voxel| voxel.position);

        self.history.push(Step::Addition { position, color });
        self.note_color_used(color);
        log::debug!("Added voxel {id:?} at {position}");
        Ok(id)
    }

    fn remove_at(&mut self, hit: &Hit) -> EditOutcome {
        let HitTarget::Voxel(id) = hit.target else {
            return EditOutcome::None;
        };
        let Some(voxel) = self.scene.voxels.remove(id) else {
            return EditOutcome::None;
        };

        self.history.push(Step::Removal {
            position: voxel.position,
            color: voxel.color,
        });
        log::debug!("Removed voxel {id:?} at {}", voxel.position);
        EditOutcome::Removed(id)
    }

    fn note_color_used(&mut self, color: Color) {
        if !self.used_colors.contains(&color) {
            self.used_colors.push(color);
        }
        self.subscribers.notify(&self.used_colors);
    }

    /// Revert the most recent edit. Returns the step that was undone.
    pub fn on_undo(&mut self) -> Option<Step> {
        let Some(step) = self.history.pop() else {
            log::trace!("nothing to undo");
            self.render();
            return None;
        };

        // Apply the inverse without recording it
        match step.inverse() {
            Step::Removal { position, .. } => {
                if self.scene.voxels.remove_at(position).is_none() {
                    log::warn!("Undo: no voxel at {position}");
                }
            }
            Step::Addition { position, color } => {
                if let Err(e) = self.scene.voxels.insert(position, color) {
                    log::warn!("Undo: could not restore voxel: {e}");
                }
            }
        }
        log::debug!("Undid edit at {} ({:06x})", step.position(), step.color().to_hex());
        self.render();
        Some(step)
    }

    // ----- Persistence -----

    /// Export every voxel as `.obj`/`.mtl` text
    pub fn on_save(&self) -> Model3d {
        model::serialize(self.scene.voxels.iter(), &self.format)
    }

    /// Validate and import a model, adding its voxels to the world.
    ///
    /// Each voxel is recorded as its own undo step. If any voxel cannot be
    /// placed, everything this call added is taken out again and the error
    /// is returned. On success the picked color is the last loaded color.
    pub fn on_load_model(&mut self, model: &Model3d) -> Result<usize> {
        if let Err(e) = model::validate(model, &self.format).into_result() {
            log::warn!("Rejected model: {e}");
            return Err(e);
        }
        let loaded = model::parse(model, &self.format).inspect_err(|e| {
            log::warn!("Could not parse model: {e}");
        })?;

        let history_len = self.history.len();
        let picked_color = self.picked_color;
        let used_colors = self.used_colors.clone();

        let mut added = Vec::with_capacity(loaded.len());
        for voxel in &loaded {
            self.picked_color = voxel.color;
            match self.add_voxel(voxel.position, voxel.color) {
                Ok(id) => added.push(id),
                Err(e) => {
                    log::warn!("Load failed after {} voxels, rolling back: {e}", added.len());
                    for id in added {
                        self.scene.voxels.remove(id);
                    }
                    self.history.truncate(history_len);
                    self.picked_color = picked_color;
                    self.used_colors = used_colors;
                    self.subscribers.notify(&self.used_colors);
                    self.render();
                    return Err(e);
                }
            }
        }

        log::info!("Loaded {} voxels", added.len());
        self.render();
        Ok(added.len())
    }

    // ----- Accessors -----

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitCameraController {
        &self.orbit
    }

    pub fn voxels(&self) -> &VoxelGrid {
        &self.scene.voxels
    }

    pub fn roll_over(&self) -> &RollOver {
        &self.scene.roll_over
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn picked_color(&self) -> Color {
        self.picked_color
    }

    pub fn used_colors(&self) -> &[Color] {
        &self.used_colors
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl<R: SceneRenderer> Default for VoxelWorld<R> {
    fn default() -> Self {
        Self::new()
    }
}
