//! Voxeldesk - native editing shell
//!
//! Opens a window and drives a [`VoxelWorld`] from mouse and touch input.
//! Drawing is left to an attached renderer; this shell reports the world
//! state in the window title.
//!
//! Keys: `E` toggles add/remove, `Z` undoes, `S` saves and `L` loads the
//! model directory, `R` starts over with an empty world, `Esc` quits.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use voxeldesk::core::{
    config::EditorConfig,
    input::{CanvasRect, EditMode, WinitPointerAdapter},
    logging,
};
use voxeldesk::editor::{EditOutcome, VoxelWorld};
use voxeldesk::model::Model3d;
use voxeldesk::scene::{RecordingRenderer, Viewport};

struct App {
    window: Option<Arc<Window>>,
    config: EditorConfig,
    world: VoxelWorld,
    input: WinitPointerAdapter,
    mode: EditMode,
    model_dir: PathBuf,
}

impl App {
    fn new(config: EditorConfig, world: VoxelWorld, model_dir: PathBuf) -> Self {
        Self {
            window: None,
            config,
            world,
            input: WinitPointerAdapter::default(),
            mode: EditMode::Add,
            model_dir,
        }
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "Voxeldesk - {:?} - {} voxels, {} edits",
                self.mode,
                self.world.voxels().len(),
                self.world.history_len(),
            ));
        }
    }

    fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        self.input.resized(width as f32, height as f32);
        self.world.resize(
            Viewport::new(width as f32, height as f32).with_pixel_ratio(scale_factor as f32),
        );
    }

    fn save(&self) {
        let model = self.world.on_save();
        if let Err(e) = model.write_to_dir(&self.model_dir) {
            log::error!("Save failed: {e}");
        }
    }

    fn load(&mut self) {
        let result = Model3d::read_from_dir(&self.model_dir)
            .and_then(|model| self.world.on_load_model(&model));
        match result {
            Ok(count) => log::info!("Loaded {} voxels from {}", count, self.model_dir.display()),
            Err(e) => log::error!("Load failed: {e}"),
        }
    }

    /// Replace the world with a fresh one, keeping the renderer and viewport
    fn reset(&mut self) {
        let mut world = match VoxelWorld::with_config(self.config.clone()) {
            Ok(world) => world,
            Err(e) => {
                log::error!("Reset failed: {e}");
                return;
            }
        };
        world.resize(self.world.viewport());
        if let Some(renderer) = self.world.detach() {
            world.attach(renderer);
        }
        self.world = world;
        log::info!("World reset");
    }

    fn key_pressed(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyE => {
                self.mode = match self.mode {
                    EditMode::Add => EditMode::Remove,
                    EditMode::Remove => EditMode::Add,
                };
            }
            KeyCode::KeyZ => {
                self.world.on_undo();
            }
            KeyCode::KeyS => self.save(),
            KeyCode::KeyL => self.load(),
            KeyCode::KeyR => self.reset(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Voxeldesk")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        self.input = WinitPointerAdapter::new(CanvasRect::from_size(size.width as f32, size.height as f32));
        self.world.attach(RecordingRenderer::new());
        self.resize(size.width, size.height, window.scale_factor());
        self.window = Some(window);
        self.update_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(input) = self.input.process_event(&event) {
            if let outcome @ (EditOutcome::Added(_) | EditOutcome::Removed(_)) =
                self.world.handle_input(&input, self.mode)
            {
                log::debug!("{outcome:?}");
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.resize(size.width, size.height, scale);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.key_pressed(event_loop, key);
                }
            }
            _ => {}
        }

        self.update_title();
    }
}

/// Value following `flag` on the command line
fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn main() {
    logging::init();
    log::info!("Voxeldesk starting...");

    let args: Vec<String> = std::env::args().collect();
    let model_dir = parse_path_arg(&args, "--models").unwrap_or_else(|| PathBuf::from("models"));

    let config = match parse_path_arg(&args, "--config") {
        Some(path) => {
            log::info!("Loading config from: {}", path.display());
            EditorConfig::load(&path).unwrap_or_else(|e| {
                log::warn!("Using default config: {e}");
                EditorConfig::default()
            })
        }
        None => EditorConfig::default(),
    };

    let world = match VoxelWorld::with_config(config.clone()) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Invalid config: {e}");
            return;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            return;
        }
    };
    let mut app = App::new(config, world, model_dir);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
    }
}
