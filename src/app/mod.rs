//! # Application
//!
//! Window and event loop for one [`Showcase`], built on winit's
//! [`ApplicationHandler`].
//!
//! ## Key Components
//!
//! - [`App`] - Owns the configuration and runs the event loop
//! - [`Stage`] - Showcase world with its camera, controls, viewport and timeline
//! - [`FrameLoop`] - Fixed per-frame update order ending in one render
//! - [`RenderSink`] - Render target seam between the loop and the GPU
//!
//! ## Usage
//!
//! ```no_run
//! use lumen::{app::App, config::AppConfig, scenes::CubeLab};
//!
//! fn main() -> anyhow::Result<()> {
//!     App::new(CubeLab::new(), AppConfig::default()).run()?;
//!     Ok(())
//! }
//! ```

pub mod frame_loop;
pub mod stage;

pub use frame_loop::{FrameLoop, RenderSink};
pub use stage::{Clock, Stage};

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    error::{LumenError, Result},
    gfx::{
        camera::{CameraUniform, PerspectiveCamera},
        rendering::render_engine::RenderEngine,
        scene::Scene,
    },
    scenes::Showcase,
    ui::{ControlPanel, UiManager},
};

/// Window-bound resources, created once the event loop resumes
struct Gpu {
    window: Arc<Window>,
    renderer: RenderEngine,
    ui: UiManager,
}

/// Draws the scene and then the panel overlay built earlier in the frame
struct FrameSink<'a> {
    renderer: &'a mut RenderEngine,
    ui: &'a mut UiManager,
}

impl RenderSink for FrameSink<'_> {
    fn render(
        &mut self,
        scene: &mut Scene,
        camera: &PerspectiveCamera,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let ui = &mut *self.ui;
        self.renderer.render_frame(
            scene,
            CameraUniform::from_camera(camera),
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui.render_display_only(device, queue, encoder, view)
                },
            ),
        )
    }
}

/// Runs a showcase in a window
pub struct App<W: Showcase> {
    config: AppConfig,
    world: W,
}

impl<W: Showcase> App<W> {
    pub fn new(world: W, config: AppConfig) -> Self {
        Self { config, world }
    }

    /// Opens the window and blocks until it closes
    ///
    /// Startup failures inside the loop (window, surface, adapter, device)
    /// end the loop and are returned here.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        log::info!("Starting '{}'", self.world.name());
        let mut state = AppState::new(self.world, self.config);
        event_loop.run_app(&mut state)?;

        match state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

struct AppState<W: Showcase> {
    config: AppConfig,
    stage: Stage<W>,
    panel: ControlPanel<Stage<W>>,
    frame_loop: FrameLoop,
    gpu: Option<Gpu>,
    error: Option<LumenError>,
}

impl<W: Showcase> AppState<W> {
    fn new(mut world: W, config: AppConfig) -> Self {
        world.scene_mut().background = config.clear_color;
        let panel = world.panel();
        Self {
            stage: Stage::new(world, &config),
            panel,
            frame_loop: FrameLoop::new(),
            gpu: None,
            error: None,
            config,
        }
    }

    fn create_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            size.width,
            size.height,
            &self.config,
        ))?;
        let ui = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );

        Ok(Gpu {
            window,
            renderer,
            ui,
        })
    }

    /// Applies a new window size to the stage and the surface
    fn resize(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let scale_factor = gpu.window.scale_factor();
        let logical = gpu.window.inner_size().to_logical::<f32>(scale_factor);
        if let Some((width, height)) =
            self.stage
                .resize(logical.width, logical.height, scale_factor as f32)
        {
            gpu.renderer.resize(width, height);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let panel = &mut self.panel;
        let stage = &mut self.stage;
        gpu.ui
            .update_logic(&gpu.window, |ui| panel.draw(ui, stage));

        let mut sink = FrameSink {
            renderer: &mut gpu.renderer,
            ui: &mut gpu.ui,
        };
        let result = self.frame_loop.tick(&mut self.stage, &mut sink);
        // Surface errors return before the overlay draws the UI
        gpu.ui.discard_frame();
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                gpu.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipping frame: {e}"),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match key_action(&event.logical_key) {
            Some(KeyAction::Exit) => event_loop.exit(),
            Some(KeyAction::TogglePanel) => self.panel.toggle_visibility(),
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Exit,
    TogglePanel,
}

/// Keys are matched by the character they type, not their position
fn key_action(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::Escape) => Some(KeyAction::Exit),
        Key::Character(c) if c.as_str() == "h" => Some(KeyAction::TogglePanel),
        _ => None,
    }
}

impl<W: Showcase> ApplicationHandler for AppState<W> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.create_gpu(event_loop) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.resize();
            }
            Err(e) => {
                log::error!("Startup failed: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // Handle UI input first
        let ui_event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        let ui_captured = gpu.ui.handle_input(&gpu.window, &ui_event);

        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::KeyboardInput { event: key, .. } => {
                self.stage.controls.process_key_event(key);
                if !ui_captured {
                    self.handle_key(event_loop, key);
                }
            }
            // Releases always reach the controls so a drag cannot get stuck
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            }
            | WindowEvent::Focused(false) => self.stage.controls.process_window_event(&event),
            WindowEvent::MouseInput { .. } | WindowEvent::MouseWheel { .. } if !ui_captured => {
                self.stage.controls.process_window_event(&event)
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        if gpu.ui.wants_mouse() {
            return;
        }

        let camera = self.stage.camera;
        self.stage
            .controls
            .process_device_event(&event, &camera, gpu.window.scale_factor());
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_ref() {
            gpu.window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_actions_follow_typed_character() {
        assert_eq!(key_action(&Key::Character("h".into())), Some(KeyAction::TogglePanel));
        assert_eq!(key_action(&Key::Named(NamedKey::Escape)), Some(KeyAction::Exit));
        // A Dvorak 'd' sits where QWERTY has 'h'
        assert_eq!(key_action(&Key::Character("d".into())), None);
        assert_eq!(key_action(&Key::Character("H".into())), None);
    }
}
