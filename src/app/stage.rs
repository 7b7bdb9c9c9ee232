//! Per-showcase state shared by the panel, the loop and the renderer

use std::time::Instant;

use crate::{
    animation::Timeline,
    config::AppConfig,
    gfx::camera::{OrbitControls, PerspectiveCamera, Viewport},
    scenes::Showcase,
};

/// Monotonic frame clock
///
/// A fixed clock advances by the same step every tick regardless of wall
/// time.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Unset until the first tick
    last: Option<Instant>,
    elapsed: f32,
    fixed_step: Option<f32>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last: None,
            elapsed: 0.0,
            fixed_step: None,
        }
    }

    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step.max(0.0)),
            ..Self::new()
        }
    }

    /// Advances the clock and returns the seconds since the previous tick
    ///
    /// The clock starts on its first tick, which returns zero.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = match (self.fixed_step, self.last) {
            (Some(step), _) => step,
            (None, Some(last)) => now.duration_since(last).as_secs_f32(),
            (None, None) => 0.0,
        };
        self.last = Some(now);
        self.elapsed += delta;
        delta
    }

    /// Seconds accumulated over all ticks
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Everything one showcase needs at runtime
///
/// Panel controls receive `&mut Stage<W>`, so they can edit the world and
/// start tweens on the timeline in the same call.
pub struct Stage<W> {
    pub world: W,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub timeline: Timeline<W>,
    pub clock: Clock,
    max_pixel_ratio: f32,
}

impl<W: Showcase> Stage<W> {
    /// Builds the stage for `world` at the configured window size
    pub fn new(world: W, config: &AppConfig) -> Self {
        let viewport = Viewport::new(config.width as f32, config.height as f32, 1.0);
        let camera = world.camera(viewport.aspect());
        let mut controls = OrbitControls::new(config.orbit);
        controls.set_viewport_height(viewport.height);
        Self {
            world,
            camera,
            controls,
            viewport,
            timeline: Timeline::new(),
            clock: Clock::new(),
            max_pixel_ratio: config.max_pixel_ratio,
        }
    }
}

impl<W> Stage<W> {
    /// Reacts to a new logical window size
    ///
    /// Updates the viewport, the camera aspect and projection, and returns
    /// the physical surface size to render at. Zero-sized windows are
    /// ignored and yield `None`.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Option<(u32, u32)> {
        if width <= 0.0 || height <= 0.0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return None;
        }

        let pixel_ratio = device_pixel_ratio.min(self.max_pixel_ratio);
        self.viewport = Viewport::new(width, height, pixel_ratio);
        self.camera.aspect = width / height;
        self.camera.update_projection_matrix();
        self.controls.set_viewport_height(height);

        let physical = self.viewport.physical_size();
        log::info!(
            "Resized to {width}x{height} at pixel ratio {pixel_ratio} ({}x{} px)",
            physical.0,
            physical.1
        );
        Some(physical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gfx::scene::Scene, ui::ControlPanel, ui::PanelConfig};
    use std::time::Duration;

    struct Empty(Scene);

    impl Showcase for Empty {
        fn name(&self) -> &str {
            "empty"
        }

        fn scene(&self) -> &Scene {
            &self.0
        }

        fn scene_mut(&mut self) -> &mut Scene {
            &mut self.0
        }

        fn panel(&self) -> ControlPanel<Stage<Self>> {
            ControlPanel::new(PanelConfig::default())
        }
    }

    fn stage() -> Stage<Empty> {
        Stage::new(Empty(Scene::new()), &AppConfig::default())
    }

    #[test]
    fn test_initial_camera() {
        let stage = stage();
        assert_eq!(stage.camera.aspect, 1.5);
        assert_eq!(stage.camera.fov, 75.0);
        assert_eq!(stage.camera.position, cgmath::Vector3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_resize_sets_aspect_and_pixel_ratio() {
        let mut stage = stage();
        for (width, height, dpr) in [
            (800.0, 600.0, 1.0),
            (1920.0, 1080.0, 1.5),
            (333.0, 777.0, 3.0),
            (1.0, 1000.0, 2.0),
        ] {
            let physical = stage.resize(width, height, dpr);
            assert_eq!(stage.camera.aspect, width / height);
            assert_eq!(stage.viewport.pixel_ratio, f32::min(dpr, 2.0));
            let ratio = stage.viewport.pixel_ratio;
            assert_eq!(
                physical,
                Some(((width * ratio).round() as u32, (height * ratio).round() as u32))
            );
        }
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut stage = stage();
        stage.resize(640.0, 480.0, 1.0);
        assert_eq!(stage.resize(0.0, 480.0, 1.0), None);
        assert_eq!(stage.resize(640.0, 0.0, 1.0), None);
        assert_eq!(stage.viewport, Viewport::new(640.0, 480.0, 1.0));
    }

    #[test]
    fn test_clock_starts_on_first_tick() {
        let created = Instant::now();
        let mut clock = Clock::new();
        // Startup time before the first frame is not counted
        let first = created + Duration::from_secs(5);
        assert_eq!(clock.tick_at(first), 0.0);
        let delta = clock.tick_at(first + Duration::from_millis(500));
        assert!((delta - 0.5).abs() < 1e-6);
        assert!((clock.elapsed() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = Clock::fixed(0.25);
        assert_eq!(clock.tick(), 0.25);
        clock.tick();
        assert_eq!(clock.elapsed(), 0.5);
    }
}
