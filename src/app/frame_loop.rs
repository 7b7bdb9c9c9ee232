//! Per-frame update order

use crate::{
    gfx::{camera::PerspectiveCamera, scene::Scene},
    scenes::Showcase,
};

use super::stage::Stage;

/// Something that can draw a scene from a camera
///
/// Implemented by the GPU renderer in the app and by recorders in tests.
pub trait RenderSink {
    fn render(
        &mut self,
        scene: &mut Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), wgpu::SurfaceError>;
}

/// Drives one [`Stage`] frame by frame
#[derive(Debug, Default)]
pub struct FrameLoop {
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame
    ///
    /// Advances the clock and the timeline, runs the showcase update, applies
    /// orbit damping and finally renders exactly once. Panel edits for the
    /// frame must be applied before calling this.
    pub fn tick<W: Showcase>(
        &mut self,
        stage: &mut Stage<W>,
        sink: &mut impl RenderSink,
    ) -> Result<(), wgpu::SurfaceError> {
        let delta = stage.clock.tick();
        stage.timeline.advance(&mut stage.world, delta);
        stage.world.update(stage.clock.elapsed());
        stage.controls.update(&mut stage.camera);

        self.frames += 1;
        sink.render(stage.world.scene_mut(), &stage.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::{Property, TweenVars},
        app::stage::Clock,
        config::AppConfig,
        gfx::{
            color::Color,
            geometry::generate_box,
            resources::Material,
            scene::{Mesh, MeshHandle},
        },
        ui::{ControlPanel, PanelConfig},
    };
    use cgmath::Vector3;
    use std::f32::consts::TAU;

    struct Turntable {
        scene: Scene,
        cube: MeshHandle,
        updates: u32,
    }

    impl Turntable {
        fn new() -> Self {
            let mut scene = Scene::new();
            scene.add_material(Material::basic("basic", Color::WHITE));
            let geometry = scene.create_geometry(generate_box(1.0, 1.0, 1.0, 1, 1, 1));
            let cube = scene.add_mesh(Mesh::new("cube", geometry, "basic"));
            Self {
                scene,
                cube,
                updates: 0,
            }
        }
    }

    impl Showcase for Turntable {
        fn name(&self) -> &str {
            "turntable"
        }

        fn scene(&self) -> &Scene {
            &self.scene
        }

        fn scene_mut(&mut self) -> &mut Scene {
            &mut self.scene
        }

        fn panel(&self) -> ControlPanel<Stage<Self>> {
            ControlPanel::new(PanelConfig::default())
        }

        fn update(&mut self, elapsed: f32) {
            self.updates += 1;
            self.scene[self.cube].transform.position.x = elapsed;
        }
    }

    /// What the renderer saw on each frame
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vector3<f32>, f32, f32)>,
    }

    impl RenderSink for Recorder {
        fn render(
            &mut self,
            scene: &mut Scene,
            camera: &PerspectiveCamera,
        ) -> Result<(), wgpu::SurfaceError> {
            let cube = &scene.meshes()[0].transform;
            self.frames
                .push((camera.position, cube.rotation.y, cube.position.x));
            Ok(())
        }
    }

    fn stage() -> Stage<Turntable> {
        let mut stage = Stage::new(Turntable::new(), &AppConfig::default());
        stage.clock = Clock::fixed(0.1);
        stage
    }

    #[test]
    fn test_controls_update_before_every_render() {
        let mut stage = stage();
        let mut frame_loop = FrameLoop::new();
        let mut recorder = Recorder::default();

        stage.controls.set_pointer_down(true);
        stage.controls.pointer_moved(&stage.camera.clone(), 120.0, 0.0);
        stage.controls.set_pointer_down(false);

        for _ in 0..30 {
            let before = stage.camera.position;
            frame_loop.tick(&mut stage, &mut recorder).unwrap();
            let (rendered, _, _) = recorder.frames[recorder.frames.len() - 1];
            // The frame shows the camera after this frame's damping step
            assert_eq!(rendered, stage.camera.position);
            assert_ne!(rendered, before);
        }
        assert_eq!(frame_loop.frames(), 30);
        assert_eq!(recorder.frames.len(), 30);
    }

    #[test]
    fn test_tweens_and_update_run_before_render() {
        let mut stage = stage();
        let mut frame_loop = FrameLoop::new();
        let mut recorder = Recorder::default();
        let cube = stage.world.cube;
        stage.timeline.to(
            &stage.world,
            Property::new(
                "cube.rotation.y",
                move |w: &Turntable| w.scene[cube].transform.rotation.y,
                move |w: &mut Turntable, v| w.scene[cube].transform.rotation.y = v,
            ),
            TweenVars::by(TAU).duration(1.0),
        );

        for _ in 0..15 {
            frame_loop.tick(&mut stage, &mut recorder).unwrap();
        }
        let (_, first_rotation, first_x) = recorder.frames[0];
        assert!(first_rotation > 0.0);
        assert!((first_x - 0.1).abs() < 1e-6);
        let (_, last_rotation, _) = recorder.frames[14];
        assert_eq!(last_rotation, TAU);
        assert_eq!(stage.world.updates, 15);
    }
}
