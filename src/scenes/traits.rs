//! Core showcase trait
//!
//! Defines what a scene must provide to be driven by [`App`](crate::app::App):
//! the scene graph it renders, the control panel bound to it and an optional
//! per-frame update.

use cgmath::Vector3;

use crate::{
    app::Stage,
    gfx::{camera::PerspectiveCamera, scene::Scene},
    ui::ControlPanel,
};

/// A self-contained scene with its debug controls
pub trait Showcase: Sized + 'static {
    /// Name for logs and the window title
    fn name(&self) -> &str;

    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;

    /// Builds the panel editing this showcase
    ///
    /// Controls receive the whole [`Stage`] so triggers can start tweens on
    /// its timeline.
    fn panel(&self) -> ControlPanel<Stage<Self>>;

    /// Called once per frame before the controls update
    ///
    /// # Arguments
    /// * `elapsed` - Seconds since the loop started
    fn update(&mut self, _elapsed: f32) {}

    /// Camera the showcase starts with
    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, aspect, 0.1, 100.0).at(1.0, 1.0, 2.0);
        camera.look_at(Vector3::new(0.0, 0.0, 0.0));
        camera
    }
}
