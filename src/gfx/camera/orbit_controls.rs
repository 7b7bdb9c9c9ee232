//! Damped orbit controls
//!
//! Dragging orbits the camera around its target, the wheel dollies in and
//! out and shift+drag pans. Input only accumulates deltas; [`OrbitControls::update`]
//! applies a fraction of them each frame and decays the remainder, so motion
//! eases out after the pointer stops.

use cgmath::{InnerSpace, Vector3, Zero};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::perspective_camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Tuning for [`OrbitControls`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitOptions {
    /// Share of pending motion applied per update; 1.0 disables damping
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }
}

/// Y-up spherical coordinates of the camera relative to its target
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius < EPS {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

pub struct OrbitControls {
    pub options: OrbitOptions,
    pub enabled: bool,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vector3<f32>,
    scale: f32,
    viewport_height: f32,
    is_pointer_down: bool,
    is_shift_held: bool,
}

impl OrbitControls {
    pub fn new(options: OrbitOptions) -> Self {
        Self {
            options,
            enabled: true,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vector3::zero(),
            scale: 1.0,
            viewport_height: 1.0,
            is_pointer_down: false,
            is_shift_held: false,
        }
    }

    /// Logical height of the drawing area; drag distances are relative to it
    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    pub fn set_pointer_down(&mut self, down: bool) {
        self.is_pointer_down = down;
    }

    pub fn set_shift_held(&mut self, held: bool) {
        self.is_shift_held = held;
    }

    pub fn is_panning(&self) -> bool {
        self.is_pointer_down && self.is_shift_held
    }

    pub fn is_rotating(&self) -> bool {
        self.is_pointer_down && !self.is_shift_held
    }

    /// Pointer motion in logical pixels; only acts while the pointer is down
    pub fn pointer_moved(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32) {
        if !self.enabled || !self.is_pointer_down {
            return;
        }
        if self.is_shift_held {
            self.pan(camera, dx, dy);
        } else {
            let full_turn = std::f32::consts::TAU / self.viewport_height;
            self.pending_theta -= full_turn * dx * self.options.rotate_speed;
            self.pending_phi -= full_turn * dy * self.options.rotate_speed;
        }
    }

    /// Wheel notches; positive values move the camera closer
    pub fn wheel(&mut self, notches: f32) {
        if !self.enabled || notches == 0.0 {
            return;
        }
        let zoom_scale = 0.95f32.powf(self.options.zoom_speed * notches.abs());
        if notches > 0.0 {
            self.scale *= zoom_scale;
        } else {
            self.scale /= zoom_scale;
        }
    }

    fn pan(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32) {
        let offset = camera.position - camera.target;
        // World units covered by one logical pixel at the target's depth
        let target_distance = offset.magnitude() * (camera.fov.to_radians() * 0.5).tan();
        let units_per_pixel = 2.0 * target_distance / self.viewport_height * self.options.pan_speed;

        let forward = -offset.normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        self.pending_pan += right * (-dx * units_per_pixel) + up * (dy * units_per_pixel);
    }

    /// Applies pending motion to the camera. Returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let damping = self.options.damping_factor.clamp(EPS, 1.0);
        let previous_position = camera.position;
        let previous_target = camera.target;

        let mut spherical = Spherical::from_offset(camera.position - camera.target);
        spherical.theta += self.pending_theta * damping;
        spherical.phi = (spherical.phi + self.pending_phi * damping)
            .clamp(EPS, std::f32::consts::PI - EPS);
        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.options.min_distance, self.options.max_distance);

        camera.target += self.pending_pan * damping;
        camera.position = camera.target + spherical.to_offset();

        self.pending_theta *= 1.0 - damping;
        self.pending_phi *= 1.0 - damping;
        self.pending_pan *= 1.0 - damping;
        self.scale = 1.0;

        (camera.position - previous_position).magnitude2() > EPS
            || (camera.target - previous_target).magnitude2() > EPS
    }

    /// Tracks the pointer button and wheel
    pub fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => self.set_pointer_down(*state == ElementState::Pressed),
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 50.0,
                };
                self.wheel(notches);
            }
            WindowEvent::KeyboardInput { event, .. } => self.process_key_event(event),
            WindowEvent::Focused(false) => {
                self.is_pointer_down = false;
                self.is_shift_held = false;
            }
            _ => (),
        }
    }

    pub fn process_key_event(&mut self, event: &KeyEvent) {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
            state,
            ..
        } = event
        {
            self.set_shift_held(*state == ElementState::Pressed);
        }
    }

    /// Raw mouse motion drives rotation and panning
    pub fn process_device_event(
        &mut self,
        event: &DeviceEvent,
        camera: &PerspectiveCamera,
        scale_factor: f64,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let dx = (delta.0 / scale_factor) as f32;
            let dy = (delta.1 / scale_factor) as f32;
            self.pointer_moved(camera, dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 1.5, 0.1, 100.0).at(1.0, 1.0, 2.0);
        camera.look_at(Vector3::new(0.0, 0.0, 0.0));
        camera
    }

    fn settle(controls: &mut OrbitControls, camera: &mut PerspectiveCamera) {
        for _ in 0..2000 {
            controls.update(camera);
        }
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vector3::new(1.0, 1.0, 2.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).magnitude() < 1e-5);
    }

    #[test]
    fn test_idle_update_does_not_move() {
        let mut controls = OrbitControls::new(OrbitOptions::default());
        let mut camera = camera();
        assert!(!controls.update(&mut camera));
        // Motion without a pressed pointer is ignored
        controls.pointer_moved(&camera, 100.0, 0.0);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_damped_rotation_converges_to_full_delta() {
        let mut controls = OrbitControls::new(OrbitOptions::default());
        controls.set_viewport_height(800.0);
        let mut camera = camera();
        let start = Spherical::from_offset(camera.position - camera.target);

        controls.set_pointer_down(true);
        controls.pointer_moved(&camera, 100.0, 0.0);
        controls.set_pointer_down(false);

        // First update applies only a fraction
        assert!(controls.update(&mut camera));
        let first = Spherical::from_offset(camera.position - camera.target);
        let expected = -std::f32::consts::TAU * 100.0 / 800.0;
        assert!((first.theta - start.theta - expected * 0.05).abs() < 1e-4);

        settle(&mut controls, &mut camera);
        let end = Spherical::from_offset(camera.position - camera.target);
        assert!((end.theta - start.theta - expected).abs() < 1e-3);
        assert!((end.radius - start.radius).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut controls = OrbitControls::new(OrbitOptions {
            damping_factor: 1.0,
            ..Default::default()
        });
        let mut camera = camera();
        controls.set_pointer_down(true);
        // Dragging down far enough reaches the pole above the target
        controls.pointer_moved(&camera, 0.0, 10_000.0);
        controls.update(&mut camera);
        assert!(camera.position.y > 0.0);
        assert!(camera.position.x.abs() < 1e-3 && camera.position.z.abs() < 1e-3);
    }

    #[test]
    fn test_wheel_zooms_within_bounds() {
        let mut controls = OrbitControls::new(OrbitOptions {
            min_distance: 1.0,
            ..Default::default()
        });
        let mut camera = camera();
        let start = camera.position.magnitude();
        controls.wheel(1.0);
        controls.update(&mut camera);
        assert!((camera.position.magnitude() - start * 0.95).abs() < 1e-4);

        for _ in 0..200 {
            controls.wheel(5.0);
            controls.update(&mut camera);
        }
        assert!((camera.position.magnitude() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_shift_drag_pans_target() {
        let mut controls = OrbitControls::new(OrbitOptions::default());
        controls.set_viewport_height(800.0);
        let mut camera = camera();
        let offset = camera.position - camera.target;

        controls.set_shift_held(true);
        controls.set_pointer_down(true);
        assert!(controls.is_panning());
        controls.pointer_moved(&camera, 50.0, 0.0);
        settle(&mut controls, &mut camera);

        assert!(camera.target.magnitude() > 0.01);
        // Panning keeps the viewing offset
        assert!((camera.position - camera.target - offset).magnitude() < 1e-3);
    }
}
