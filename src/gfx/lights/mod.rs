//! # Lights
//!
//! Typed light sources, their debug helpers, the attenuation math used by the
//! mesh shader and the packing of lights into the global uniform.

pub mod falloff;
pub mod helpers;
pub mod light;
pub mod packing;

pub use helpers::{helper_lines, LightHelper};
pub use light::{
    DirectionalLight, HemisphereLight, Light, LightKind, PointLight, RectAreaLight, SpotLight,
};
pub use packing::{pack_lights, GpuLight, MAX_LIGHTS};
