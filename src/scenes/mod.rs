//! # Showcases
//!
//! The two runnable scenes and the trait the app drives them through.
//!
//! - [`CubeLab`] - One cube bound to the panel, with tween triggers
//! - [`LightsLab`] - Every light type over four meshes

pub mod debug_ui;
pub mod lights;
pub mod traits;

pub use debug_ui::{CubeLab, DebugObject};
pub use lights::LightsLab;
pub use traits::Showcase;
