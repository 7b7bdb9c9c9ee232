//! # Lumen Prelude
//!
//! Commonly used types for building and running showcases.
//!
//! ```no_run
//! use lumen::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     App::new(LightsLab::new(), AppConfig::default().with_title("Lights")).run()?;
//!     Ok(())
//! }
//! ```

// Application
pub use crate::app::{App, FrameLoop, RenderSink, Stage};
pub use crate::config::AppConfig;
pub use crate::error::{LumenError, Result};

// Scene building
pub use crate::gfx::camera::{OrbitControls, OrbitOptions, PerspectiveCamera};
pub use crate::gfx::color::Color;
pub use crate::gfx::geometry::{
    generate_box, generate_plane, generate_sphere, generate_torus, GeometryData,
};
pub use crate::gfx::lights::{Light, LightHelper};
pub use crate::gfx::resources::Material;
pub use crate::gfx::scene::{LightHandle, Mesh, MeshHandle, Scene};

// Animation and panel
pub use crate::animation::{Ease, Overwrite, Property, Timeline, TweenVars};
pub use crate::ui::{ControlInput, ControlPanel, ControlValue, PanelConfig};

// Showcases
pub use crate::scenes::{CubeLab, LightsLab, Showcase};

pub use cgmath::Vector3;
