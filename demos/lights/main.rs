//! # Lights Example
//!
//! Six light types over a sphere, a cube, a torus and a floor.
//!
//! ## Usage:
//! ```bash
//! cargo run --example lights
//! ```
//!
//! ## What you'll see:
//! - Slowly tumbling objects lit by ambient, directional, hemisphere, point,
//!   rect-area and spot lights
//! - Per-light intensity and shape sliders; "show helper" draws each light's gizmo
//!
//! Press `h` to hide the panel and `Escape` to quit.

use lumen::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default().with_title("Lights");
    App::new(LightsLab::new(), config).run()?;
    Ok(())
}
