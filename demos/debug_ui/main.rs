//! # Debug UI Example
//!
//! A wireframe cube bound to a control panel.
//!
//! ## Usage:
//! ```bash
//! cargo run --example debug_ui
//! ```
//!
//! ## What you'll see:
//! - A yellow wireframe cube you can orbit with the mouse (shift+drag pans)
//! - The "Mess around with The Cube" panel: move, recolor and resubdivide it
//! - Buttons that spin, jump and barrel-roll the cube
//!
//! Press `h` to hide the panel and `Escape` to quit.

use lumen::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default().with_title("Debug UI");
    App::new(CubeLab::new(), config).run()?;
    Ok(())
}
