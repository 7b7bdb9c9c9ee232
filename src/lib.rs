// src/lib.rs
//! Lumen
//!
//! Interactive wgpu scenes with a live debug control panel, property tweens
//! and a full set of light types, built on wgpu, winit and Dear ImGui.

pub mod animation;
pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod scenes;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::App;
pub use config::AppConfig;
pub use error::{LumenError, Result};
