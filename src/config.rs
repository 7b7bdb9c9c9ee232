//! Application configuration
//!
//! Everything is set in code through builders; there is no config file.

use crate::gfx::{camera::OrbitOptions, color::Color};

/// Window and renderer settings for an app
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Logical window size
    pub width: u32,
    pub height: u32,
    /// Upper bound on the device pixel ratio used for rendering
    pub max_pixel_ratio: f32,
    pub clear_color: Color,
    pub present_mode: wgpu::PresentMode,
    pub orbit: OrbitOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            width: 1200,
            height: 800,
            max_pixel_ratio: 2.0,
            clear_color: Color::BLACK,
            present_mode: wgpu::PresentMode::AutoVsync,
            orbit: OrbitOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_pixel_ratio(mut self, ratio: f32) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_present_mode(mut self, mode: wgpu::PresentMode) -> Self {
        self.present_mode = mode;
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitOptions) -> Self {
        self.orbit = orbit;
        self
    }
}
