// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles materials, global uniforms and depth textures for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBOContent};
pub use material::{Material, MaterialId, MaterialManager, Shading};
pub use texture_resource::TextureResource;
