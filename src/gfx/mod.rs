//! # Graphics Module
//!
//! Everything needed to put a lit scene on screen.
//!
//! - **Camera System** ([`camera`]) - Perspective camera with damped orbit controls
//! - **Geometry** ([`geometry`]) - Procedural box, sphere, torus and plane
//! - **Scene Management** ([`scene`]) - Meshes, lights and materials
//! - **Lights** ([`lights`]) - Six light kinds with debug helpers
//! - **Resource Management** ([`resources`]) - Materials, global uniforms, depth buffer
//! - **Rendering Pipeline** ([`rendering`]) - Mesh, wireframe and helper passes
//!
//! ```no_run
//! use lumen::gfx::{color::Color, geometry::generate_sphere, resources::Material, scene::{Mesh, Scene}};
//!
//! let mut scene = Scene::new();
//! scene.add_material(Material::standard("standard").with_roughness(0.5));
//! let sphere = scene.create_geometry(generate_sphere(0.5, 32, 32));
//! scene.add_mesh(Mesh::new("sphere", sphere, "standard").at(-1.5, 0.0, 0.0));
//! ```

pub mod camera;
pub mod color;
pub mod geometry;
pub mod lights;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{OrbitControls, PerspectiveCamera};
pub use color::Color;
pub use rendering::render_engine::RenderEngine;
