//! # Scene Management Module
//!
//! This module provides the scene container and the objects it holds: meshes
//! with their transforms, geometry resources and vertex formats.
//!
//! ## Key Components
//!
//! - [`Scene`] - Insertion-only container of meshes, lights and materials
//! - [`Mesh`] - Geometry drawn with a material at a [`Transform`]
//! - [`Geometry`] - Shape data with lazily uploaded GPU buffers
//! - [`ResourceLedger`] - Live geometry accounting
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex formats
//!
//! ## Usage
//!
//! ```no_run
//! use lumen::gfx::{geometry::generate_box, color::Color, resources::material::Material};
//! use lumen::gfx::scene::{Mesh, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_material(Material::basic("basic", Color::from_hex(0xffff00)));
//! let geometry = scene.create_geometry(generate_box(1.0, 1.0, 1.0, 2, 2, 2));
//! let cube = scene.add_mesh(Mesh::new("cube", geometry, "basic"));
//! scene[cube].transform.position.y = 0.5;
//! ```

pub mod geometry;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use geometry::{Geometry, ResourceLedger};
pub use object::{DrawMesh, Mesh, Transform};
pub use scene::{LightHandle, MeshHandle, Scene, SceneLight, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
