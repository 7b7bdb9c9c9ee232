//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive shapes the scenes
//! are assembled from, so no external model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Box**: width/height/depth with independent segment counts per axis
//! - **Sphere**: UV sphere with configurable resolution
//! - **Torus**: ring with configurable radial and tubular segments
//! - **Plane**: flat plane in the XY plane facing +Z
//!
//! ## Usage
//!
//! ```rust
//! use lumen::gfx::geometry::{generate_box, generate_sphere, wireframe_indices};
//!
//! // A unit cube with two segments along every axis
//! let cube = generate_box(1.0, 1.0, 1.0, 2, 2, 2);
//!
//! // A sphere of radius 0.5 with 32 segments each way
//! let sphere = generate_sphere(0.5, 32, 32);
//!
//! // Edge list used when a material is drawn in wireframe mode
//! let edges = wireframe_indices(&cube.indices);
//! assert_eq!(edges.len() % 2, 0);
//! ```

pub mod primitives;
pub mod wireframe;

pub use primitives::*;
pub use wireframe::wireframe_indices;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<crate::gfx::scene::vertex::Vertex3D> {
        use crate::gfx::scene::vertex::Vertex3D;

        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
