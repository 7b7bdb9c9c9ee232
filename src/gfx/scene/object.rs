use cgmath::{Matrix, Matrix4, Rad, SquareMatrix, Vector3, Zero};

use crate::{
    gfx::resources::material::MaterialId,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc},
        uniform_buffer::UniformBuffer,
    },
};

use super::geometry::{Geometry, GeometryBuffers};

/// Position, Euler rotation (radians, XYZ order) and scale of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Model matrix: translation * rotation(X * Y * Z) * scale
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

/// Per-mesh uniform data (group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl From<&Transform> for TransformUniform {
    fn from(transform: &Transform) -> Self {
        let model = transform.matrix();
        // Inverse transpose keeps normals perpendicular under non-uniform scale
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: model.into(),
            normal: normal.into(),
        }
    }
}

// GPU resources struct holding the transform uniform buffer and its bind group
pub struct MeshGpuResources {
    pub transform_buffer: UniformBuffer<TransformUniform>,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A geometry drawn with a material at a transform
pub struct Mesh {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    material: MaterialId,
    geometry: Geometry,
    gpu_resources: Option<MeshGpuResources>, // None until prepare_gpu called
}

impl Mesh {
    pub fn new(name: &str, geometry: Geometry, material: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            visible: true,
            material: material.to_string(),
            geometry,
            gpu_resources: None,
        }
    }

    /// Builder-style position setter
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    /// Builder-style rotation setter (radians)
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material_id(&self) -> &str {
        &self.material
    }

    /// Replaces the geometry, releasing the previous one first
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry.dispose();
        self.geometry = geometry;
    }

    /// Uploads geometry and writes the current transform to the GPU
    ///
    /// Creates buffers on first use; subsequent calls only rewrite the
    /// transform uniform when it changed.
    pub fn prepare_gpu(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        transform_layout: &BindGroupLayoutWithDesc,
    ) {
        self.geometry.upload(device);

        let uniform = TransformUniform::from(&self.transform);
        match &mut self.gpu_resources {
            Some(resources) => resources.transform_buffer.update_content(queue, uniform),
            None => {
                let transform_buffer = UniformBuffer::new_with_data(device, &uniform);
                let transform_bind_group = BindGroupBuilder::new(transform_layout)
                    .resource(transform_buffer.binding_resource())
                    .create(device, "Transform Bind Group");
                self.gpu_resources = Some(MeshGpuResources {
                    transform_buffer,
                    transform_bind_group,
                });
            }
        }
    }

    /// Get the transform bind group for rendering
    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }
}

pub trait DrawMesh {
    fn draw_geometry(&mut self, buffers: &GeometryBuffers, wireframe: bool);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_geometry(&mut self, buffers: &GeometryBuffers, wireframe: bool) {
        self.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        if wireframe {
            self.set_index_buffer(
                buffers.wireframe_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            self.draw_indexed(0..buffers.wireframe_count, 0, 0..1);
        } else {
            self.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            self.draw_indexed(0..buffers.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::generate_box,
        scene::geometry::ResourceLedger,
    };
    use cgmath::{Vector4, InnerSpace};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_matrix_order() {
        let transform = Transform {
            position: Vector3::new(0.0, -0.65, 0.0),
            rotation: Vector3::new(-FRAC_PI_2, 0.0, 0.0),
            ..Default::default()
        };
        // A +Z normal rotated -90 degrees around X points up
        let n = transform.matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((n.truncate() - Vector3::unit_y()).magnitude() < 1e-5);
        let p = transform.matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.y + 0.65).abs() < 1e-6);
    }

    #[test]
    fn test_set_geometry_releases_previous_first() {
        let ledger = ResourceLedger::new();
        let mut mesh = Mesh::new(
            "cube",
            Geometry::new(generate_box(1.0, 1.0, 1.0, 2, 2, 2), &ledger),
            "basic",
        );
        mesh.set_geometry(Geometry::new(
            generate_box(1.0, 1.0, 1.0, 3, 3, 3),
            &ledger,
        ));
        assert_eq!(ledger.live(), 1);
        assert_eq!(mesh.geometry().data().vertex_count(), 6 * 16);
        assert!(!mesh.geometry().is_disposed());
    }
}
