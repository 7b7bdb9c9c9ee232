//! Material system
//!
//! Provides material definitions and centralized management with GPU resource handling.
//! Materials are stored in MaterialManager and meshes reference them by ID, so
//! several meshes can share one material and see each other's edits.

use std::collections::{hash_map::Entry, HashMap};
use wgpu::Device;

use crate::{
    gfx::color::Color,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// How a material responds to light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Flat color, ignores lights
    Basic,
    /// Diffuse + specular response driven by roughness and metalness
    Standard,
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    /// roughness, metalness, unlit flag, unused
    pub params: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Creates the bind group layout shared by every material (group 2)
pub fn material_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_fragment(binding_types::uniform())
        .create(device, "Material Bind Group Layout")
}

struct MaterialGpuResources {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Material definition
///
/// Contains surface properties and GPU resources shared by all meshes that
/// reference this material.
pub struct Material {
    pub name: String,
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub wireframe: bool,
    pub shading: Shading,

    // GPU resources - shared by all meshes using this material
    gpu: Option<MaterialGpuResources>,
}

impl Default for Material {
    fn default() -> Self {
        Self::standard("default")
    }
}

impl Material {
    /// Unlit material drawn in a flat color
    pub fn basic(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
            roughness: 1.0,
            metalness: 0.0,
            wireframe: false,
            shading: Shading::Basic,
            gpu: None,
        }
    }

    /// Lit material, white, roughness 1 and metalness 0
    pub fn standard(name: &str) -> Self {
        Self {
            shading: Shading::Standard,
            ..Self::basic(name, Color::WHITE)
        }
    }

    /// Builder pattern: Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metalness factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Draw edges only
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    /// Snapshot of the values the shader reads
    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b] = self.color.to_linear();
        let unlit = match self.shading {
            Shading::Basic => 1.0,
            Shading::Standard => 0.0,
        };
        MaterialUniform {
            color: [r, g, b, 1.0],
            params: [self.roughness, self.metalness, unlit, 0.0],
        }
    }

    /// Creates GPU resources on first use and syncs current properties
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        let uniform = self.uniform();
        match &mut self.gpu {
            Some(gpu) => gpu.ubo.update_content(queue, uniform),
            None => {
                let ubo = MaterialUBO::new_with_data(device, &uniform);
                let bind_group = BindGroupBuilder::new(layout)
                    .resource(ubo.binding_resource())
                    .create(device, "Material Bind Group");
                self.gpu = Some(MaterialGpuResources { ubo, bind_group });
            }
        }
    }

    /// Gets the bind group for rendering
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials of a scene
///
/// Lookups of unknown IDs fall back to a default standard material.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds (or replaces) a material and returns it for further tweaking
    pub fn add_material(&mut self, material: Material) -> &mut Material {
        match self.materials.entry(material.name.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(material);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(material),
        }
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Gets the material used to draw a mesh, falling back to the default
    pub fn material_for(&self, id: &str) -> &Material {
        self.materials.get(id).unwrap_or(&self.default_material)
    }

    /// Number of user-added materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Syncs GPU resources for all materials, including the fallback
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, layout);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_encodes_shading() {
        let basic = Material::basic("cube", Color::from_hex(0xffff00)).with_wireframe(true);
        let uniform = basic.uniform();
        assert_eq!(uniform.params[2], 1.0);
        assert_eq!(uniform.color, [1.0, 1.0, 0.0, 1.0]);

        let standard = Material::standard("standard")
            .with_roughness(0.5)
            .with_metalness(0.2);
        assert_eq!(standard.uniform().params, [0.5, 0.2, 0.0, 0.0]);
    }

    #[test]
    fn test_manager_fallback_and_replace() {
        let mut manager = MaterialManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.material_for("missing").name, "default");

        manager.add_material(Material::basic("cube", Color::WHITE));
        manager.add_material(Material::basic("cube", Color::BLACK)).wireframe = true;
        assert_eq!(manager.len(), 1);
        let cube = manager.material_for("cube");
        assert_eq!(cube.color, Color::BLACK);
        assert!(cube.wireframe);
    }
}
