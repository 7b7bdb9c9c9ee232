//! Global uniform bindings for camera and light data
//!
//! Manages the GPU uniform buffer and bind group for per-frame state shared
//! by every draw call in a scene: camera matrices and the packed lights.

use crate::{
    gfx::{
        camera::camera_utils::CameraUniform,
        lights::{pack_lights, GpuLight, Light, MAX_LIGHTS},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub lights: [GpuLight; MAX_LIGHTS],
    /// light count, unused
    pub light_count: [u32; 4],
}
// Total: 64 + 16 + 8 * 80 + 16 = 736 bytes

impl GlobalUBOContent {
    pub fn new<'a>(camera: CameraUniform, lights: impl IntoIterator<Item = &'a Light>) -> Self {
        let (lights, count) = pack_lights(lights);
        Self {
            view_proj: camera.view_proj,
            view_position: camera.view_position,
            lights,
            light_count: [count, 0, 0, 0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Owns the global uniform buffer and its bind group
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
    ubo: GlobalUBO,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // camera + lights
            .create(device, "Globals Bind Group Layout");
        let ubo = GlobalUBO::new(device);
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
            ubo,
        }
    }

    /// Writes camera and light data for the coming frame
    pub fn update<'a>(
        &mut self,
        queue: &wgpu::Queue,
        camera: CameraUniform,
        lights: impl IntoIterator<Item = &'a Light>,
    ) {
        self.ubo
            .update_content(queue, GlobalUBOContent::new(camera, lights));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::color::Color;

    #[test]
    fn test_global_layout_size() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 736);
    }

    #[test]
    fn test_content_counts_lights() {
        let lights = [
            Light::ambient(Color::WHITE, 0.25),
            Light::point(Color::WHITE, 1.5),
        ];
        let content = GlobalUBOContent::new(CameraUniform::default(), &lights);
        assert_eq!(content.light_count[0], 2);
        assert_eq!(content.lights[1].color[3], 1.5);
    }
}
