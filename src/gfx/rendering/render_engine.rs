//! WGPU-based rendering engine
//!
//! Owns the surface, device and queue, the depth buffer and the three
//! pipelines the scenes need: filled meshes, wireframe meshes and light
//! helper lines. A UI overlay can be drawn after the scene pass.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::{
    config::AppConfig,
    error::{LumenError, Result},
    gfx::{
        camera::camera_utils::CameraUniform,
        lights::helper_lines,
        resources::{
            global_bindings::GlobalBindings,
            material::material_bind_group_layout,
            texture_resource::TextureResource,
        },
        scene::{object::DrawMesh, scene::Scene, vertex::LineVertex},
    },
    wgpu_utils::{
        binding_builder::{BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout};

const MESH_PIPELINE: &str = "Mesh";
const WIREFRAME_PIPELINE: &str = "MeshWireframe";
const HELPER_PIPELINE: &str = "Helper";

/// Growable vertex buffer for helper lines
struct LineBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    transform_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,
    line_buffer: Option<LineBuffer>,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    ///
    /// `width` and `height` are the initial surface size in physical pixels.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        settings: &AppConfig,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Shaders output linear color, so prefer an sRGB surface
        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(LumenError::NoSurfaceFormat)?;
        log::info!("Surface format: {format:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: settings.present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_bindings = GlobalBindings::new(&device);
        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(&device, "Transform Bind Group Layout");
        let material_layout = material_bind_group_layout(&device);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("mesh", include_str!("mesh.wgsl"));
        pipeline_manager.load_shader("helper", include_str!("helper.wgsl"));

        let mesh_layouts = vec![
            global_bindings.layout().clone(),
            transform_layout.layout.clone(),
            material_layout.layout.clone(),
        ];
        let base = PipelineConfig::default()
            .with_color_format(format)
            .with_depth_format(TextureResource::DEPTH_FORMAT);

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            base.clone()
                .with_label("MESH")
                .with_shader("mesh")
                .with_bind_group_layouts(mesh_layouts.clone()),
        );
        pipeline_manager.register_pipeline(
            WIREFRAME_PIPELINE,
            base.clone()
                .with_label("MESH WIREFRAME")
                .with_shader("mesh")
                .with_bind_group_layouts(mesh_layouts)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None),
        );
        pipeline_manager.register_pipeline(
            HELPER_PIPELINE,
            base.with_label("HELPER")
                .with_shader("helper")
                .with_bind_group_layouts(vec![global_bindings.layout().clone()])
                .with_vertex_layout(VertexLayout::Line)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None),
        );
        pipeline_manager
            .create_all_pipelines()
            .map_err(LumenError::Pipelines)?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_bindings,
            transform_layout,
            material_layout,
            line_buffer: None,
        })
    }

    /// Syncs scene state to the GPU: geometry, transforms, materials, lights, helpers
    fn prepare(&mut self, scene: &mut Scene, camera: CameraUniform) {
        for mesh in scene.meshes_mut() {
            mesh.prepare_gpu(&self.device, &self.queue, &self.transform_layout);
        }
        scene.material_manager.update_all_gpu_resources(
            &self.device,
            &self.queue,
            &self.material_layout,
        );
        self.global_bindings.update(
            &self.queue,
            camera,
            scene.lights().iter().map(|entry| &entry.light),
        );

        let lines: Vec<LineVertex> = scene
            .lights()
            .iter()
            .filter_map(|entry| {
                let helper = entry.helper.as_ref().filter(|helper| helper.visible)?;
                Some(helper_lines(&entry.light, helper))
            })
            .flatten()
            .collect();
        self.upload_lines(&lines);
    }

    fn upload_lines(&mut self, lines: &[LineVertex]) {
        if lines.is_empty() {
            if let Some(buffer) = self.line_buffer.as_mut() {
                buffer.len = 0;
            }
            return;
        }

        let fits = self
            .line_buffer
            .as_ref()
            .is_some_and(|buffer| buffer.capacity >= lines.len());
        if !fits {
            let capacity = lines.len().next_power_of_two();
            let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Helper Line Buffer"),
                size: (capacity * std::mem::size_of::<LineVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.line_buffer = Some(LineBuffer {
                buffer,
                capacity,
                len: 0,
            });
        }

        if let Some(line_buffer) = self.line_buffer.as_mut() {
            self.queue
                .write_buffer(&line_buffer.buffer, 0, bytemuck::cast_slice(lines));
            line_buffer.len = lines.len() as u32;
        }
    }

    /// Renders one frame and then lets `overlay` draw on top of it
    ///
    /// Surface errors are returned so the caller can reconfigure or quit.
    pub fn render_frame<F>(
        &mut self,
        scene: &mut Scene,
        camera: CameraUniform,
        overlay: Option<F>,
    ) -> std::result::Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        self.prepare(scene, camera);

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b] = scene.background.to_linear();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for mesh in scene.meshes().iter().filter(|mesh| mesh.visible) {
                let material = scene.material_manager.material_for(mesh.material_id());
                let pipeline_name = if material.wireframe {
                    WIREFRAME_PIPELINE
                } else {
                    MESH_PIPELINE
                };

                let (Some(pipeline), Some(transform), Some(material_group), Some(buffers)) = (
                    self.pipeline_manager.pipeline(pipeline_name),
                    mesh.transform_bind_group(),
                    material.bind_group(),
                    mesh.geometry().buffers(),
                ) else {
                    log::trace!("Skipping '{}': GPU resources not ready", mesh.name);
                    continue;
                };

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, transform, &[]);
                render_pass.set_bind_group(2, material_group, &[]);
                render_pass.draw_geometry(buffers, material.wireframe);
            }

            if let (Some(lines), Some(pipeline)) = (
                self.line_buffer.as_ref().filter(|lines| lines.len > 0),
                self.pipeline_manager.pipeline(HELPER_PIPELINE),
            ) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, lines.buffer.slice(..));
                render_pass.draw(0..lines.len, 0..1);
            }
        }

        if let Some(overlay) = overlay {
            overlay(
                &*self.device,
                &*self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Reconfigures the surface to a physical size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        log::info!("Surface resized to {width}x{height}");
    }

    /// Reapplies the current surface configuration, e.g. after the surface was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
