use globe_core::constants::{EARTH_RINGS, EARTH_SEGMENTS};
use globe_core::mesh::{unit_quad, uv_sphere, MeshVertex};
use globe_core::scene::LineVertex;
use std::ops::Range;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
pub mod types;

use crate::constants::CLEAR_COLOR;
use helpers::{create_depth_view, create_rgba_texture, make_scene_pipeline, ScenePipelineDesc};
pub use types::{Globals, InstanceRaw};
use types::{INSTANCE_ATTRIBUTES, LINE_ATTRIBUTES, MESH_ATTRIBUTES};

/// A sampled texture together with the bind group the quad pipelines read it through.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    pub fn destroy(&self) {
        self.texture.destroy();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Quad,
    Sphere,
}

/// One instanced draw: a mesh, the texture it samples, and its slice of the
/// frame's instance buffer.
pub struct DrawBatch<'t> {
    pub mesh: MeshKind,
    pub texture: &'t GpuTexture,
    pub instances: Range<u32>,
}

pub struct FrameData<'t> {
    pub globals: Globals,
    pub lines: &'t [LineVertex],
    pub instances: &'t [InstanceRaw],
    pub batches: &'t [DrawBatch<'t>],
}

struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    fn new(device: &wgpu::Device, label: &str, vertices: &[MeshVertex], indices: &[u16]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,

    line_pipeline: wgpu::RenderPipeline,
    quad_pipeline: wgpu::RenderPipeline,
    earth_pipeline: wgpu::RenderPipeline,

    quad: Mesh,
    sphere: Mesh,

    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, earth_radius: f32) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(globe_core::GLOBE_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let line_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let textured_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pl"),
            bind_group_layouts: &[&globals_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });

        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRIBUTES,
        }];
        let textured_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &MESH_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRIBUTES,
            },
        ];

        let line_pipeline = make_scene_pipeline(
            &device,
            &ScenePipelineDesc {
                label: "line_pipeline",
                layout: &line_pl,
                shader: &shader,
                buffers: &line_buffers,
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                topology: wgpu::PrimitiveTopology::LineList,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
            format,
        );
        let quad_pipeline = make_scene_pipeline(
            &device,
            &ScenePipelineDesc {
                label: "quad_pipeline",
                layout: &textured_pl,
                shader: &shader,
                buffers: &textured_buffers,
                vs_entry: "vs_quad",
                fs_entry: "fs_quad",
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
            format,
        );
        let earth_pipeline = make_scene_pipeline(
            &device,
            &ScenePipelineDesc {
                label: "earth_pipeline",
                layout: &textured_pl,
                shader: &shader,
                buffers: &textured_buffers,
                vs_entry: "vs_quad",
                fs_entry: "fs_earth",
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: None,
                depth_write: true,
            },
            format,
        );

        let (quad_v, quad_i) = unit_quad();
        let quad = Mesh::new(&device, "quad_mesh", &quad_v, &quad_i);
        let (sphere_v, sphere_i) = uv_sphere(earth_radius, EARTH_SEGMENTS, EARTH_RINGS);
        let sphere = Mesh::new(&device, "earth_mesh", &sphere_v, &sphere_i);

        let (depth_tex, depth_view) = create_depth_view(&device, width, height);

        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            texture_bgl,
            linear_sampler,
            line_pipeline,
            quad_pipeline,
            earth_pipeline,
            quad,
            sphere,
            depth_tex,
            depth_view,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Upload tightly packed RGBA8 pixels as a texture the quad pipelines can sample.
    pub fn upload_rgba(&self, label: &str, width: u32, height: u32, rgba: &[u8]) -> GpuTexture {
        let texture = create_rgba_texture(&self.device, &self.queue, label, width, height, rgba);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.linear_sampler),
                },
            ],
        });
        GpuTexture {
            texture,
            bind_group,
            width,
            height,
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_tex.destroy();
            let (tex, view) = create_depth_view(&self.device, width, height);
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn render(&mut self, frame_data: &FrameData<'_>) -> Result<(), wgpu::SurfaceError> {
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&frame_data.globals));
        let line_buffer = (!frame_data.lines.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("lines"),
                contents: bytemuck::cast_slice(frame_data.lines),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        let instance_buffer = (!frame_data.instances.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("instances"),
                contents: bytemuck::cast_slice(frame_data.instances),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            // Opaque earth first so its depth hides the far side of everything else
            if let Some(instances) = &instance_buffer {
                rpass.set_pipeline(&self.earth_pipeline);
                rpass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
                rpass.set_index_buffer(self.sphere.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.set_vertex_buffer(1, instances.slice(..));
                for batch in frame_data.batches.iter().filter(|b| b.mesh == MeshKind::Sphere) {
                    rpass.set_bind_group(1, &batch.texture.bind_group, &[]);
                    rpass.draw_indexed(0..self.sphere.index_count, 0, batch.instances.clone());
                }
            }

            if let Some(lines) = &line_buffer {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, lines.slice(..));
                rpass.draw(0..frame_data.lines.len() as u32, 0..1);
            }

            if let Some(instances) = &instance_buffer {
                rpass.set_pipeline(&self.quad_pipeline);
                rpass.set_vertex_buffer(0, self.quad.vertex_buffer.slice(..));
                rpass.set_index_buffer(self.quad.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.set_vertex_buffer(1, instances.slice(..));
                for batch in frame_data.batches.iter().filter(|b| b.mesh == MeshKind::Quad) {
                    rpass.set_bind_group(1, &batch.texture.bind_group, &[]);
                    rpass.draw_indexed(0..self.quad.index_count, 0, batch.instances.clone());
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Free every buffer and texture the renderer owns. Textures handed out by
    /// [`GpuState::upload_rgba`] are released by their owners.
    pub fn destroy(&self) {
        self.quad.destroy();
        self.sphere.destroy();
        self.globals_buffer.destroy();
        self.depth_tex.destroy();
        log::info!("[gpu] resources destroyed");
    }
}
