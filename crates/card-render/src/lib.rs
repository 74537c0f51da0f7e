//! wgpu renderer for the hanging card scene.
//!
//! Three passes per frame: a depth-only shadow pass from the directional
//! light, the lit mesh pass (card, anchor, ground) sampling that shadow map,
//! and an unlit line pass for the rope and the optional physics wireframe.

use card_core::scene::MeshNode;
use card_core::{Camera, Scene};
use wgpu::util::DeviceExt;

mod helpers;
pub mod lines;
pub mod mesh;
mod targets;
pub mod uniforms;

use lines::{build_line_vertices, LineVertex};
use mesh::MeshVertex;
use targets::RenderTargets;
use uniforms::{Globals, ObjectUniforms};

pub const SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub const SHADOW_WGSL: &str = include_str!("../shaders/shadow.wgsl");
pub const LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

const INITIAL_LINE_CAPACITY: usize = 256;

// card, anchor, ground
const OBJECT_COUNT: usize = 3;

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct Renderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    globals_buffer: wgpu::Buffer,
    // globals + shadow map, for the lit pass
    lit_bind_group: wgpu::BindGroup,
    // globals only, for the shadow and line passes
    plain_bind_group: wgpu::BindGroup,
    objects: Vec<ObjectSlot>,

    mesh_vb: wgpu::Buffer,
    mesh_ib: wgpu::Buffer,
    mesh_index_count: u32,
    lit_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,

    line_pipeline: wgpu::RenderPipeline,
    line_vb: wgpu::Buffer,
    line_capacity: usize,
    line_scratch: Vec<LineVertex>,

    width: u32,
    height: u32,
}

impl<'w> Renderer<'w> {
    /// Create a renderer drawing into `target` (a canvas on the web, a window
    /// natively) whose backing size is `width` x `height` pixels.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits so older WebGPU implementations accept the request
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
        log::info!("[render] surface {}x{} {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);

        // Bind group layouts
        let plain_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("plain_bgl"),
            entries: &[helpers::uniform_entry(0)],
        });
        let lit_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lit_bgl"),
            entries: &[
                helpers::uniform_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_entry(0)],
        });

        // Uniforms and bind groups
        let globals_buffer = helpers::uniform_buffer::<Globals>(&device, "globals");
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let lit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lit_bg"),
            layout: &lit_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let plain_bind_group =
            helpers::single_buffer_bind_group(&device, "plain_bg", &plain_bgl, &globals_buffer);
        let objects = (0..OBJECT_COUNT)
            .map(|i| {
                let buffer = helpers::uniform_buffer::<ObjectUniforms>(&device, "object");
                let bind_group = helpers::single_buffer_bind_group(
                    &device,
                    &format!("object_bg_{i}"),
                    &object_bgl,
                    &buffer,
                );
                ObjectSlot { buffer, bind_group }
            })
            .collect();

        // Geometry
        let (box_vertices, box_indices) = mesh::unit_box();
        let mesh_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("box_vb"),
            contents: bytemuck::cast_slice(&box_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let mesh_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("box_ib"),
            contents: bytemuck::cast_slice(&box_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let line_vb = create_line_buffer(&device, INITIAL_LINE_CAPACITY);

        // Pipelines
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(SHADOW_WGSL.into()),
        });
        let lines_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(LINES_WGSL.into()),
        });

        let lit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lit_layout"),
            bind_group_layouts: &[&lit_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let shadow_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_layout"),
            bind_group_layouts: &[&plain_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let line_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_layout"),
            bind_group_layouts: &[&plain_bgl],
            push_constant_ranges: &[],
        });

        let lit_pipeline = helpers::make_pipeline(
            &device,
            "lit_pipeline",
            &scene_shader,
            &lit_layout,
            MeshVertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            Some(format),
            helpers::depth_state(targets::DEPTH_FORMAT, wgpu::DepthBiasState::default()),
            "fs_main",
        );
        let shadow_pipeline = helpers::make_pipeline(
            &device,
            "shadow_pipeline",
            &shadow_shader,
            &shadow_layout,
            MeshVertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            None,
            helpers::depth_state(
                targets::SHADOW_FORMAT,
                wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            ),
            "fs_main",
        );
        let line_pipeline = helpers::make_pipeline(
            &device,
            "line_pipeline",
            &lines_shader,
            &line_layout,
            LineVertex::layout(),
            wgpu::PrimitiveTopology::LineList,
            Some(format),
            helpers::depth_state(targets::DEPTH_FORMAT, wgpu::DepthBiasState::default()),
            "fs_main",
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            globals_buffer,
            lit_bind_group,
            plain_bind_group,
            objects,
            mesh_vb,
            mesh_ib,
            mesh_index_count: box_indices.len() as u32,
            lit_pipeline,
            shadow_pipeline,
            line_pipeline,
            line_vb,
            line_capacity: INITIAL_LINE_CAPACITY,
            line_scratch: Vec::with_capacity(INITIAL_LINE_CAPACITY),
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
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
            self.targets.recreate(&self.device, width, height);
            log::info!("[render] resized to {}x{}", width, height);
        }
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let globals = uniforms::globals(scene, camera);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        let nodes: [&MeshNode; OBJECT_COUNT] = [&scene.card, &scene.anchor, &scene.ground];
        for (slot, node) in self.objects.iter().zip(nodes) {
            self.queue.write_buffer(
                &slot.buffer,
                0,
                bytemuck::bytes_of(&ObjectUniforms::from_node(node)),
            );
        }
        let line_vertex_count = self.upload_lines(scene);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: shadow casters into the shadow map
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if scene.light.cast_shadows {
                rpass.set_pipeline(&self.shadow_pipeline);
                rpass.set_bind_group(0, &self.plain_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.mesh_vb.slice(..));
                rpass.set_index_buffer(self.mesh_ib.slice(..), wgpu::IndexFormat::Uint16);
                for (slot, node) in self.objects.iter().zip(nodes) {
                    if node.casts_shadow {
                        rpass.set_bind_group(1, &slot.bind_group, &[]);
                        rpass.draw_indexed(0..self.mesh_index_count, 0, 0..1);
                    }
                }
            }
        }

        // Pass 2: lit meshes, then lines, into the swapchain
        {
            let [r, g, b] = scene.clear_color;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.lit_pipeline);
            rpass.set_bind_group(0, &self.lit_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.mesh_vb.slice(..));
            rpass.set_index_buffer(self.mesh_ib.slice(..), wgpu::IndexFormat::Uint16);
            for slot in &self.objects {
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.draw_indexed(0..self.mesh_index_count, 0, 0..1);
            }

            if line_vertex_count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_bind_group(0, &self.plain_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.line_vb.slice(..));
                rpass.draw(0..line_vertex_count, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Rebuild the line vertex stream and copy it to the GPU, growing the
    /// buffer when needed. Returns the vertex count to draw.
    fn upload_lines(&mut self, scene: &Scene) -> u32 {
        build_line_vertices(scene, &mut self.line_scratch);
        let needed = self.line_scratch.len();
        if needed == 0 {
            return 0;
        }
        if needed > self.line_capacity {
            self.line_capacity = needed.next_power_of_two();
            self.line_vb = create_line_buffer(&self.device, self.line_capacity);
            log::debug!("[render] line buffer grown to {}", self.line_capacity);
        }
        self.queue
            .write_buffer(&self.line_vb, 0, bytemuck::cast_slice(&self.line_scratch));
        needed as u32
    }
}

fn create_line_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("line_vb"),
        size: (std::mem::size_of::<LineVertex>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
