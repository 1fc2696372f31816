use crate::constants::{FIELD_CAMERA_Z, FIELD_FAR, FIELD_FOV_Y_DEG, FIELD_NEAR};
use crate::core::camera;
use crate::core::cursor::CursorState;
use crate::core::particles::{
    self, Particle, CURSOR_PARALLAX_STRENGTH, INFLUENCE_RADIUS, PARTICLE_COUNT,
};
use crate::dom;
use crate::render::helpers::SurfaceState;
use glam::Vec3;
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleInstance {
    position: [f32; 3],
    scale: f32,
    phase: f32,
    _pad: [f32; 3],
}

impl ParticleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // base position
        1 => Float32,   // scale
        2 => Float32,   // phase
    ];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FieldUniforms {
    view_proj: [[f32; 4]; 4],
    accent: [f32; 4], // rgb + pixel ratio
    cursor_ndc: [f32; 2],
    cursor_mix: f32,
    time: f32,
    cursor_world: [f32; 4],
    resolution: [f32; 2],
    influence_radius: f32,
    parallax_strength: f32,
}

/// GPU state for the firefly backdrop. Owns its surface, the immutable
/// instance buffer, and the shader pair; everything releases on drop.
pub struct FieldGpu {
    state: SurfaceState,
    pipeline: wgpu::RenderPipeline,
    instance_buf: wgpu::Buffer,
    uniform_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_count: u32,
    accent: [f32; 3],
}

impl FieldGpu {
    pub async fn new(canvas: &web::HtmlCanvasElement, accent: [f32; 3]) -> anyhow::Result<Self> {
        let state = SurfaceState::new(canvas).await?;
        let device = &state.device;

        let mut rng = rand::thread_rng();
        let particles = particles::spawn_particles(PARTICLE_COUNT, &mut rng);
        let instances: Vec<ParticleInstance> = particles
            .iter()
            .map(|p: &Particle| ParticleInstance {
                position: p.position.to_array(),
                scale: p.scale,
                phase: p.phase,
                _pad: [0.0; 3],
            })
            .collect();
        let instance_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("firefly_instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("field_uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::FIELD_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field_bgl"),
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
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        // Additive blending, no depth write: glow accumulates where sprites
        // overlap and the page stays visible behind the field
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("field_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_firefly"),
                buffers: &[ParticleInstance::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_firefly"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: state.config.format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("field_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        Ok(Self {
            state,
            pipeline,
            instance_buf,
            uniform_buf,
            bind_group,
            instance_count: PARTICLE_COUNT as u32,
            accent,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        self.state.resize_if_needed(width, height);
    }

    pub fn particle_count(&self) -> u32 {
        self.instance_count
    }

    /// Draw one frame. The cursor state must already be stepped for this
    /// frame; the shader reads only post-smoothing values.
    pub fn render(&mut self, time: f32, cursor: &CursorState) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.state.width as f32 / self.state.height.max(1) as f32;
        let view_proj = camera::view_proj(
            aspect,
            FIELD_FOV_Y_DEG,
            Vec3::new(0.0, 0.0, FIELD_CAMERA_Z),
            FIELD_NEAR,
            FIELD_FAR,
        );
        let u = FieldUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            accent: [
                self.accent[0],
                self.accent[1],
                self.accent[2],
                dom::clamped_pixel_ratio() as f32,
            ],
            cursor_ndc: cursor.ndc.to_array(),
            cursor_mix: if cursor.active() { 1.0 } else { 0.0 },
            time,
            cursor_world: [cursor.world.x, cursor.world.y, cursor.world.z, 0.0],
            resolution: [self.state.width as f32, self.state.height as f32],
            influence_radius: INFLUENCE_RADIUS,
            parallax_strength: CURSOR_PARALLAX_STRENGTH,
        };
        self.state
            .queue
            .write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&u));

        let frame = self.state.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("field_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.instance_buf.slice(..));
            rpass.draw(0..6, 0..self.instance_count);
        }
        self.state.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
