use crate::constants::{PREVIEW_CAMERA_Y, PREVIEW_FAR, PREVIEW_FOV_Y_DEG, PREVIEW_NEAR};
use crate::core::camera;
use crate::core::preview;
use crate::render::helpers::{create_mesh_buffers, create_rgba_texture, SurfaceState};
use glam::{Mat4, Vec2, Vec3};
use web_sys as web;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CardUniforms {
    mvp: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    accent: [f32; 4], // rgb + frame opacity
    eye: [f32; 4],
}

const VERTEX_ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3, // normal
    2 => Float32x2, // uv
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (8 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBS,
    }
}

/// GPU state for the product preview: the displaced card mesh, its backing
/// plate, and the (initially white) card texture.
pub struct CardGpu {
    state: SurfaceState,
    card_pipeline: wgpu::RenderPipeline,
    frame_pipeline: wgpu::RenderPipeline,
    card_vbuf: wgpu::Buffer,
    card_ibuf: wgpu::Buffer,
    card_index_count: u32,
    frame_vbuf: wgpu::Buffer,
    frame_ibuf: wgpu::Buffer,
    frame_index_count: u32,
    uniform_card: wgpu::Buffer,
    uniform_frame: wgpu::Buffer,
    bg_card: wgpu::BindGroup,
    bg_frame: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    texture_bg: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    _texture: wgpu::Texture,
    accent: [f32; 3],
}

impl CardGpu {
    pub async fn new(canvas: &web::HtmlCanvasElement, accent: [f32; 3]) -> anyhow::Result<Self> {
        let state = SurfaceState::new(canvas).await?;
        let device = &state.device;

        let card_mesh = preview::build_card_mesh();
        let frame_mesh = preview::build_frame_mesh();
        let (card_vbuf, card_ibuf, card_index_count) =
            create_mesh_buffers(device, &card_mesh, "card_mesh");
        let (frame_vbuf, frame_ibuf, frame_index_count) =
            create_mesh_buffers(device, &frame_mesh, "frame_mesh");

        let uniform_card = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("card_uniforms"),
            size: std::mem::size_of::<CardUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_frame = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<CardUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("card_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::CARD_WGSL.into()),
        });

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("card_uniform_bgl"),
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
            label: Some("card_texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("card_pl"),
            bind_group_layouts: &[&uniform_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str, frag_entry: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pl),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_card"),
                    buffers: &[vertex_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(frag_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: state.config.format,
                        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let card_pipeline = make_pipeline("card_pipeline", "fs_card");
        let frame_pipeline = make_pipeline("frame_pipeline", "fs_frame");

        let bg_card = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("card_bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_card.as_entire_binding(),
            }],
        });
        let bg_frame = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_frame.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("card_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // White placeholder until the image arrives; the card renders
        // untextured rather than waiting on the network
        let (texture, view) =
            create_rgba_texture(device, &state.queue, "card_tex", 1, 1, &[255, 255, 255, 255]);
        let texture_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("card_texture_bg"),
            layout: &texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            state,
            card_pipeline,
            frame_pipeline,
            card_vbuf,
            card_ibuf,
            card_index_count,
            frame_vbuf,
            frame_ibuf,
            frame_index_count,
            uniform_card,
            uniform_frame,
            bg_card,
            bg_frame,
            texture_bgl,
            texture_bg,
            sampler,
            _texture: texture,
            accent,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        self.state.resize_if_needed(width, height);
    }

    /// Swap in the decoded image. Replaces the placeholder texture and its
    /// bind group; the old texture drops here.
    pub fn apply_texture(&mut self, rgba: &[u8], width: u32, height: u32) {
        let (texture, view) = create_rgba_texture(
            &self.state.device,
            &self.state.queue,
            "card_tex",
            width.max(1),
            height.max(1),
            rgba,
        );
        self.texture_bg = self
            .state
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("card_texture_bg"),
                layout: &self.texture_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });
        self._texture = texture;
    }

    /// Draw one frame with post-smoothing rotation, zoom, and bob applied.
    pub fn render(&mut self, rot: Vec2, zoom: f32, bob_y: f32) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.state.width as f32 / self.state.height.max(1) as f32;
        let eye = Vec3::new(0.0, PREVIEW_CAMERA_Y, zoom);
        let vp = camera::view_proj(aspect, PREVIEW_FOV_Y_DEG, eye, PREVIEW_NEAR, PREVIEW_FAR);

        // Group transform shared by card and plate; the card adds its
        // resting tilt on top
        let group = Mat4::from_translation(Vec3::new(0.0, bob_y, 0.0))
            * Mat4::from_rotation_x(rot.x)
            * Mat4::from_rotation_y(rot.y);
        let model_card = group * Mat4::from_rotation_x(preview::CARD_REST_TILT_X);
        let model_frame = group;

        let accent = [
            self.accent[0],
            self.accent[1],
            self.accent[2],
            preview::FRAME_OPACITY,
        ];
        let make = |model: Mat4| CardUniforms {
            mvp: (vp * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            accent,
            eye: [eye.x, eye.y, eye.z, 0.0],
        };
        self.state
            .queue
            .write_buffer(&self.uniform_card, 0, bytemuck::bytes_of(&make(model_card)));
        self.state.queue.write_buffer(
            &self.uniform_frame,
            0,
            bytemuck::bytes_of(&make(model_frame)),
        );

        let frame = self.state.surface.get_current_texture()?;
        let view_tex = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("card_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("card_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view_tex,
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

            // Painter's order: plate first, card in front
            rpass.set_pipeline(&self.frame_pipeline);
            rpass.set_bind_group(0, &self.bg_frame, &[]);
            rpass.set_bind_group(1, &self.texture_bg, &[]);
            rpass.set_vertex_buffer(0, self.frame_vbuf.slice(..));
            rpass.set_index_buffer(self.frame_ibuf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.frame_index_count, 0, 0..1);

            rpass.set_pipeline(&self.card_pipeline);
            rpass.set_bind_group(0, &self.bg_card, &[]);
            rpass.set_bind_group(1, &self.texture_bg, &[]);
            rpass.set_vertex_buffer(0, self.card_vbuf.slice(..));
            rpass.set_index_buffer(self.card_ibuf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.card_index_count, 0, 0..1);
        }
        self.state.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
