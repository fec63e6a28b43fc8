//! The cube renderer.
//!
//! `CubeRenderer::new` is the one-time setup: fixed pipeline state,
//! static geometry buffers, shader program, uniform block, texture. It
//! runs exactly once, when the GPU context first exists. `render` is the
//! steady per-frame path: advance the spin, compose M/V/MVP, write the
//! uniform block, record one clear+draw pass.

use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use cubeview_camera::Camera;
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::spin::ModelSpin;
use crate::{geometry, shader, texture};

/// Clear color behind the cube.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.4,
    a: 1.0,
};

const LIGHT_POSITION: [f32; 3] = [4.0, 4.0, 4.0];
const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const LIGHT_POWER: f32 = 40.0;

/// Per-draw uniform block: matrices plus the point light.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    mvp: [[f32; 4]; 4],
    light_position: [f32; 3],
    light_power: f32,
    light_color: [f32; 3],
    _pad: f32,
}

/// On-disk locations of the renderer's assets.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
}

impl AssetPaths {
    /// Conventional layout under one assets directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            vertex_shader: dir.join("shaders/lit_texture.vs.wgsl"),
            fragment_shader: dir.join("shaders/lit_texture.fs.wgsl"),
            texture: dir.join("textures/uvgrid.dds"),
        }
    }
}

/// Renders one textured, spinning cube.
pub struct CubeRenderer {
    /// Absent when the shader program is broken; frames then only clear.
    pipeline: Option<wgpu::RenderPipeline>,
    shader_status: shader::ProgramStatus,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    position_buffer: wgpu::Buffer,
    uv_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth_texture: wgpu::TextureView,
    spin: ModelSpin,
}

impl CubeRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        assets: &AssetPaths,
    ) -> Result<Self, shader::ShaderError> {
        // Static geometry: three separate tightly packed streams plus
        // indices, uploaded once each.
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_positions"),
            contents: bytemuck::cast_slice(&geometry::POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uv_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_uvs"),
            contents: bytemuck::cast_slice(&geometry::UVS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_normals"),
            contents: bytemuck::cast_slice(&geometry::NORMALS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_indices"),
            contents: bytemuck::cast_slice(&geometry::INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_uniforms"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cube_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Texture unit 0: the DDS if it loads, else the white fallback.
        let cube_texture = texture::load_dds_texture(device, queue, &assets.texture)
            .unwrap_or_else(|| texture::fallback_texture(device, queue));
        let texture_view = cube_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cube_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let program =
            shader::build_program(device, &assets.vertex_shader, &assets.fragment_shader)?;

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = match (&program.vertex, &program.fragment) {
            (Some(vertex), Some(fragment)) => Some(device.create_render_pipeline(
                &wgpu::RenderPipelineDescriptor {
                    label: Some("cube_pipeline"),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: vertex,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[
                            wgpu::VertexBufferLayout {
                                array_stride: 12,
                                step_mode: wgpu::VertexStepMode::Vertex,
                                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                            },
                            wgpu::VertexBufferLayout {
                                array_stride: 8,
                                step_mode: wgpu::VertexStepMode::Vertex,
                                attributes: &wgpu::vertex_attr_array![1 => Float32x2],
                            },
                            wgpu::VertexBufferLayout {
                                array_stride: 12,
                                step_mode: wgpu::VertexStepMode::Vertex,
                                attributes: &wgpu::vertex_attr_array![2 => Float32x3],
                            },
                        ],
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: fragment,
                        entry_point: Some("fs_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: surface_format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: Some(wgpu::Face::Back),
                        ..Default::default()
                    },
                    depth_stencil: Some(wgpu::DepthStencilState {
                        format: wgpu::TextureFormat::Depth32Float,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: Default::default(),
                        bias: Default::default(),
                    }),
                    multisample: Default::default(),
                    multiview: None,
                    cache: None,
                },
            )),
            _ => None,
        };

        let depth_texture = Self::create_depth_texture(device, width, height);

        Ok(Self {
            pipeline,
            shader_status: program.status,
            uniform_buffer,
            bind_group,
            position_buffer,
            uv_buffer,
            normal_buffer,
            index_buffer,
            index_count: geometry::INDICES.len() as u32,
            depth_texture,
            spin: ModelSpin::new(),
        })
    }

    /// Build status of the shader program, for callers that want to
    /// report degraded rendering.
    pub fn shader_status(&self) -> &shader::ProgramStatus {
        &self.shader_status
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &Camera,
    ) {
        self.spin.advance();

        let model = self.spin.model_matrix();
        let view_mat = camera.view_matrix();
        let projection = camera.projection_matrix();
        let mvp: Mat4 = projection * view_mat * model;

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                model: model.to_cols_array_2d(),
                view: view_mat.to_cols_array_2d(),
                mvp: mvp.to_cols_array_2d(),
                light_position: LIGHT_POSITION,
                light_power: LIGHT_POWER,
                light_color: LIGHT_COLOR,
                _pad: 0.0,
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("cube_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // A broken shader program clears and draws nothing.
            if let Some(pipeline) = &self.pipeline {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.position_buffer.slice(..));
                pass.set_vertex_buffer(1, self.uv_buffer.slice(..));
                pass.set_vertex_buffer(2, self.normal_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
