use std::num::NonZeroU64;

use crate::device::Gpu;

use super::frame::{DrawList, FrameUniforms};
use super::resources::{GpuResources, WgpuDevice};
use super::{RenderCtx, RenderTarget};

pub(crate) const STANDARD_SHADING_WGSL: &str = include_str!("shaders/standard_shading.wgsl");

const UNIFORM_SIZE: u64 = std::mem::size_of::<FrameUniforms>() as u64;

// ── vertex layouts ────────────────────────────────────────────────────────

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const UV_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
const NORMAL_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];

fn attribute_layout(
    stride: u64,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: stride,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// One buffer per attribute: slot 0 positions, slot 1 uvs, slot 2 normals.
fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        attribute_layout(12, &POSITION_ATTRS),
        attribute_layout(8, &UV_ATTRS),
        attribute_layout(12, &NORMAL_ATTRS),
    ]
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Draws a [`DrawList`] of textured triangle meshes with the standard shading pipeline.
///
/// Owns the pipeline, the frame uniform buffer, the shared sampler, and the
/// buffers/textures behind the scene's handles.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    resources: GpuResources,
}

impl MeshRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery standard shading"),
            source: wgpu::ShaderSource::Wgsl(STANDARD_SHADING_WGSL.into()),
        });

        let uniform_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let texture_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery texture bgl"),
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

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orrery mesh pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("orrery mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &vertex_layouts(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: ctx.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery frame uniforms"),
            size: UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery frame uniforms"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("orrery texture sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!(
            "mesh pipeline ready (color {:?}, depth {:?})",
            ctx.surface_format,
            ctx.depth_format
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            sampler,
            resources: GpuResources::default(),
        }
    }

    pub fn resources(&self) -> &GpuResources {
        &self.resources
    }

    /// Resource allocator that fills this renderer's arena.
    pub fn device<'a>(&'a mut self, gpu: &'a Gpu<'_>) -> WgpuDevice<'a> {
        WgpuDevice {
            device: gpu.device(),
            queue: gpu.queue(),
            texture_layout: &self.texture_layout,
            sampler: &self.sampler,
            resources: &mut self.resources,
        }
    }

    /// Clears color and depth, then replays `list` in one render pass.
    pub fn render(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        clear: wgpu::Color,
    ) {
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&list.uniforms));

        let depth_stencil_attachment =
            target
                .depth_view
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orrery mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.uniform_bind_group, &[]);

        for draw in &list.draws {
            let res = &self.resources;
            let (Some(texture), Some(positions), Some(uvs), Some(normals)) = (
                res.texture_bind_group(draw.texture),
                res.buffer(draw.buffers.positions),
                res.buffer(draw.buffers.uvs),
                res.buffer(draw.buffers.normals),
            ) else {
                log::warn!("skipping draw of {:?}: resources released", draw.shape);
                continue;
            };

            rpass.set_bind_group(1, texture, &[]);
            rpass.set_vertex_buffer(0, positions.slice(..));
            rpass.set_vertex_buffer(1, uvs.slice(..));
            rpass.set_vertex_buffer(2, normals.slice(..));
            rpass.draw(0..draw.vertex_count, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_uniform_block_fields() {
        for name in [
            "MVP",
            "M:",
            "V:",
            "LightPosition1_worldspace",
            "LightPosition2_worldspace",
            "myTextureSampler",
        ] {
            assert!(
                STANDARD_SHADING_WGSL.contains(name),
                "shader is missing `{name}`"
            );
        }
    }

    #[test]
    fn vertex_slots_match_attribute_sizes() {
        let layouts = vertex_layouts();
        let strides: Vec<_> = layouts.iter().map(|l| l.array_stride).collect();
        assert_eq!(strides, [12, 8, 12]);

        let locations: Vec<_> = layouts
            .iter()
            .map(|l| l.attributes[0].shader_location)
            .collect();
        assert_eq!(locations, [0, 1, 2]);
    }
}
