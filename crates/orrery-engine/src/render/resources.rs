use slotmap::SlotMap;
use wgpu::util::DeviceExt;

use crate::device::{BufferHandle, RenderDevice, TextureData, TextureHandle};

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// wgpu objects behind the scene's buffer and texture handles.
#[derive(Default)]
pub struct GpuResources {
    buffers: SlotMap<BufferHandle, wgpu::Buffer>,
    textures: SlotMap<TextureHandle, GpuTexture>,
}

impl GpuResources {
    pub fn buffer(&self, handle: BufferHandle) -> Option<&wgpu::Buffer> {
        self.buffers.get(handle)
    }

    /// Group 1 bind group (texture + sampler) for `handle`.
    pub fn texture_bind_group(&self, handle: TextureHandle) -> Option<&wgpu::BindGroup> {
        self.textures.get(handle).map(|t| &t.bind_group)
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }
}

/// [`RenderDevice`] over a wgpu device, filling a [`GpuResources`] arena.
pub struct WgpuDevice<'a> {
    pub(super) device: &'a wgpu::Device,
    pub(super) queue: &'a wgpu::Queue,
    pub(super) texture_layout: &'a wgpu::BindGroupLayout,
    pub(super) sampler: &'a wgpu::Sampler,
    pub(super) resources: &'a mut GpuResources,
}

impl RenderDevice for WgpuDevice<'_> {
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> BufferHandle {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        self.resources.buffers.insert(buffer)
    }

    fn write_vertex_buffer(&mut self, buffer: BufferHandle, contents: &[u8]) {
        let Some(target) = self.resources.buffers.get(buffer) else {
            log::warn!("write to released buffer {buffer:?} ignored");
            return;
        };
        if contents.len() as u64 > target.size() {
            log::error!(
                "write of {} bytes exceeds buffer {buffer:?} ({} bytes)",
                contents.len(),
                target.size()
            );
            return;
        }
        self.queue.write_buffer(target, 0, contents);
    }

    fn create_texture(&mut self, label: &str, data: &TextureData) -> TextureHandle {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.bytes_per_row()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(self.sampler),
                },
            ],
        });

        self.resources
            .textures
            .insert(GpuTexture { texture, bind_group })
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        match self.resources.buffers.remove(buffer) {
            Some(buffer) => buffer.destroy(),
            None => log::warn!("buffer {buffer:?} released twice"),
        }
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        match self.resources.textures.remove(texture) {
            Some(entry) => entry.texture.destroy(),
            None => log::warn!("texture {texture:?} released twice"),
        }
    }
}
