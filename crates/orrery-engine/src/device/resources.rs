use slotmap::new_key_type;

new_key_type! {
    /// Vertex buffer owned by a [`RenderDevice`].
    pub struct BufferHandle;
    /// Sampled texture owned by a [`RenderDevice`].
    pub struct TextureHandle;
}

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// GPU resource allocation used by the scene.
///
/// The wgpu implementation lives in `render::WgpuDevice`. Handles are only valid for
/// the device that issued them, and each must be released exactly once.
pub trait RenderDevice {
    /// Allocates a vertex buffer initialised with `contents`.
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> BufferHandle;

    /// Overwrites the buffer from offset 0. `contents` must fit the allocation.
    fn write_vertex_buffer(&mut self, buffer: BufferHandle, contents: &[u8]);

    fn create_texture(&mut self, label: &str, data: &TextureData) -> TextureHandle;

    fn release_buffer(&mut self, buffer: BufferHandle);

    fn release_texture(&mut self, texture: TextureHandle);
}
