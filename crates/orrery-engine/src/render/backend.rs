use winit::window::Window;

use crate::core::AppControl;
use crate::device::{BufferHandle, Gpu, RenderDevice, SurfaceErrorAction, TextureData, TextureHandle};

use super::frame::{DrawList, FrameSink};
use super::mesh::MeshRenderer;
use super::{RenderCtx, RenderTarget};

/// Window + GPU + mesh renderer, seen as one device the main loop can drive.
pub struct WgpuBackend<'a, 'w> {
    pub gpu: &'a mut Gpu<'w>,
    pub window: &'a Window,
    pub renderer: &'a mut MeshRenderer,
    pub clear: wgpu::Color,
}

impl<'a, 'w> WgpuBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, window: &'a Window, renderer: &'a mut MeshRenderer) -> Self {
        Self {
            gpu,
            window,
            renderer,
            clear: wgpu::Color::BLACK,
        }
    }

    pub fn with_clear(mut self, clear: wgpu::Color) -> Self {
        self.clear = clear;
        self
    }
}

impl RenderDevice for WgpuBackend<'_, '_> {
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> BufferHandle {
        self.renderer.device(self.gpu).create_vertex_buffer(label, contents)
    }

    fn write_vertex_buffer(&mut self, buffer: BufferHandle, contents: &[u8]) {
        self.renderer.device(self.gpu).write_vertex_buffer(buffer, contents);
    }

    fn create_texture(&mut self, label: &str, data: &TextureData) -> TextureHandle {
        self.renderer.device(self.gpu).create_texture(label, data)
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        self.renderer.device(self.gpu).release_buffer(buffer);
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.renderer.device(self.gpu).release_texture(texture);
    }
}

impl FrameSink for WgpuBackend<'_, '_> {
    fn present(&mut self, list: &DrawList) -> AppControl {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // RenderTarget borrows the frame; it must be gone before submit() takes it.
        {
            let ctx = RenderCtx::from_gpu(self.gpu);
            let mut target =
                RenderTarget::new(&mut frame.encoder, &frame.view, frame.depth_view.as_ref());
            self.renderer.render(&ctx, &mut target, list, self.clear);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }
}
