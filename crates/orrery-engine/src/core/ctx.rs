use winit::window::Window;

use crate::device::Gpu;
use crate::input::{InputFrame, InputState};
use crate::time::FrameTime;

/// Window and GPU access outside the frame loop (startup and shutdown).
pub struct LifecycleCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
}

impl FrameCtx<'_, '_> {
    /// Drawable aspect ratio; `fallback` while the window is minimized.
    pub fn aspect_ratio_or(&self, fallback: f32) -> f32 {
        self.gpu.aspect_ratio().unwrap_or(fallback)
    }
}
