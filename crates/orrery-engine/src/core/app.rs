use anyhow::Result;

use super::ctx::{FrameCtx, LifecycleCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime calls `init` once the window and GPU exist, `on_frame` once per
/// redraw, and `shutdown` once before the GPU and window are dropped.
pub trait App {
    /// An error here is fatal: the runtime stops and returns it.
    fn init(&mut self, ctx: &mut LifecycleCtx<'_, '_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    fn shutdown(&mut self, ctx: &mut LifecycleCtx<'_, '_>) {
        let _ = ctx;
    }
}
