//! Core engine-facing contracts.
//!
//! `App` is the interface between the runtime (platform loop) and the
//! application; `MainLoop` is the per-iteration scene update and draw cycle an
//! app drives from `on_frame`.

mod app;
mod ctx;
mod main_loop;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, LifecycleCtx};
pub use main_loop::{FrameInput, LoopState, MainLoop};
