//! GPU rendering subsystem.
//!
//! CPU side: `GpuSync` keeps shape buffers current and `FrameRenderer` turns the
//! scene into a `DrawList`. GPU side: `MeshRenderer` replays that list with wgpu,
//! and `WgpuBackend` exposes it to the main loop as a `RenderDevice + FrameSink`.

mod backend;
mod ctx;
mod frame;
mod mesh;
mod resources;
mod sync;

pub use backend::WgpuBackend;
pub use ctx::{RenderCtx, RenderTarget};
pub use frame::{DrawList, FrameRenderer, FrameSink, FrameUniforms, MeshDraw};
pub use mesh::MeshRenderer;
pub use resources::{GpuResources, WgpuDevice};
pub use sync::GpuSync;
