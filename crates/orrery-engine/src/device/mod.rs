//! The window's wgpu device, surface and depth target, and the [`RenderDevice`]
//! seam the scene allocates its buffers and textures through.

mod context;
mod init;
mod resources;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
pub use resources::{BufferHandle, RenderDevice, TextureData, TextureHandle};
