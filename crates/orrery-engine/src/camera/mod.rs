//! Cameras: anything that can produce view and projection matrices.

mod free_look;

use glam::Mat4;

pub use free_look::{CameraConfig, FreeLookCamera};

/// View/projection source consumed by the frame renderer.
pub trait CameraView {
    /// World to camera space.
    fn view(&self) -> Mat4;

    /// Camera to clip space for a drawable of the given width/height ratio.
    fn projection(&self, aspect: f32) -> Mat4;
}
