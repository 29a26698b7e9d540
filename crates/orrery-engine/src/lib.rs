//! Orrery engine crate.
//!
//! Platform + GPU runtime, asset loading, the animated scene, and the per-frame
//! update/draw loop used by the viewer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;
pub mod logging;

pub mod assets;
pub mod animation;
pub mod camera;
pub mod render;
pub mod scene;

#[cfg(test)]
mod test_support;
