//! The winit event loop, the viewer window, and cursor capture for mouse look.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
