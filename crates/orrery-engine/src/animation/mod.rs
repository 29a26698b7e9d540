//! Time-gated animation of scene geometry.

mod orbit;

pub use orbit::{OrbitAnimator, OrbitConfig};
