//! Frame timing. The runtime ticks one [`FrameClock`] per redraw; the orbit
//! gate reads [`FrameTime::now`], the camera reads [`FrameTime::dt`].

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
