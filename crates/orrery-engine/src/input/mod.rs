//! Keyboard, mouse-look and window input, independent of winit.
//!
//! The runtime feeds events in through `platform::winit`; the main loop reads
//! [`InputState`] for held keys and [`InputFrame`] for this frame's mouse motion.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
