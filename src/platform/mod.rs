//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (delta clamp on tab resume)
//! - Input events (key names to game actions)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{InputState, KeyAction};
