//! Platform abstraction layer
//!
//! Handles the pieces that differ between a windowed frontend and headless runs:
//! - Frame time (restartable clock or fixed step)
//! - Key mapping to session input events

pub mod input;
pub mod time;

pub use input::{InputEvent, Key, RawEvent, fold_events};
pub use time::{FixedStep, FrameClock, TimeSource};
