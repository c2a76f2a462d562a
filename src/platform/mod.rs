//! Platform-facing input handling
//!
//! Turns raw key names, swipe deltas and typed commands into game actions.
//! Nothing here reads a device directly; front ends feed it what they receive.

pub mod input;

pub use input::{Command, direction_from_key, swipe_direction};
