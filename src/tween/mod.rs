//! Timed interpolation between values, driven one frame at a time.
//!
//! [`Tween`] animates one number, [`KeyedTween`] animates a named set of
//! numbers on a shared clock, and [`drive`] adapts either into a routine that
//! pushes each produced value into a callback.

pub mod easing;

mod task;

pub use easing::{value_from_ratio, Easing};
pub use task::{drive, Driven, KeyedTween, Tween};
