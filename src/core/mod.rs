//! Core suspendable-computation protocol.
//!
//! Everything timed in this crate (tweens, fades, multi-frame state
//! transitions) is expressed as a [`Routine`]: a computation that suspends
//! between frames and resumes with the next time delta.

mod routine;

pub use routine::{noop, BoxRoutine, Routine, Step};

pub(crate) use routine::assert_delta;
