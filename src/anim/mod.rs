//! Procedural animation driving: cancelable job groups and routine
//! combinators for running, sequencing, and racing animations.

pub mod compose;

mod group;

pub use compose::{
    delay, in_parallel, in_parallel_any, wait, wait_until, wait_while, Delay, Parallel,
    ParallelAny, Wait, WaitWhile,
};
pub use group::{AnimationGroup, JobHandle, JobId, JobStatus};
