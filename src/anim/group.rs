//! Animation groups: named, cancelable jobs driven once per frame.
//!
//! A group owns a set of running routines and advances each of them by the
//! frame delta on every [`update`]. Playing a routine hands back a
//! [`JobHandle`] that can cancel the job early or observe its natural
//! completion, which is how composites like the screen fader keep exactly one
//! animation owning a value at a time.
//!
//! [`update`]: AnimationGroup::update

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::core::{assert_delta, BoxRoutine, Routine, Step};

/// Unique identity of a job within its group's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of a job as observed through its handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Still being advanced by the group.
    Running,
    /// Reached its terminal step naturally.
    Finished,
    /// Dropped before completion; its final value was never produced.
    Canceled,
}

/// Cancelable handle to a job played on an [`AnimationGroup`].
///
/// Handles are cheap to clone and remain valid after the job ends; completion
/// is observed by polling [`status`] between frames.
///
/// [`status`]: JobHandle::status
#[derive(Clone)]
pub struct JobHandle {
    id: JobId,
    status: Rc<Cell<JobStatus>>,
}

impl JobHandle {
    fn settled(status: JobStatus) -> Self {
        Self {
            id: JobId::new(),
            status: Rc::new(Cell::new(status)),
        }
    }

    /// Identity of the job this handle controls.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> JobStatus {
        self.status.get()
    }

    /// Whether the job reached its terminal step naturally.
    pub fn is_finished(&self) -> bool {
        self.status() == JobStatus::Finished
    }

    /// Whether the job was canceled before completing.
    pub fn is_canceled(&self) -> bool {
        self.status() == JobStatus::Canceled
    }

    /// Cancel the job. It is dropped by the group without being advanced
    /// again and without producing a final value. Canceling a job that has
    /// already settled does nothing.
    pub fn cancel(&self) {
        if self.status() == JobStatus::Running {
            self.status.set(JobStatus::Canceled);
            tracing::trace!(job = %self.id, "animation job canceled");
        }
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("id", &self.id)
            .field("status", &self.status.get())
            .finish()
    }
}

struct Job {
    id: JobId,
    routine: BoxRoutine,
    status: Rc<Cell<JobStatus>>,
}

/// Drives a set of simultaneously running routines, one frame delta at a time.
#[derive(Default)]
pub struct AnimationGroup {
    jobs: Vec<Job>,
}

impl AnimationGroup {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a routine as a job and return its cancelable handle.
    ///
    /// The routine is advanced one zero-delta step immediately, so work before
    /// its first suspension point happens now; a routine that completes on
    /// that step is never enqueued and its handle is already finished.
    pub fn play(&mut self, mut routine: BoxRoutine) -> JobHandle {
        if routine.advance(0.0).is_done() {
            return JobHandle::settled(JobStatus::Finished);
        }

        let status = Rc::new(Cell::new(JobStatus::Running));
        let id = JobId::new();
        self.jobs.push(Job {
            id,
            routine,
            status: Rc::clone(&status),
        });
        tracing::trace!(job = %id, "animation job started");
        JobHandle { id, status }
    }

    /// Advance every live job by `delta_ms`.
    ///
    /// Finished jobs are removed and their handles report
    /// [`JobStatus::Finished`]; canceled jobs are removed without being
    /// advanced.
    pub fn update(&mut self, delta_ms: f64) {
        assert_delta(delta_ms);
        self.jobs.retain_mut(|job| {
            if job.status.get() == JobStatus::Canceled {
                return false;
            }
            match job.routine.advance(delta_ms) {
                Step::Yield(()) => true,
                Step::Done(()) => {
                    job.status.set(JobStatus::Finished);
                    tracing::trace!(job = %job.id, "animation job finished");
                    false
                }
            }
        });
    }

    /// Cancel every job still running.
    pub fn cancel_all(&mut self) {
        for job in self.jobs.drain(..) {
            job.status.set(JobStatus::Canceled);
            tracing::trace!(job = %job.id, "animation job canceled");
        }
    }

    /// Number of jobs currently being driven.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no jobs are currently being driven.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
