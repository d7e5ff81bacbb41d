//! The resumable-computation protocol that everything else is built on.
//!
//! A [`Routine`] is the explicit form of a coroutine: code that pauses at
//! well-defined points and resumes exactly where it left off when handed the
//! next frame's time delta. Between suspensions a routine runs to completion
//! synchronously, so a driver advancing one routine per frame never observes
//! partial steps or reentrancy.

/// Result of advancing a [`Routine`] by one time step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<T> {
    /// The routine produced an intermediate value and may be advanced again.
    Yield(T),
    /// The routine produced its final value and must not be advanced again.
    Done(T),
}

impl<T> Step<T> {
    /// Check whether this step was the routine's last.
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    /// Extract the produced value, intermediate or final.
    pub fn into_value(self) -> T {
        match self {
            Step::Yield(value) | Step::Done(value) => value,
        }
    }
}

/// A suspendable computation driven one external time step at a time.
///
/// Implementors hold whatever state they need to resume; the driver supplies
/// elapsed milliseconds since the previous step. Once [`advance`] returns
/// [`Step::Done`] the routine is exhausted and advancing it again is a
/// contract violation (implementations panic rather than resume a finished
/// computation with corrupted state).
///
/// [`advance`]: Routine::advance
///
/// # Example
///
/// ```rust
/// use curtain::core::{Routine, Step};
///
/// struct Countdown {
///     remaining_ms: f64,
/// }
///
/// impl Routine for Countdown {
///     type Output = f64;
///
///     fn advance(&mut self, delta_ms: f64) -> Step<f64> {
///         self.remaining_ms = (self.remaining_ms - delta_ms).max(0.0);
///         if self.remaining_ms == 0.0 {
///             Step::Done(0.0)
///         } else {
///             Step::Yield(self.remaining_ms)
///         }
///     }
/// }
///
/// let mut countdown = Countdown { remaining_ms: 100.0 };
/// assert_eq!(countdown.advance(60.0), Step::Yield(40.0));
/// assert_eq!(countdown.advance(60.0), Step::Done(0.0));
/// ```
pub trait Routine {
    /// Value produced at each step.
    type Output;

    /// Resume the routine with the time elapsed since the previous step.
    ///
    /// `delta_ms` must be a non-negative finite number of milliseconds.
    fn advance(&mut self, delta_ms: f64) -> Step<Self::Output>;
}

impl<R: Routine + ?Sized> Routine for Box<R> {
    type Output = R::Output;

    fn advance(&mut self, delta_ms: f64) -> Step<Self::Output> {
        (**self).advance(delta_ms)
    }
}

/// Boxed routine with no per-step value. This is the currency of state
/// `enter`/`leave` procedures and animation-group jobs.
pub type BoxRoutine = Box<dyn Routine<Output = ()>>;

/// Routine that completes on its first step without doing anything.
///
/// For states whose `enter` or `leave` needs no animation frames. Unlike other
/// routines, advancing it repeatedly is allowed and keeps reporting done.
pub fn noop() -> BoxRoutine {
    Box::new(Noop)
}

struct Noop;

impl Routine for Noop {
    type Output = ();

    fn advance(&mut self, _delta_ms: f64) -> Step<()> {
        Step::Done(())
    }
}

pub(crate) fn assert_delta(delta_ms: f64) {
    assert!(
        delta_ms.is_finite() && delta_ms >= 0.0,
        "time delta must be a non-negative finite number of milliseconds, got {delta_ms}"
    );
}
