//! Combinators for sequencing and grouping routines.

use crate::core::{assert_delta, BoxRoutine, Routine, Step};

/// Suspend for `duration_ms` of accumulated frame time, producing nothing.
pub fn wait(duration_ms: f64) -> Wait {
    assert!(
        duration_ms.is_finite() && duration_ms >= 0.0,
        "wait duration must be a non-negative finite number of milliseconds, got {duration_ms}"
    );
    Wait {
        duration_ms,
        elapsed_ms: 0.0,
    }
}

/// Routine returned by [`wait`].
#[derive(Clone, Debug)]
pub struct Wait {
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Routine for Wait {
    type Output = ();

    fn advance(&mut self, delta_ms: f64) -> Step<()> {
        assert_delta(delta_ms);
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= self.duration_ms {
            Step::Done(())
        } else {
            Step::Yield(())
        }
    }
}

/// Run `routine` after `duration_ms` of accumulated frame time.
///
/// The frame on which the wait completes also runs the routine to its first
/// suspension point; a delta overshooting the wait is consumed, not carried
/// into the routine.
pub fn delay(duration_ms: f64, routine: BoxRoutine) -> Delay {
    Delay {
        wait: Some(wait(duration_ms)),
        routine,
    }
}

/// Routine returned by [`delay`].
pub struct Delay {
    wait: Option<Wait>,
    routine: BoxRoutine,
}

impl Routine for Delay {
    type Output = ();

    fn advance(&mut self, delta_ms: f64) -> Step<()> {
        if let Some(waiting) = &mut self.wait {
            match waiting.advance(delta_ms) {
                Step::Yield(()) => return Step::Yield(()),
                Step::Done(()) => self.wait = None,
            }
            // Run the routine to its first suspension on the frame the wait
            // completes; the overshoot is consumed, not carried over.
            return self.routine.advance(0.0);
        }
        self.routine.advance(delta_ms)
    }
}

/// Run routines simultaneously until every one of them has completed.
pub fn in_parallel(routines: Vec<BoxRoutine>) -> Parallel {
    Parallel { routines }
}

/// Routine returned by [`in_parallel`].
pub struct Parallel {
    routines: Vec<BoxRoutine>,
}

impl Routine for Parallel {
    type Output = ();

    fn advance(&mut self, delta_ms: f64) -> Step<()> {
        assert_delta(delta_ms);
        self.routines
            .retain_mut(|routine| !routine.advance(delta_ms).is_done());
        if self.routines.is_empty() {
            Step::Done(())
        } else {
            Step::Yield(())
        }
    }
}

/// Run routines simultaneously until the first of them completes.
///
/// Routines listed after the one that finishes are not advanced on the final
/// step; the remainder are dropped unfinished.
pub fn in_parallel_any(routines: Vec<BoxRoutine>) -> ParallelAny {
    ParallelAny { routines }
}

/// Routine returned by [`in_parallel_any`].
pub struct ParallelAny {
    routines: Vec<BoxRoutine>,
}

impl Routine for ParallelAny {
    type Output = ();

    fn advance(&mut self, delta_ms: f64) -> Step<()> {
        assert_delta(delta_ms);
        if self.routines.is_empty() {
            return Step::Done(());
        }
        for routine in &mut self.routines {
            if routine.advance(delta_ms).is_done() {
                self.routines.clear();
                return Step::Done(());
            }
        }
        Step::Yield(())
    }
}

/// Suspend for as long as `predicate` keeps returning true.
pub fn wait_while<F>(predicate: F) -> WaitWhile<F>
where
    F: FnMut() -> bool,
{
    WaitWhile { predicate }
}

/// Suspend until `predicate` returns true.
pub fn wait_until<F>(mut predicate: F) -> WaitWhile<impl FnMut() -> bool>
where
    F: FnMut() -> bool,
{
    wait_while(move || !predicate())
}

/// Routine returned by [`wait_while`] and [`wait_until`].
pub struct WaitWhile<F> {
    predicate: F,
}

impl<F> Routine for WaitWhile<F>
where
    F: FnMut() -> bool,
{
    type Output = ();

    fn advance(&mut self, delta_ms: f64) -> Step<()> {
        assert_delta(delta_ms);
        if (self.predicate)() {
            Step::Yield(())
        } else {
            Step::Done(())
        }
    }
}
