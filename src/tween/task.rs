//! Tween tasks: suspendable computations producing interpolated values over a
//! fixed duration.
//!
//! A tween is created fresh for each animated transition and driven through
//! the [`Routine`] protocol, one time delta per frame. The step on which the
//! accumulated time reaches the duration produces the target value exactly,
//! bit for bit, no matter how far the final delta overshoots. That exactness
//! is what lets a fade be canceled and immediately reversed without the alpha
//! value drifting.

use std::collections::BTreeMap;

use crate::core::{assert_delta, Routine, Step};
use crate::tween::easing::{self, value_from_ratio, Easing};

/// Shared clock for both tween shapes.
#[derive(Clone, Debug)]
struct Clock {
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Clock {
    fn new(duration_ms: f64) -> Self {
        assert!(
            duration_ms.is_finite() && duration_ms > 0.0,
            "tween duration must be a positive finite number of milliseconds, got {duration_ms}"
        );
        Self {
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance and return the new ratio. Clamps to the duration exactly.
    fn step(&mut self, delta_ms: f64) -> f64 {
        assert_delta(delta_ms);
        assert!(
            !self.is_complete(),
            "tween advanced past completion"
        );
        self.elapsed_ms = (self.elapsed_ms + delta_ms).min(self.duration_ms);
        self.ratio()
    }

    fn ratio(&self) -> f64 {
        self.elapsed_ms / self.duration_ms
    }

    fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// One value being animated: endpoints plus the easing curve between them.
#[derive(Clone, Debug)]
struct Animated {
    start: f64,
    target: f64,
    easing: Easing,
}

impl Animated {
    fn new(start: f64, target: f64, easing: Easing) -> Self {
        assert!(
            start.is_finite() && target.is_finite(),
            "tween endpoints must be finite, got {start} -> {target}"
        );
        Self {
            start,
            target,
            easing,
        }
    }

    /// Value at `ratio`. A finished ratio returns the stored target itself so
    /// the final value never goes through float arithmetic.
    fn value_at(&self, ratio: f64) -> f64 {
        if ratio >= 1.0 {
            self.target
        } else {
            value_from_ratio(self.start, self.target, (self.easing)(ratio))
        }
    }
}

/// Scalar tween: one number moving from a start to a target value.
///
/// # Example
///
/// ```rust
/// use curtain::core::{Routine, Step};
/// use curtain::tween::Tween;
///
/// let mut tween = Tween::new(0.0, 10.0, 1000.0);
/// assert_eq!(tween.advance(400.0), Step::Yield(4.0));
/// assert_eq!(tween.advance(400.0), Step::Yield(8.0));
/// // The last delta overshoots; the final value is still exactly the target.
/// assert_eq!(tween.advance(400.0), Step::Done(10.0));
/// ```
///
/// # Panics
///
/// Construction panics on a non-positive or non-finite duration; advancing
/// panics on a negative or non-finite delta, or after completion.
#[derive(Clone, Debug)]
pub struct Tween {
    value: Animated,
    clock: Clock,
}

impl Tween {
    /// Linear tween from `start` to `target` over `duration_ms`.
    pub fn new(start: f64, target: f64, duration_ms: f64) -> Self {
        Self::with_easing(start, target, duration_ms, easing::linear)
    }

    /// Tween with an explicit easing curve.
    pub fn with_easing(start: f64, target: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            value: Animated::new(start, target, easing),
            clock: Clock::new(duration_ms),
        }
    }

    /// Fraction of the duration elapsed so far, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.clock.ratio()
    }

    /// Value at the current clock position.
    pub fn value(&self) -> f64 {
        self.value.value_at(self.clock.ratio())
    }

    /// Whether the terminal step has been produced.
    pub fn is_complete(&self) -> bool {
        self.clock.is_complete()
    }
}

impl Routine for Tween {
    type Output = f64;

    fn advance(&mut self, delta_ms: f64) -> Step<f64> {
        let ratio = self.clock.step(delta_ms);
        let value = self.value.value_at(ratio);
        if self.clock.is_complete() {
            Step::Done(value)
        } else {
            Step::Yield(value)
        }
    }
}

/// Keyed tween: a set of named scalar tweens sharing one clock.
///
/// Each step produces a map from key to interpolated value, every key
/// progressing from the same elapsed-time ratio. The set of animated keys is
/// taken from the target map; the start map may carry extra keys, which are
/// ignored.
///
/// # Panics
///
/// Construction panics if the start map (or a per-key easing map) is missing
/// a key present in the target map, and on the same duration/endpoint
/// violations as [`Tween`].
#[derive(Clone, Debug)]
pub struct KeyedTween {
    values: BTreeMap<String, Animated>,
    clock: Clock,
}

impl KeyedTween {
    /// Linear keyed tween over `duration_ms`.
    pub fn new(
        start: &BTreeMap<String, f64>,
        target: &BTreeMap<String, f64>,
        duration_ms: f64,
    ) -> Self {
        Self::with_easing(start, target, duration_ms, easing::linear)
    }

    /// Keyed tween with one easing curve shared by every key.
    pub fn with_easing(
        start: &BTreeMap<String, f64>,
        target: &BTreeMap<String, f64>,
        duration_ms: f64,
        easing: Easing,
    ) -> Self {
        Self::build(start, target, duration_ms, |_| easing)
    }

    /// Keyed tween with a dedicated easing curve per key.
    pub fn with_easings(
        start: &BTreeMap<String, f64>,
        target: &BTreeMap<String, f64>,
        duration_ms: f64,
        easings: &BTreeMap<String, Easing>,
    ) -> Self {
        Self::build(start, target, duration_ms, |key| {
            *easings
                .get(key)
                .unwrap_or_else(|| panic!("keyed tween has no easing for key `{key}`"))
        })
    }

    fn build(
        start: &BTreeMap<String, f64>,
        target: &BTreeMap<String, f64>,
        duration_ms: f64,
        easing_for: impl Fn(&str) -> Easing,
    ) -> Self {
        let values = target
            .iter()
            .map(|(key, &target_value)| {
                let start_value = *start
                    .get(key)
                    .unwrap_or_else(|| panic!("keyed tween has no start value for key `{key}`"));
                let animated = Animated::new(start_value, target_value, easing_for(key));
                (key.clone(), animated)
            })
            .collect();
        Self {
            values,
            clock: Clock::new(duration_ms),
        }
    }

    /// Fraction of the duration elapsed so far, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.clock.ratio()
    }

    /// Values at the current clock position.
    pub fn values(&self) -> BTreeMap<String, f64> {
        self.values_at(self.clock.ratio())
    }

    /// Whether the terminal step has been produced.
    pub fn is_complete(&self) -> bool {
        self.clock.is_complete()
    }

    fn values_at(&self, ratio: f64) -> BTreeMap<String, f64> {
        self.values
            .iter()
            .map(|(key, animated)| (key.clone(), animated.value_at(ratio)))
            .collect()
    }
}

impl Routine for KeyedTween {
    type Output = BTreeMap<String, f64>;

    fn advance(&mut self, delta_ms: f64) -> Step<Self::Output> {
        let ratio = self.clock.step(delta_ms);
        let values = self.values_at(ratio);
        if self.clock.is_complete() {
            Step::Done(values)
        } else {
            Step::Yield(values)
        }
    }
}

/// Adapter feeding each value produced by a routine into a callback.
///
/// Turns a value-producing routine such as [`Tween`] into a
/// `Routine<Output = ()>` suitable for state transitions and animation-group
/// jobs. Created with [`drive`].
pub struct Driven<R, F> {
    inner: R,
    apply: F,
}

/// Drive `routine`, applying every produced value through `apply`.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use curtain::core::Routine;
/// use curtain::tween::{drive, Tween};
///
/// let alpha = Rc::new(Cell::new(0.0));
/// let cell = Rc::clone(&alpha);
/// let mut fade = drive(Tween::new(0.0, 1.0, 200.0), move |value| cell.set(value));
///
/// fade.advance(50.0);
/// assert_eq!(alpha.get(), 0.25);
/// ```
pub fn drive<R, F>(routine: R, apply: F) -> Driven<R, F>
where
    R: Routine,
    F: FnMut(R::Output),
{
    Driven {
        inner: routine,
        apply,
    }
}

impl<R, F> Routine for Driven<R, F>
where
    R: Routine,
    F: FnMut(R::Output),
{
    type Output = ();

    fn advance(&mut self, delta_ms: f64) -> Step<()> {
        match self.inner.advance(delta_ms) {
            Step::Yield(value) => {
                (self.apply)(value);
                Step::Yield(())
            }
            Step::Done(value) => {
                (self.apply)(value);
                Step::Done(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::easing::in_out_quad;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn scalar_tween_steps_through_its_duration() {
        let mut tween = Tween::new(0.0, 10.0, 1000.0);
        assert_eq!(tween.advance(400.0), Step::Yield(4.0));
        assert_eq!(tween.advance(400.0), Step::Yield(8.0));
        assert_eq!(tween.advance(400.0), Step::Done(10.0));
    }

    #[test]
    fn overshoot_lands_exactly_on_target() {
        // 0.1 + 0.2 is the canonical float that does not equal 0.3.
        let mut tween = Tween::new(0.1, 0.3, 100.0);
        let final_value = tween.advance(1000.0).into_value();
        assert_eq!(final_value.to_bits(), 0.3f64.to_bits());
    }

    #[test]
    fn descending_tween_lands_exactly_on_target() {
        let mut tween = Tween::new(1.0, 0.3, 250.0);
        assert!(tween.advance(100.0).into_value() < 1.0);
        assert_eq!(tween.advance(500.0), Step::Done(0.3));
    }

    #[test]
    fn zero_delta_repeats_previous_value() {
        let mut tween = Tween::new(0.0, 10.0, 1000.0);
        let first = tween.advance(250.0).into_value();
        assert_eq!(tween.advance(0.0), Step::Yield(first));
    }

    #[test]
    fn zero_delta_before_any_progress_yields_start() {
        let mut tween = Tween::new(3.0, 9.0, 500.0);
        assert_eq!(tween.advance(0.0), Step::Yield(3.0));
    }

    #[test]
    fn eased_tween_still_ends_on_target() {
        let mut tween = Tween::with_easing(2.0, 7.0, 300.0, in_out_quad);
        while !tween.is_complete() {
            tween.advance(47.0);
        }
        assert_eq!(tween.value(), 7.0);
    }

    #[test]
    #[should_panic(expected = "positive finite")]
    fn zero_duration_is_rejected() {
        Tween::new(0.0, 1.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "positive finite")]
    fn negative_duration_is_rejected() {
        Tween::new(0.0, 1.0, -100.0);
    }

    #[test]
    #[should_panic(expected = "advanced past completion")]
    fn advancing_a_finished_tween_panics() {
        let mut tween = Tween::new(0.0, 1.0, 100.0);
        tween.advance(100.0);
        tween.advance(16.0);
    }

    fn keys(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    #[test]
    fn keyed_tween_interpolates_each_key() {
        let mut tween = KeyedTween::new(
            &keys(&[("x", 0.0), ("y", 100.0)]),
            &keys(&[("x", 10.0), ("y", 0.0)]),
            1000.0,
        );
        let mid = tween.advance(500.0).into_value();
        assert_eq!(mid["x"], 5.0);
        assert_eq!(mid["y"], 50.0);
        let end = tween.advance(500.0);
        assert!(end.is_done());
        let end = end.into_value();
        assert_eq!(end["x"], 10.0);
        assert_eq!(end["y"], 0.0);
    }

    #[test]
    fn keyed_tween_ignores_extra_start_keys() {
        let start = keys(&[("x", 0.0), ("unrelated", 42.0)]);
        let target = keys(&[("x", 4.0)]);
        let mut tween = KeyedTween::new(&start, &target, 100.0);
        let end = tween.advance(100.0).into_value();
        assert_eq!(end.len(), 1);
        assert_eq!(end["x"], 4.0);
    }

    #[test]
    fn keyed_tween_supports_per_key_easing() {
        let easings: BTreeMap<String, Easing> = [
            ("a".to_string(), easing::linear as Easing),
            ("b".to_string(), in_out_quad as Easing),
        ]
        .into_iter()
        .collect();
        let mut tween = KeyedTween::with_easings(
            &keys(&[("a", 0.0), ("b", 0.0)]),
            &keys(&[("a", 1.0), ("b", 1.0)]),
            1000.0,
            &easings,
        );
        let quarter = tween.advance(250.0).into_value();
        assert_eq!(quarter["a"], 0.25);
        assert_eq!(quarter["b"], in_out_quad(0.25));
    }

    #[test]
    #[should_panic(expected = "no start value for key")]
    fn keyed_tween_requires_start_for_every_target_key() {
        KeyedTween::new(&keys(&[("x", 0.0)]), &keys(&[("x", 1.0), ("y", 1.0)]), 100.0);
    }

    #[test]
    #[should_panic(expected = "no easing for key")]
    fn keyed_tween_requires_easing_for_every_target_key() {
        let easings: BTreeMap<String, Easing> = BTreeMap::new();
        KeyedTween::with_easings(&keys(&[("x", 0.0)]), &keys(&[("x", 1.0)]), 100.0, &easings);
    }

    #[test]
    fn driven_applies_every_value_including_the_last() {
        let seen = Rc::new(Cell::new(0.0));
        let cell = Rc::clone(&seen);
        let mut driven = drive(Tween::new(0.0, 10.0, 100.0), move |value| cell.set(value));
        assert_eq!(driven.advance(50.0), Step::Yield(()));
        assert_eq!(seen.get(), 5.0);
        assert_eq!(driven.advance(50.0), Step::Done(()));
        assert_eq!(seen.get(), 10.0);
    }
}
