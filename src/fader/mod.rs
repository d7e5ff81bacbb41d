//! Screen fading: a state-agnostic fade-to-color overlay.
//!
//! [`ScreenFader`] wraps one alpha tween inside the animation group's
//! cancelable-job protocol and hands out fade routines pluggable straight
//! into any state's `enter`/`leave`. Starting a new fade always cancels the
//! one in flight, so two tweens never fight over the same alpha value (the
//! observed failure mode otherwise being a visible flicker when a fade is
//! reversed mid-way).

use std::cell::Cell;
use std::rc::Rc;

use crate::anim::{AnimationGroup, JobHandle};
use crate::core::BoxRoutine;
use crate::tween::{drive, Tween};

/// Default fade duration, matching a comfortable screen transition.
pub const DEFAULT_FADE_DURATION_MS: f64 = 1000.0;

/// The one rendering capability the fader needs from its embedding
/// application: covering the whole viewport with a color at some opacity.
pub trait Surface {
    /// Cover the viewport with `color` at `opacity` in `[0, 1]`.
    fn cover(&mut self, color: [u8; 3], opacity: f64);
}

/// Fades the screen in and out by animating an overlay's transparency.
///
/// `alpha` is screen visibility: `1.0` means fully revealed (nothing drawn),
/// `0.0` means fully covered by the overlay color. A freshly built fader
/// starts covered, ready to fade in.
///
/// # Example
///
/// ```rust
/// use curtain::core::Routine;
/// use curtain::fader::ScreenFader;
///
/// let mut fader = ScreenFader::new();
/// let mut fade_in = fader.fade_in_routine();
///
/// // The machine (or any driver) advances the routine each frame; deltas
/// // overshooting the duration still land on alpha exactly 1.
/// while !fade_in.advance(400.0).is_done() {}
/// assert_eq!(fader.alpha(), 1.0);
/// assert!(!fader.is_fading());
/// ```
pub struct ScreenFader {
    /// How long a full fade takes.
    pub duration_ms: f64,
    /// Overlay color.
    pub color: [u8; 3],
    alpha: Rc<Cell<f64>>,
    target: f64,
    animator: AnimationGroup,
    current: Option<JobHandle>,
}

impl ScreenFader {
    /// Black fader, one second per fade, starting fully covered.
    pub fn new() -> Self {
        Self {
            duration_ms: DEFAULT_FADE_DURATION_MS,
            color: [0, 0, 0],
            alpha: Rc::new(Cell::new(0.0)),
            target: 1.0,
            animator: AnimationGroup::new(),
            current: None,
        }
    }

    /// Current screen visibility in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.alpha.get()
    }

    /// Whether a fade has not yet reached its target.
    pub fn is_fading(&self) -> bool {
        self.alpha.get() != self.target
    }

    /// Drive fades started through [`fade_in`]/[`fade_out`]. Call once per
    /// frame. Fade routines handed to a state machine are advanced by the
    /// machine instead and need no call here.
    ///
    /// [`fade_in`]: ScreenFader::fade_in
    /// [`fade_out`]: ScreenFader::fade_out
    pub fn update(&mut self, delta_ms: f64) {
        self.animator.update(delta_ms);
    }

    /// Draw the overlay: covers the screen at `1 - alpha` opacity, drawing
    /// nothing once fully revealed. Call last in the frame's rendering.
    pub fn display(&self, surface: &mut dyn Surface) {
        let alpha = self.alpha.get();
        if alpha != 1.0 {
            surface.cover(self.color, 1.0 - alpha);
        }
    }

    /// Cancel the fade in flight, if any, leaving alpha wherever it was.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    /// Fade routine revealing the screen (alpha toward 1), suitable as a
    /// state's `enter`. Cancels any fade in flight first.
    pub fn fade_in_routine(&mut self) -> BoxRoutine {
        self.fade_routine_to(1.0)
    }

    /// Fade routine covering the screen (alpha toward 0), suitable as a
    /// state's `leave`. Cancels any fade in flight first.
    pub fn fade_out_routine(&mut self) -> BoxRoutine {
        self.fade_routine_to(0.0)
    }

    /// Run a fade-in as a job on the fader's own animator, driven by
    /// [`update`]. Returns the cancelable handle.
    ///
    /// [`update`]: ScreenFader::update
    pub fn fade_in(&mut self) -> JobHandle {
        let routine = self.fade_in_routine();
        let handle = self.animator.play(routine);
        self.current = Some(handle.clone());
        handle
    }

    /// Run a fade-out as a job on the fader's own animator, driven by
    /// [`update`]. Returns the cancelable handle.
    ///
    /// [`update`]: ScreenFader::update
    pub fn fade_out(&mut self) -> JobHandle {
        let routine = self.fade_out_routine();
        let handle = self.animator.play(routine);
        self.current = Some(handle.clone());
        handle
    }

    /// The fade starts from wherever alpha currently is, so replacing a fade
    /// mid-way reverses smoothly instead of jumping.
    fn fade_routine_to(&mut self, target: f64) -> BoxRoutine {
        self.cancel();
        self.target = target;
        tracing::trace!(from = self.alpha.get(), to = target, "fade begins");
        let cell = Rc::clone(&self.alpha);
        let tween = Tween::new(self.alpha.get(), target, self.duration_ms);
        Box::new(drive(tween, move |value| cell.set(value)))
    }
}

impl Default for ScreenFader {
    fn default() -> Self {
        Self::new()
    }
}
