//! Curtain: a coroutine-driven state machine and tweening toolkit for
//! frame-stepped applications.
//!
//! Curtain is the scheduling substrate for screen flows that take time: a
//! fade between menus, a spawn sequence before gameplay, a game-over cut.
//! There is no thread and no async runtime; "concurrency" is the
//! interleaving of suspendable procedures across the discrete time deltas an
//! external driver feeds in, one per rendered frame.
//!
//! # Core Concepts
//!
//! - **Routine**: a resumable computation advanced by one time delta at a
//!   time, the explicit form of a coroutine (`curtain::core`)
//! - **Tween**: a routine producing interpolated values over a fixed
//!   duration, landing exactly on its target (`curtain::tween`)
//! - **State / StateMachine**: named units of behavior whose `enter`/`leave`
//!   are routines, owned by a machine that routes actions through a
//!   transition table and is itself a state, so machines nest
//!   (`curtain::machine`)
//! - **AnimationGroup**: simultaneously running routines as named,
//!   cancelable jobs (`curtain::anim`)
//! - **ScreenFader**: fade-in/fade-out routines pluggable into any state's
//!   `enter`/`leave` (`curtain::fader`)
//!
//! # Example
//!
//! ```rust
//! use curtain::core::BoxRoutine;
//! use curtain::fader::ScreenFader;
//! use curtain::machine::{State, StateMachine, TransitionTable};
//!
//! /// A screen that fades in on enter and out on leave.
//! struct Screen {
//!     fader: ScreenFader,
//! }
//!
//! impl State for Screen {
//!     fn enter(&mut self, _data: &()) -> BoxRoutine {
//!         self.fader.fade_in_routine()
//!     }
//!
//!     fn leave(&mut self, _data: &()) -> BoxRoutine {
//!         self.fader.fade_out_routine()
//!     }
//!
//!     fn update(&mut self, delta_ms: f64) {
//!         self.fader.update(delta_ms);
//!     }
//! }
//!
//! let table = TransitionTable::new("title").route("title", "play", "game");
//! let mut machine = StateMachine::builder(table)
//!     .state("title", Screen { fader: ScreenFader::new() })
//!     .state("game", Screen { fader: ScreenFader::new() })
//!     .build()
//!     .unwrap();
//!
//! // The driver: start once, then one update per frame.
//! machine.start(());
//! for _frame in 0..10 {
//!     machine.update(100.0); // title fades in over one second
//! }
//! assert!(!machine.is_transitioning());
//!
//! // A button callback requests the transition; the fade-out then fade-in
//! // play out over the following frames.
//! assert!(machine.push_action("play"));
//! for _frame in 0..25 {
//!     machine.update(100.0);
//! }
//! assert_eq!(machine.current_state_id(), Some("game"));
//! ```

pub mod anim;
pub mod core;
pub mod fader;
pub mod machine;
pub mod tween;

// Re-export commonly used types
pub use anim::{AnimationGroup, JobHandle, JobStatus};
pub use core::{noop, BoxRoutine, Routine, Step};
pub use fader::ScreenFader;
pub use machine::{ConfigError, State, StateMachine, TransitionTable};
pub use tween::{KeyedTween, Tween};
