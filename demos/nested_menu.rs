//! Nested Menu
//!
//! This example demonstrates machine nesting: a gameplay session that is
//! itself a state machine (playing/paused), registered as a single state of
//! the outer machine.
//!
//! Key concepts:
//! - A machine satisfies the State contract, so it nests without special
//!   casing
//! - Actions the outer table has no route for are forwarded to the nested
//!   machine
//! - Stopping the outer machine recursively stops the nested one
//!
//! Run with: cargo run --example nested_menu

use curtain::core::{noop, BoxRoutine};
use curtain::machine::{State, StateMachine, TransitionTable};

const FRAME_MS: f64 = 1000.0 / 30.0;

/// Instant-transition screen that narrates its lifecycle.
struct Screen {
    name: &'static str,
}

impl State for Screen {
    fn enter(&mut self, _data: &()) -> BoxRoutine {
        println!("  [{}] entered", self.name);
        noop()
    }

    fn leave(&mut self, _data: &()) -> BoxRoutine {
        println!("  [{}] left", self.name);
        noop()
    }

    fn update(&mut self, _delta_ms: f64) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Nested Menu ===\n");

    let session = StateMachine::builder(
        TransitionTable::new("playing")
            .route("playing", "pause", "paused")
            .route("paused", "resume", "playing"),
    )
    .state("playing", Screen { name: "playing" })
    .state("paused", Screen { name: "paused" })
    .build()
    .expect("session states match its table");

    let mut machine = StateMachine::builder(
        TransitionTable::new("menu").route("menu", "new_game", "session"),
    )
    .state("menu", Screen { name: "menu" })
    .state("session", session)
    .build()
    .expect("outer states match its table");

    machine.start(());
    machine.update(FRAME_MS);

    println!("\nstarting a game (enters the session, which starts playing):");
    machine.push_action("new_game");
    machine.update(FRAME_MS);

    println!("\npausing (no outer route; forwarded into the session):");
    let accepted = machine.push_action("pause");
    machine.update(FRAME_MS);
    println!("  accepted: {accepted}");

    println!("\nresuming:");
    machine.push_action("resume");
    machine.update(FRAME_MS);

    println!("\nan action neither machine routes is declined:");
    let accepted = machine.push_action("wibble");
    println!("  accepted: {accepted}");

    println!("\nstopping the outer machine stops the session recursively:");
    machine.stop();
    println!("current: {:?}", machine.current_state_id());
}
