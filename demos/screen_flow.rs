//! Screen Flow
//!
//! This example demonstrates the core loop of an embedding application:
//! screens that fade in and out, routed by a state machine, driven by
//! fixed-delta frames.
//!
//! Key concepts:
//! - States whose enter/leave are multi-frame fade routines
//! - The driver contract: start once, one update per frame
//! - Actions pushed between frames, dropped while a transition is in flight
//!
//! Run with: cargo run --example screen_flow

use curtain::core::BoxRoutine;
use curtain::fader::ScreenFader;
use curtain::machine::{State, StateMachine, TransitionTable};

const FRAME_MS: f64 = 1000.0 / 30.0;

struct Screen {
    name: &'static str,
    fader: ScreenFader,
}

impl Screen {
    fn new(name: &'static str) -> Self {
        let mut fader = ScreenFader::new();
        fader.duration_ms = 300.0;
        Self { name, fader }
    }
}

impl State for Screen {
    fn enter(&mut self, _data: &()) -> BoxRoutine {
        println!("  [{}] entering", self.name);
        self.fader.fade_in_routine()
    }

    fn leave(&mut self, _data: &()) -> BoxRoutine {
        println!("  [{}] leaving", self.name);
        self.fader.fade_out_routine()
    }

    fn update(&mut self, delta_ms: f64) {
        self.fader.update(delta_ms);
    }
}

fn run_frames(machine: &mut StateMachine, frames: u32) {
    for _ in 0..frames {
        machine.update(FRAME_MS);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Screen Flow ===\n");

    let table = TransitionTable::new("title")
        .route("title", "start", "menu")
        .route("menu", "new_game", "session")
        .route("session", "game_over", "menu")
        .route_from_any("quit", "title");

    let mut machine = StateMachine::builder(table)
        .state("title", Screen::new("title"))
        .state("menu", Screen::new("menu"))
        .state("session", Screen::new("session"))
        .build()
        .expect("screen set matches the transition table");

    machine.start(());
    run_frames(&mut machine, 12);
    println!("current: {:?}\n", machine.current_state_id());

    println!("player presses start:");
    machine.push_action("start");
    // Actions during the fade are dropped, not queued.
    let accepted = machine.push_action("new_game");
    println!("  immediate second press accepted: {accepted}");
    run_frames(&mut machine, 20);
    println!("current: {:?}\n", machine.current_state_id());

    println!("player starts a game:");
    machine.push_action("new_game");
    run_frames(&mut machine, 20);
    println!("current: {:?}\n", machine.current_state_id());

    println!("game over, then quit from anywhere via the wildcard route:");
    machine.push_action("game_over");
    run_frames(&mut machine, 20);
    machine.push_action("quit");
    run_frames(&mut machine, 20);
    println!("current: {:?}", machine.current_state_id());

    machine.stop();
    println!("\nstopped; current: {:?}", machine.current_state_id());
}
