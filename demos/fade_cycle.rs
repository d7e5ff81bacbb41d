//! Fade Cycle
//!
//! This example demonstrates the animation layer on its own: a screen fader
//! running as cancelable jobs, plus routine combinators sequencing and
//! grouping timed work.
//!
//! Key concepts:
//! - Jobs on an AnimationGroup, advanced once per frame
//! - Replace-on-conflict: a new fade cancels the one in flight
//! - wait/delay/in_parallel combinators
//!
//! Run with: cargo run --example fade_cycle

use curtain::anim::{delay, in_parallel, wait, AnimationGroup};
use curtain::core::BoxRoutine;
use curtain::fader::{ScreenFader, Surface};
use curtain::tween::{drive, Tween};

const FRAME_MS: f64 = 50.0;

/// Prints overlay draws instead of rendering them.
struct Console;

impl Surface for Console {
    fn cover(&mut self, color: [u8; 3], opacity: f64) {
        println!("    overlay {color:?} at {opacity:.2}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Fade Cycle ===\n");

    let mut fader = ScreenFader::new();
    fader.duration_ms = 400.0;
    let mut surface = Console;

    println!("fading in:");
    let fade = fader.fade_in();
    while !fade.is_finished() {
        fader.update(FRAME_MS);
        fader.display(&mut surface);
    }
    println!("revealed; alpha = {}\n", fader.alpha());

    println!("fade out, reversed mid-way (the first job is canceled):");
    let out = fader.fade_out();
    for _ in 0..4 {
        fader.update(FRAME_MS);
    }
    println!("  at alpha {:.2}, changed our mind", fader.alpha());
    let back_in = fader.fade_in();
    while !back_in.is_finished() {
        fader.update(FRAME_MS);
    }
    println!(
        "  out fade canceled: {}; alpha = {}\n",
        out.is_canceled(),
        fader.alpha()
    );

    println!("combinators on a plain AnimationGroup:");
    let mut group = AnimationGroup::new();
    let burst: Vec<BoxRoutine> = vec![
        Box::new(drive(Tween::new(0.0, 100.0, 300.0), |x| {
            println!("    spark at {x:.0}")
        })),
        Box::new(delay(
            200.0,
            Box::new(drive(Tween::new(100.0, 0.0, 200.0), |x| {
                println!("    echo at {x:.0}")
            })),
        )),
        Box::new(wait(150.0)),
    ];
    let all = group.play(Box::new(in_parallel(burst)));
    let mut frames = 0;
    while !all.is_finished() {
        group.update(FRAME_MS);
        frames += 1;
    }
    println!("burst finished after {frames} frames");
}
