// Host-side tests for the frame-loop stop gate.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::LoopGate;

#[test]
fn gate_starts_in_the_running_state() {
    assert!(LoopGate::new().permits_tick());
    assert!(LoopGate::default().permits_tick());
}

#[test]
fn no_ticks_run_after_stop() {
    let gate = LoopGate::new();
    let mut frames = 0u32;
    // The loop body mirrors the tick closure: check the gate, then work.
    let tick = |gate: &LoopGate, frames: &mut u32| {
        if gate.permits_tick() {
            *frames += 1;
        }
    };

    for _ in 0..3 {
        tick(&gate, &mut frames);
    }
    assert_eq!(frames, 3);

    gate.stop();
    for _ in 0..5 {
        tick(&gate, &mut frames);
    }
    assert_eq!(frames, 3, "a stopped gate must not admit further frames");
}

#[test]
fn stop_is_permanent() {
    let gate = LoopGate::new();
    gate.stop();
    gate.stop();
    assert!(!gate.permits_tick());
}
