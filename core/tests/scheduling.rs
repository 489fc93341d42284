//! Scheduling tests: cadence, pause/resume, interval changes and stale
//! tick tokens, all driven on logical time.

use life_core::{command::Command, config::EngineConfig, engine::SimEngine};

fn running(interval_ms: i64) -> SimEngine {
    let config = EngineConfig {
        interval_ms,
        start_paused: false,
        ..EngineConfig::default_test(6, 6)
    };
    let mut engine = SimEngine::new(&config);
    // Blinker, so every generation does real work.
    for (x, y) in [(1, 2), (2, 2), (3, 2)] {
        engine.toggle_cell(x, y).unwrap();
    }
    engine
}

#[test]
fn first_tick_waits_a_full_interval() {
    let mut engine = running(100);
    assert_eq!(engine.advance_to(99), 0);
    assert_eq!(engine.snapshot().generation, 0);
    assert_eq!(engine.advance_to(100), 1);
    assert_eq!(engine.snapshot().generation, 1);
}

#[test]
fn ticks_follow_the_interval() {
    let mut engine = running(100);
    assert_eq!(engine.advance_to(1_000), 10);
    let snap = engine.snapshot();
    assert_eq!(snap.generation, 10);
    assert_eq!(snap.total_simulated_ms, 1_000);
    assert_eq!(engine.advance_by(250), 2);
    assert_eq!(engine.pending_tick().map(|t| t.due_ms), Some(1_300));
}

#[test]
fn simulated_time_is_logical() {
    let mut engine = running(1);
    engine.advance_to(5);
    assert_eq!(engine.snapshot().total_simulated_ms, 5);
    engine.set_interval(1_000);
    engine.advance_by(3_000);
    let snap = engine.snapshot();
    assert_eq!(snap.generation, 8);
    assert_eq!(snap.total_simulated_ms, 3_005);
}

#[test]
fn pause_stops_all_stepping() {
    let mut engine = running(10);
    engine.advance_to(35);
    let generation = engine.snapshot().generation;
    assert_eq!(generation, 3);

    engine.pause();
    assert!(engine.pending_tick().is_none());
    for _ in 0..50 {
        assert_eq!(engine.advance_by(1_000), 0);
    }
    assert_eq!(engine.snapshot().generation, generation);
}

#[test]
fn pause_cancels_an_already_issued_tick() {
    let mut engine = running(100);
    let tick = engine.pending_tick().expect("running engine has a tick armed");
    engine.pause();
    assert!(!engine.fire(tick, 10_000), "cancelled tick fired");
    assert_eq!(engine.snapshot().generation, 0);

    // Resuming arms a new token; the old one stays dead.
    engine.resume();
    assert!(!engine.fire(tick, 20_000), "stale tick fired after resume");
    assert_eq!(engine.snapshot().generation, 0);
}

#[test]
fn tick_cannot_fire_early() {
    let mut engine = running(100);
    let tick = engine.pending_tick().unwrap();
    assert!(!engine.fire(tick, 50));
    assert!(engine.fire(tick, 100));
    assert!(!engine.fire(tick, 1_000), "a tick fires at most once");
    assert_eq!(engine.snapshot().generation, 1);
}

#[test]
fn resume_waits_a_full_interval() {
    let mut engine = running(100);
    engine.pause();
    engine.advance_to(1_234);
    engine.resume();
    assert_eq!(engine.pending_tick().map(|t| t.due_ms), Some(1_334));
    assert_eq!(engine.advance_to(1_333), 0);
    assert_eq!(engine.advance_to(1_334), 1);
}

#[test]
fn resume_while_running_keeps_cadence() {
    let mut engine = running(100);
    engine.advance_to(50);
    let before = engine.pending_tick();
    engine.resume();
    assert_eq!(engine.pending_tick(), before);
}

#[test]
fn interval_change_restarts_the_cadence() {
    let mut engine = running(100);
    engine.advance_to(150);
    assert_eq!(engine.snapshot().generation, 1);

    engine.set_interval(500);
    assert_eq!(engine.pending_tick().map(|t| t.due_ms), Some(650));
    assert_eq!(engine.advance_to(649), 0);
    assert_eq!(engine.advance_to(650), 1);
}

#[test]
fn interval_change_while_paused_does_not_resume() {
    let mut engine = running(100);
    engine.pause();
    engine.set_interval(5);
    assert!(engine.is_paused());
    assert!(engine.pending_tick().is_none());
    assert_eq!(engine.advance_by(1_000), 0);
}

#[test]
fn resize_while_paused_does_not_resume() {
    let mut engine = running(100);
    engine.pause();
    engine.resize(9, 9);
    engine.reset();
    assert!(engine.is_paused());
    assert_eq!(engine.advance_by(1_000), 0);
}

#[test]
fn resize_while_running_keeps_running() {
    let mut engine = running(100);
    engine.advance_to(250);
    engine.resize(4, 4);
    assert!(!engine.is_paused());
    engine.advance_to(400);
    let snap = engine.snapshot();
    assert_eq!(snap.generation, 2, "generation counts again from the resize");
    assert_eq!(snap.total_simulated_ms, 200);
}

#[test]
fn late_fire_delays_the_next_tick() {
    let mut engine = running(100);
    let tick = engine.pending_tick().unwrap();
    // Driver woke up 3.5 intervals late: one step, then a full interval.
    assert!(engine.fire(tick, 450));
    assert_eq!(engine.snapshot().generation, 1);
    assert_eq!(engine.pending_tick().map(|t| t.due_ms), Some(550));
}

#[test]
fn resume_after_idle_pause_arms_from_driver_time() {
    let mut engine = running(1_000);
    engine.pause();

    // Time passes with no ticks fired; the driver only reports it.
    engine.set_now(3_000);
    let snap = engine.apply(Command::parse_line("resume").unwrap()).unwrap();
    assert!(!snap.paused);

    let due = engine.pending_tick().map(|t| t.due_ms).unwrap();
    assert!(due >= 4_000, "resume armed at {due}, before a full interval had passed");
    assert_eq!(engine.advance_to(3_999), 0);
    assert_eq!(engine.advance_to(4_000), 1);
}

#[test]
fn interval_change_arms_from_driver_time() {
    let mut engine = running(100);
    engine.advance_to(100);
    engine.set_now(180);
    engine.apply(Command::SetInterval { ms: 500 }).unwrap();
    assert_eq!(engine.pending_tick().map(|t| t.due_ms), Some(680));
    assert_eq!(engine.advance_to(679), 0);
}

#[test]
fn driver_time_never_moves_backwards() {
    let mut engine = running(100);
    engine.set_now(500);
    engine.set_now(200);
    assert_eq!(engine.now_ms(), 500);
    assert_eq!(engine.snapshot().generation, 0, "set_now must not step");
}
