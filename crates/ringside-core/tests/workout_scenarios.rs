//! End-to-end workout scenarios driven through the public API.

use chrono::{Duration, Utc};
use ringside_core::{format_time, Event, IntervalTimer, Phase, TimerSettings};

fn three_by_three() -> IntervalTimer {
    IntervalTimer::new(TimerSettings {
        rounds: 3,
        round_duration: 180,
        rest_duration: 60,
        warning_time: 10,
    })
}

fn ticks(timer: &mut IntervalTimer, n: u32) -> Vec<Event> {
    (0..n).filter_map(|_| timer.tick()).collect()
}

#[test]
fn round_enters_warning_then_rest() {
    let mut timer = three_by_three();
    timer.start();

    ticks(&mut timer, 170);
    assert_eq!(timer.phase(), Phase::Round);
    assert_eq!(timer.state().time_remaining, 10);

    timer.tick();
    assert_eq!(timer.phase(), Phase::Warning);
    assert_eq!(timer.state().time_remaining, 9);

    ticks(&mut timer, 9);
    assert_eq!(timer.phase(), Phase::Rest);
    assert_eq!(timer.state().current_round, 1);
    assert_eq!(timer.state().time_remaining, 60);
}

#[test]
fn rest_leads_into_next_round() {
    let mut timer = three_by_three();
    timer.start();
    ticks(&mut timer, 180);
    assert_eq!(timer.phase(), Phase::Rest);

    let events = ticks(&mut timer, 60);
    assert_eq!(timer.phase(), Phase::Round);
    assert_eq!(timer.state().current_round, 2);
    assert_eq!(timer.state().time_remaining, 180);
    assert!(matches!(
        events.as_slice(),
        [Event::PhaseChanged { from: Phase::Rest, to: Phase::Round, current_round: 2, .. }]
    ));
}

#[test]
fn single_round_completes_without_rest() {
    let mut timer = IntervalTimer::new(TimerSettings {
        rounds: 1,
        round_duration: 180,
        rest_duration: 60,
        warning_time: 10,
    });
    timer.start();

    let events = ticks(&mut timer, 180);
    assert_eq!(timer.phase(), Phase::Complete);
    assert!(!timer.is_running());
    assert!(events
        .iter()
        .all(|e| !matches!(e, Event::PhaseChanged { to: Phase::Rest, .. })));
}

#[test]
fn paused_ticks_change_nothing() {
    let mut timer = three_by_three();
    timer.start();
    timer.pause();
    let before = *timer.state();

    assert!(ticks(&mut timer, 5).is_empty());
    assert_eq!(timer.state(), &before);
}

#[test]
fn background_replay_matches_live_ticking() {
    let mut live = three_by_three();
    live.start();
    ticks(&mut live, 75);

    let mut suspended = three_by_three();
    suspended.start();
    ticks(&mut suspended, 30);
    let t0 = Utc::now();
    assert!(suspended.enter_background_at(t0));
    suspended.enter_foreground_at(t0 + Duration::seconds(45));

    assert_eq!(suspended.state(), live.state());
    assert_eq!(suspended.state().time_remaining, 105);
}

#[test]
fn complete_is_terminal() {
    let mut timer = three_by_three();
    timer.start();
    ticks(&mut timer, 660);
    assert_eq!(timer.phase(), Phase::Complete);

    let done = *timer.state();
    assert!(ticks(&mut timer, 50).is_empty());
    assert_eq!(timer.state(), &done);
    assert!(timer.resume().is_none());
    assert!(!timer.is_running());
}

#[test]
fn reset_from_every_phase_returns_to_idle() {
    for n in [0u32, 5, 175, 200, 300, 659, 660, 700] {
        let mut timer = three_by_three();
        timer.start();
        ticks(&mut timer, n);
        timer.reset();

        let state = timer.state();
        assert_eq!(state.phase, Phase::Idle, "after {n} ticks");
        assert_eq!(state.current_round, 1);
        assert!(!state.is_running);
        assert_eq!(state.time_remaining, timer.settings().round_duration);
    }
}

#[test]
fn full_workout_emits_every_edge_in_order() {
    let mut timer = IntervalTimer::new(TimerSettings {
        rounds: 2,
        round_duration: 30,
        rest_duration: 15,
        warning_time: 5,
    });
    timer.start();
    let edges: Vec<_> = ticks(&mut timer, 200)
        .into_iter()
        .map(|e| match e {
            Event::PhaseChanged { to, .. } => to,
            Event::WorkoutCompleted { .. } => Phase::Complete,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(
        edges,
        vec![
            Phase::Warning,
            Phase::Rest,
            Phase::Round,
            Phase::Warning,
            Phase::Complete
        ]
    );
}

#[test]
fn format_time_examples() {
    assert_eq!(format_time(125), "2:05");
    assert_eq!(format_time(0), "0:00");
    assert_eq!(format_time(59), "0:59");
}
