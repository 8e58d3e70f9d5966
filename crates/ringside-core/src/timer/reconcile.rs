//! Background reconciliation.
//!
//! Hosts that get suspended (mobile apps, laptops going to sleep) stop
//! delivering ticks. The host reports the suspension edge with
//! `enter_background` and the wake-up edge with `enter_foreground`; the
//! engine then replays one `tick()` per whole elapsed second, so a long
//! absence walks through `round -> rest -> round` exactly like live ticking.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::engine::IntervalTimer;
use crate::events::Event;

impl IntervalTimer {
    /// Record the suspension instant. Ignored unless the timer is running.
    ///
    /// Returns true if an instant was recorded.
    pub fn enter_background_at(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_running() {
            debug!("backgrounded while not running; nothing to reconcile");
            return false;
        }
        self.suspended_at = Some(now);
        debug!(at = %now, "suspension recorded");
        true
    }

    pub fn enter_background(&mut self) -> bool {
        self.enter_background_at(Utc::now())
    }

    /// Replay the ticks missed since `enter_background_at`.
    ///
    /// Returns the phase-change events produced during replay followed by a
    /// `Reconciled` summary. Empty if no suspension was recorded.
    pub fn enter_foreground_at(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let Some(since) = self.suspended_at.take() else {
            return Vec::new();
        };

        // Clock moving backwards counts as no time passing.
        let elapsed_secs = u64::try_from((now - since).num_seconds()).unwrap_or(0);

        let mut events = Vec::new();
        let mut ticks_applied = 0u64;
        for _ in 0..elapsed_secs {
            // Further ticks are no-ops once the workout has finished.
            if !self.is_running() {
                break;
            }
            if let Some(event) = self.tick() {
                events.push(event);
            }
            ticks_applied += 1;
        }

        info!(elapsed_secs, ticks_applied, "reconciled after background");
        events.push(Event::Reconciled {
            elapsed_secs,
            ticks_applied,
            at: now,
        });
        events
    }

    pub fn enter_foreground(&mut self) -> Vec<Event> {
        self.enter_foreground_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::timer::{Phase, TimerSettings};

    fn timer() -> IntervalTimer {
        IntervalTimer::new(TimerSettings {
            rounds: 3,
            round_duration: 180,
            rest_duration: 60,
            warning_time: 10,
        })
    }

    #[test]
    fn background_while_idle_is_ignored() {
        let mut timer = timer();
        let t0 = Utc::now();
        assert!(!timer.enter_background_at(t0));
        assert!(timer.enter_foreground_at(t0 + Duration::seconds(30)).is_empty());
        assert_eq!(timer.phase(), Phase::Idle);
    }

    #[test]
    fn background_while_paused_is_ignored() {
        let mut timer = timer();
        timer.start();
        timer.pause();
        let before = *timer.state();
        let t0 = Utc::now();
        assert!(!timer.enter_background_at(t0));
        timer.enter_foreground_at(t0 + Duration::seconds(90));
        assert_eq!(timer.state(), &before);
    }

    #[test]
    fn pause_after_backgrounding_drops_recorded_instant() {
        let mut timer = timer();
        timer.start();
        timer.tick();
        let t0 = Utc::now();
        assert!(timer.enter_background_at(t0));
        assert!(timer.pause().is_some());
        assert!(timer.suspended_at().is_none());

        let paused = *timer.state();
        assert!(timer.enter_foreground_at(t0 + Duration::seconds(90)).is_empty());
        assert_eq!(timer.state(), &paused);
        assert_eq!(timer.state().time_remaining, 179);
    }

    #[test]
    fn replay_walks_through_rest_into_next_round() {
        let mut timer = timer();
        timer.start();
        let t0 = Utc::now();
        timer.enter_background_at(t0);
        let events = timer.enter_foreground_at(t0 + Duration::seconds(180 + 60 + 5));

        assert_eq!(timer.phase(), Phase::Round);
        assert_eq!(timer.state().current_round, 2);
        assert_eq!(timer.state().time_remaining, 175);

        let changes = events
            .iter()
            .filter(|e| matches!(e, Event::PhaseChanged { .. }))
            .count();
        // round->warning, warning->rest, rest->round
        assert_eq!(changes, 3);
        assert!(matches!(
            events.last(),
            Some(Event::Reconciled { elapsed_secs: 245, ticks_applied: 245, .. })
        ));
    }

    #[test]
    fn replay_stops_at_completion() {
        let mut timer = timer();
        timer.start();
        let t0 = Utc::now();
        timer.enter_background_at(t0);
        let events = timer.enter_foreground_at(t0 + Duration::hours(2));

        assert_eq!(timer.phase(), Phase::Complete);
        assert!(!timer.is_running());
        assert_eq!(timer.state().time_remaining, 0);
        assert!(matches!(
            events.last(),
            Some(Event::Reconciled { ticks_applied: 660, .. })
        ));
    }

    #[test]
    fn instant_is_cleared_after_reconciliation() {
        let mut timer = timer();
        timer.start();
        let t0 = Utc::now();
        timer.enter_background_at(t0);
        timer.enter_foreground_at(t0 + Duration::seconds(10));
        assert!(timer.suspended_at().is_none());

        let before = *timer.state();
        assert!(timer.enter_foreground_at(t0 + Duration::seconds(100)).is_empty());
        assert_eq!(timer.state(), &before);
    }

    #[test]
    fn reset_clears_recorded_instant() {
        let mut timer = timer();
        timer.start();
        timer.enter_background_at(Utc::now());
        timer.reset();
        assert!(timer.suspended_at().is_none());
    }

    #[test]
    fn clock_going_backwards_applies_no_ticks() {
        let mut timer = timer();
        timer.start();
        let t0 = Utc::now();
        timer.enter_background_at(t0);
        timer.enter_foreground_at(t0 - Duration::seconds(30));
        assert_eq!(timer.state().time_remaining, 180);
    }

    #[test]
    fn partial_seconds_are_truncated() {
        let mut timer = timer();
        timer.start();
        let t0 = Utc::now();
        timer.enter_background_at(t0);
        timer.enter_foreground_at(t0 + Duration::milliseconds(2_900));
        assert_eq!(timer.state().time_remaining, 178);
    }
}
