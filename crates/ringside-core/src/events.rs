use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every observable state change in the engine produces an Event.
/// Hosts use them as edges for sound/haptic feedback; the full state is
/// always available from the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        total_rounds: u32,
        round_duration: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        time_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        time_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The phase changed on a tick.
    PhaseChanged {
        from: Phase,
        to: Phase,
        current_round: u32,
        time_remaining: u32,
        at: DateTime<Utc>,
    },
    /// Final round finished. The engine is now terminal until reset.
    WorkoutCompleted {
        total_rounds: u32,
        at: DateTime<Utc>,
    },
    SettingsChanged {
        rounds: u32,
        round_duration: u32,
        rest_duration: u32,
        warning_time: u32,
        at: DateTime<Utc>,
    },
    PresetSelected {
        preset_id: String,
        at: DateTime<Utc>,
    },
    /// Missed ticks were replayed after the host came back to the foreground.
    Reconciled {
        elapsed_secs: u64,
        ticks_applied: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        is_running: bool,
        current_round: u32,
        total_rounds: u32,
        time_remaining: u32,
        display_time: String,
        progress_pct: f64,
        color: String,
        color_hex: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for events a host should mark with audio/haptic feedback.
    pub fn is_phase_edge(&self) -> bool {
        matches!(
            self,
            Event::PhaseChanged { .. } | Event::WorkoutCompleted { .. } | Event::TimerStarted { .. }
        )
    }
}
