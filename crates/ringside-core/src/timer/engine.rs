//! Round/rest interval timer engine.
//!
//! The engine is a tick-driven state machine. It owns no threads and no
//! timers: the host calls `tick()` once per real second while
//! `is_running()` is true, and re-reads `state()` after every call.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Round -> [Warning] -> Rest -> Round -> ... -> Complete
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = IntervalTimer::new(TimerSettings::default());
//! timer.start();
//! // Once per second while timer.is_running():
//! if let Some(event) = timer.tick() { /* play a bell */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::display;
use super::preset::TimerPreset;
use super::settings::{SettingsPatch, TimerSettings};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Round,
    /// Entered once fewer than `warning_time` seconds of a round remain.
    /// Same countdown as `Round`.
    Warning,
    Rest,
    Complete,
}

impl Phase {
    /// True while a countdown is live (round, warning or rest).
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Round | Phase::Warning | Phase::Rest)
    }
}

/// Runtime snapshot of the timer.
///
/// Duration fields are copied from the settings at start/reset, so editing
/// settings mid-workout never changes a live countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub is_running: bool,
    /// 1-indexed.
    pub current_round: u32,
    pub total_rounds: u32,
    pub round_duration: u32,
    pub rest_duration: u32,
    pub warning_time: u32,
    /// Seconds left in the current phase.
    pub time_remaining: u32,
}

impl TimerState {
    /// Idle state for the given settings.
    pub fn idle(settings: &TimerSettings) -> Self {
        Self {
            phase: Phase::Idle,
            is_running: false,
            current_round: 1,
            total_rounds: settings.rounds,
            round_duration: settings.round_duration,
            rest_duration: settings.rest_duration,
            warning_time: settings.warning_time,
            time_remaining: settings.round_duration,
        }
    }

    /// Length of the countdown the current phase started from.
    pub fn phase_duration(&self) -> u32 {
        match self.phase {
            Phase::Rest => self.rest_duration,
            _ => self.round_duration,
        }
    }
}

/// Core interval timer.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    settings: TimerSettings,
    preset_id: Option<String>,
    state: TimerState,
    /// Wall-clock instant of the last `start()`.
    started_at: Option<DateTime<Utc>>,
    /// Wall-clock instant the host was backgrounded while running.
    pub(super) suspended_at: Option<DateTime<Utc>>,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl IntervalTimer {
    /// Create an idle timer. Settings are normalized into range first.
    pub fn new(mut settings: TimerSettings) -> Self {
        settings.normalize();
        Self {
            state: TimerState::idle(&settings),
            settings,
            preset_id: None,
            started_at: None,
            suspended_at: None,
        }
    }

    /// Create an idle timer from a preset.
    pub fn with_preset(preset: &TimerPreset) -> Self {
        let mut timer = Self::new(preset.settings());
        timer.preset_id = Some(preset.id.to_string());
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Id of the preset the settings came from, if they were not edited since.
    pub fn preset_id(&self) -> Option<&str> {
        self.preset_id.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn suspended_at(&self) -> Option<DateTime<Utc>> {
        self.suspended_at
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let color = display::phase_color(self.state.phase);
        Event::StateSnapshot {
            phase: self.state.phase,
            is_running: self.state.is_running,
            current_round: self.state.current_round,
            total_rounds: self.state.total_rounds,
            time_remaining: self.state.time_remaining,
            display_time: display::format_time(self.state.time_remaining),
            progress_pct: display::progress(&self.state),
            color: color.name().to_string(),
            color_hex: color.hex().to_string(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a workout from round 1.
    ///
    /// Only honored from `Idle` or `Complete`. Mid-workout (running or
    /// paused) this is a no-op; use `reset()` first to restart.
    pub fn start(&mut self) -> Option<Event> {
        match self.state.phase {
            Phase::Idle | Phase::Complete => {
                self.state = TimerState {
                    phase: Phase::Round,
                    is_running: true,
                    ..TimerState::idle(&self.settings)
                };
                let now = Utc::now();
                self.started_at = Some(now);
                self.suspended_at = None;
                info!(
                    rounds = self.state.total_rounds,
                    round_duration = self.state.round_duration,
                    rest_duration = self.state.rest_duration,
                    "timer started"
                );
                Some(Event::TimerStarted {
                    total_rounds: self.state.total_rounds,
                    round_duration: self.state.round_duration,
                    at: now,
                })
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running || !self.state.phase.is_active() {
            return None;
        }
        self.state.is_running = false;
        self.suspended_at = None;
        debug!(phase = ?self.state.phase, remaining = self.state.time_remaining, "timer paused");
        Some(Event::TimerPaused {
            phase: self.state.phase,
            time_remaining: self.state.time_remaining,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state.is_running || !self.state.phase.is_active() {
            return None;
        }
        self.state.is_running = true;
        debug!(phase = ?self.state.phase, remaining = self.state.time_remaining, "timer resumed");
        Some(Event::TimerResumed {
            phase: self.state.phase,
            time_remaining: self.state.time_remaining,
            at: Utc::now(),
        })
    }

    /// Return to `Idle` from any phase, reloading durations from settings.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::idle(&self.settings);
        self.started_at = None;
        self.suspended_at = None;
        info!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some` when the tick crossed a phase boundary.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.is_running || !self.state.phase.is_active() {
            return None;
        }

        let from = self.state.phase;
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);

        if self.state.time_remaining > 0 {
            if from == Phase::Round && self.state.time_remaining < self.state.warning_time {
                self.state.phase = Phase::Warning;
                return Some(self.phase_changed(from));
            }
            return None;
        }

        match from {
            Phase::Round | Phase::Warning => {
                if self.state.current_round >= self.state.total_rounds {
                    self.state.phase = Phase::Complete;
                    self.state.is_running = false;
                    self.state.time_remaining = 0;
                    self.suspended_at = None;
                    info!(rounds = self.state.total_rounds, "workout complete");
                    return Some(Event::WorkoutCompleted {
                        total_rounds: self.state.total_rounds,
                        at: Utc::now(),
                    });
                }
                self.state.phase = Phase::Rest;
                self.state.time_remaining = self.state.rest_duration;
            }
            Phase::Rest => {
                self.state.current_round += 1;
                self.state.phase = Phase::Round;
                self.state.time_remaining = self.state.round_duration;
            }
            Phase::Idle | Phase::Complete => return None,
        }
        Some(self.phase_changed(from))
    }

    /// Merge a settings patch.
    ///
    /// While idle the snapshot is reloaded from the new settings. Otherwise
    /// the live countdown is untouched and the change applies on the next
    /// start or reset.
    pub fn set_settings(&mut self, patch: &SettingsPatch) -> Option<Event> {
        let before = self.settings;
        self.settings.apply(patch);
        if self.settings == before {
            return None;
        }
        self.preset_id = None;
        if self.state.phase == Phase::Idle {
            self.state = TimerState::idle(&self.settings);
        }
        debug!(settings = ?self.settings, "settings changed");
        Some(Event::SettingsChanged {
            rounds: self.settings.rounds,
            round_duration: self.settings.round_duration,
            rest_duration: self.settings.rest_duration,
            warning_time: self.settings.warning_time,
            at: Utc::now(),
        })
    }

    /// Replace settings wholesale with a preset and reset to idle.
    ///
    /// Cancels any workout in progress.
    pub fn select_preset(&mut self, preset: &TimerPreset) -> Event {
        self.settings = preset.settings();
        self.settings.normalize();
        self.preset_id = Some(preset.id.to_string());
        self.reset();
        info!(preset = preset.id, "preset selected");
        Event::PresetSelected {
            preset_id: preset.id.to_string(),
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_changed(&self, from: Phase) -> Event {
        debug!(
            ?from,
            to = ?self.state.phase,
            round = self.state.current_round,
            remaining = self.state.time_remaining,
            "phase changed"
        );
        Event::PhaseChanged {
            from,
            to: self.state.phase,
            current_round: self.state.current_round,
            time_remaining: self.state.time_remaining,
            at: Utc::now(),
        }
    }
}
