//! Pure presentation helpers over a [`TimerState`] snapshot.
//!
//! Nothing here mutates state, so hosts may call these on every frame.

use serde::{Deserialize, Serialize};

use super::engine::{Phase, TimerState};

/// Render seconds as `M:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed share of the current phase, 0.0 ..= 100.0.
pub fn progress(state: &TimerState) -> f64 {
    match state.phase {
        Phase::Idle => 0.0,
        Phase::Complete => 100.0,
        Phase::Round | Phase::Warning | Phase::Rest => {
            let total = state.phase_duration();
            if total == 0 {
                return 0.0;
            }
            let elapsed = total.saturating_sub(state.time_remaining);
            (f64::from(elapsed) / f64::from(total) * 100.0).clamp(0.0, 100.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseColor {
    Green,
    Amber,
    Blue,
    Red,
    Gray,
}

impl PhaseColor {
    pub fn name(self) -> &'static str {
        match self {
            PhaseColor::Green => "green",
            PhaseColor::Amber => "amber",
            PhaseColor::Blue => "blue",
            PhaseColor::Red => "red",
            PhaseColor::Gray => "gray",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            PhaseColor::Green => "#22c55e",
            PhaseColor::Amber => "#f59e0b",
            PhaseColor::Blue => "#3b82f6",
            PhaseColor::Red => "#ef4444",
            PhaseColor::Gray => "#6b7280",
        }
    }

    /// 24-bit RGB components of [`hex`](Self::hex), for terminal hosts.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            PhaseColor::Green => (0x22, 0xc5, 0x5e),
            PhaseColor::Amber => (0xf5, 0x9e, 0x0b),
            PhaseColor::Blue => (0x3b, 0x82, 0xf6),
            PhaseColor::Red => (0xef, 0x44, 0x44),
            PhaseColor::Gray => (0x6b, 0x72, 0x80),
        }
    }
}

pub fn phase_color(phase: Phase) -> PhaseColor {
    match phase {
        Phase::Round => PhaseColor::Green,
        Phase::Warning => PhaseColor::Amber,
        Phase::Rest => PhaseColor::Blue,
        Phase::Complete => PhaseColor::Red,
        Phase::Idle => PhaseColor::Gray,
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "READY",
        Phase::Round => "FIGHT",
        Phase::Warning => "WARNING",
        Phase::Rest => "REST",
        Phase::Complete => "DONE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerSettings;

    #[test]
    fn format_time_pads_seconds_only() {
        assert_eq!(format_time(125), "2:05");
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(75), "1:15");
        assert_eq!(format_time(5), "0:05");
        assert_eq!(format_time(600), "10:00");
    }

    #[test]
    fn progress_by_phase() {
        let mut state = TimerState::idle(&TimerSettings::default());
        assert_eq!(progress(&state), 0.0);

        state.phase = Phase::Round;
        state.time_remaining = 90;
        assert_eq!(progress(&state), 50.0);

        state.phase = Phase::Warning;
        state.time_remaining = 0;
        assert_eq!(progress(&state), 100.0);

        state.phase = Phase::Rest;
        state.time_remaining = 45;
        assert_eq!(progress(&state), 25.0);

        state.phase = Phase::Complete;
        assert_eq!(progress(&state), 100.0);
    }

    #[test]
    fn colors_follow_phase() {
        assert_eq!(phase_color(Phase::Round), PhaseColor::Green);
        assert_eq!(phase_color(Phase::Warning), PhaseColor::Amber);
        assert_eq!(phase_color(Phase::Rest), PhaseColor::Blue);
        assert_eq!(phase_color(Phase::Complete), PhaseColor::Red);
        assert_eq!(phase_color(Phase::Idle), PhaseColor::Gray);
    }

    #[test]
    fn rgb_matches_hex() {
        for color in [
            PhaseColor::Green,
            PhaseColor::Amber,
            PhaseColor::Blue,
            PhaseColor::Red,
            PhaseColor::Gray,
        ] {
            let (r, g, b) = color.rgb();
            assert_eq!(format!("#{r:02x}{g:02x}{b:02x}"), color.hex());
        }
    }
}
