use serde::Serialize;

use super::settings::TimerSettings;

/// A named, immutable bundle of timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub rounds: u32,
    pub round_duration: u32,
    pub rest_duration: u32,
    pub warning_time: u32,
}

impl TimerPreset {
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            rounds: self.rounds,
            round_duration: self.round_duration,
            rest_duration: self.rest_duration,
            warning_time: self.warning_time,
        }
    }
}

const fn preset(
    id: &'static str,
    name: &'static str,
    rounds: u32,
    round_duration: u32,
    rest_duration: u32,
) -> TimerPreset {
    TimerPreset {
        id,
        name,
        rounds,
        round_duration,
        rest_duration,
        warning_time: 10,
    }
}

/// Built-in presets, in display order.
pub const PRESETS: &[TimerPreset] = &[
    preset("amateur", "Amateur 3x3", 3, 180, 60),
    preset("beginner", "Beginner 3x2", 3, 120, 60),
    preset("sparring", "Sparring 5x3", 5, 180, 60),
    preset("heavy-bag", "Heavy Bag 6x3", 6, 180, 30),
    preset("hiit", "HIIT 10x1", 10, 60, 30),
    preset("pro", "Pro 12x3", 12, 180, 60),
];

pub fn presets() -> &'static [TimerPreset] {
    PRESETS
}

/// Look up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Option<&'static TimerPreset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}
