mod display;
mod engine;
mod preset;
mod reconcile;
mod settings;

pub use display::{format_time, phase_color, phase_label, progress, PhaseColor};
pub use engine::{IntervalTimer, Phase, TimerState};
pub use preset::{find_preset, presets, TimerPreset, PRESETS};
pub use settings::{
    SettingsPatch, TimerSettings, REST_DURATION_RANGE, ROUNDS_RANGE, ROUND_DURATION_RANGE,
};
