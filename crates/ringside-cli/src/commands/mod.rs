pub mod config;
pub mod preset;
pub mod settings;
pub mod timer;

use ringside_core::{find_preset, TimerPreset, ValidationError};

/// Resolve a preset id or fail with `UnknownPreset`.
pub fn lookup_preset(id: &str) -> Result<&'static TimerPreset, ValidationError> {
    find_preset(id).ok_or_else(|| ValidationError::UnknownPreset(id.to_string()))
}
