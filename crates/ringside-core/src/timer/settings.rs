//! User-editable timer settings.
//!
//! Every field has a declared range. Out-of-range input is clamped to the
//! nearest bound instead of being rejected, so a UI stepper can never put
//! the settings into an invalid state.

use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize};

pub const ROUNDS_RANGE: RangeInclusive<u32> = 1..=12;
pub const ROUND_DURATION_RANGE: RangeInclusive<u32> = 30..=300;
pub const REST_DURATION_RANGE: RangeInclusive<u32> = 15..=120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_rounds", deserialize_with = "saturating_u32")]
    pub rounds: u32,
    /// Round length in seconds.
    #[serde(default = "default_round_duration", deserialize_with = "saturating_u32")]
    pub round_duration: u32,
    /// Rest length in seconds.
    #[serde(default = "default_rest_duration", deserialize_with = "saturating_u32")]
    pub rest_duration: u32,
    /// Seconds before the end of a round at which the warning phase begins.
    #[serde(default = "default_warning_time", deserialize_with = "saturating_u32")]
    pub warning_time: u32,
}

/// Accepts any integer so hand-edited negatives reach `normalize` instead of
/// failing the whole file.
fn saturating_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(value.clamp(0, i64::from(u32::MAX)) as u32)
}

fn default_rounds() -> u32 {
    3
}
fn default_round_duration() -> u32 {
    180
}
fn default_rest_duration() -> u32 {
    60
}
fn default_warning_time() -> u32 {
    10
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            round_duration: default_round_duration(),
            rest_duration: default_rest_duration(),
            warning_time: default_warning_time(),
        }
    }
}

/// A partial settings update. `None` leaves the field untouched.
///
/// Values are signed so that a decrement below zero from a host still
/// clamps to the lower bound instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub rounds: Option<i64>,
    #[serde(default)]
    pub round_duration: Option<i64>,
    #[serde(default)]
    pub rest_duration: Option<i64>,
    #[serde(default)]
    pub warning_time: Option<i64>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.rounds.is_none()
            && self.round_duration.is_none()
            && self.rest_duration.is_none()
            && self.warning_time.is_none()
    }
}

fn clamp_to(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

impl TimerSettings {
    /// Build settings from raw values, clamping each into range.
    pub fn clamped(rounds: i64, round_duration: i64, rest_duration: i64, warning_time: i64) -> Self {
        let mut settings = Self::default();
        settings.apply(&SettingsPatch {
            rounds: Some(rounds),
            round_duration: Some(round_duration),
            rest_duration: Some(rest_duration),
            warning_time: Some(warning_time),
        });
        settings
    }

    /// Merge `patch` into these settings and re-validate.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(rounds) = patch.rounds {
            self.rounds = clamp_to(rounds, &ROUNDS_RANGE);
        }
        if let Some(round_duration) = patch.round_duration {
            self.round_duration = clamp_to(round_duration, &ROUND_DURATION_RANGE);
        }
        if let Some(rest_duration) = patch.rest_duration {
            self.rest_duration = clamp_to(rest_duration, &REST_DURATION_RANGE);
        }
        if let Some(warning_time) = patch.warning_time {
            self.warning_time = warning_time.max(0).min(i64::from(u32::MAX)) as u32;
        }
        self.normalize();
    }

    /// Re-clamp every field. Used after deserializing hand-edited config.
    pub fn normalize(&mut self) {
        self.rounds = clamp_to(i64::from(self.rounds), &ROUNDS_RANGE);
        self.round_duration = clamp_to(i64::from(self.round_duration), &ROUND_DURATION_RANGE);
        self.rest_duration = clamp_to(i64::from(self.rest_duration), &REST_DURATION_RANGE);
        // warning_time < round_duration
        self.warning_time = self.warning_time.min(self.max_warning_time());
    }

    pub fn max_warning_time(&self) -> u32 {
        self.round_duration.saturating_sub(1)
    }

    /// Total workout length in seconds, rests included.
    pub fn total_duration_secs(&self) -> u32 {
        let rests = self.rounds.saturating_sub(1);
        self.rounds * self.round_duration + rests * self.rest_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let s = TimerSettings::default();
        assert!(ROUNDS_RANGE.contains(&s.rounds));
        assert!(ROUND_DURATION_RANGE.contains(&s.round_duration));
        assert!(REST_DURATION_RANGE.contains(&s.rest_duration));
        assert!(s.warning_time < s.round_duration);
    }

    #[test]
    fn negative_rounds_clamp_to_one() {
        let mut s = TimerSettings::default();
        s.apply(&SettingsPatch {
            rounds: Some(-4),
            ..Default::default()
        });
        assert_eq!(s.rounds, 1);
    }

    #[test]
    fn oversized_values_clamp_to_upper_bound() {
        let s = TimerSettings::clamped(40, 10_000, 500, 0);
        assert_eq!(s.rounds, 12);
        assert_eq!(s.round_duration, 300);
        assert_eq!(s.rest_duration, 120);
    }

    #[test]
    fn undersized_durations_clamp_to_lower_bound() {
        let s = TimerSettings::clamped(3, 1, 1, 0);
        assert_eq!(s.round_duration, 30);
        assert_eq!(s.rest_duration, 15);
    }

    #[test]
    fn warning_time_stays_below_round_duration() {
        let s = TimerSettings::clamped(3, 30, 60, 45);
        assert_eq!(s.warning_time, 29);

        let mut s = TimerSettings::clamped(3, 180, 60, 100);
        assert_eq!(s.warning_time, 100);
        s.apply(&SettingsPatch {
            round_duration: Some(60),
            ..Default::default()
        });
        assert_eq!(s.warning_time, 59);
    }

    #[test]
    fn negative_values_deserialize_and_clamp() {
        let json = serde_json::json!({ "rounds": -2, "round_duration": -1, "warning_time": -5 });
        let mut s: TimerSettings = serde_json::from_value(json).unwrap();
        s.normalize();
        assert_eq!(s.rounds, 1);
        assert_eq!(s.round_duration, 30);
        assert_eq!(s.rest_duration, 60);
        assert_eq!(s.warning_time, 0);
    }

    #[test]
    fn zero_warning_time_is_allowed() {
        let s = TimerSettings::clamped(3, 180, 60, 0);
        assert_eq!(s.warning_time, 0);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut s = TimerSettings::default();
        let patch = SettingsPatch::default();
        assert!(patch.is_empty());
        s.apply(&patch);
        assert_eq!(s, TimerSettings::default());
    }

    #[test]
    fn total_duration_has_no_rest_after_last_round() {
        let s = TimerSettings::clamped(3, 180, 60, 10);
        assert_eq!(s.total_duration_secs(), 3 * 180 + 2 * 60);
    }
}
