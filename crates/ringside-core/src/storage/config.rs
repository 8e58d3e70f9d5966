//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timer settings (rounds, round/rest lengths, warning threshold)
//! - The selected preset, if any
//! - Feedback preferences (bell on phase change)
//! - Log level
//!
//! Configuration is stored at `~/.config/ringside/config.toml`. Only the
//! settings are ever persisted; a running countdown never is.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::{find_preset, IntervalTimer, SettingsPatch, TimerSettings};

/// Feedback configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Ring the terminal bell on phase changes.
    #[serde(default = "default_true")]
    pub bell: bool,
    /// Beep on each of the last three seconds of a phase.
    #[serde(default)]
    pub countdown_beeps: bool,
}

/// Logging configuration. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ringside/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Id of the selected preset. Cleared when settings are edited by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            bell: true,
            countdown_beeps: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: None,
            timer: TimerSettings::default(),
            feedback: FeedbackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("{e}")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let mut cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.timer.normalize();
                debug!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        if key == "preset" {
            return Some(self.preset.clone().unwrap_or_else(|| "none".into()));
        }
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, in memory only.
    ///
    /// Timer values are clamped into range and clear the selected preset.
    /// Setting `preset` to a known id also copies that preset's settings;
    /// `none` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        if key == "preset" {
            if value.eq_ignore_ascii_case("none") {
                self.preset = None;
                return Ok(());
            }
            let preset = find_preset(value).ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("unknown preset '{value}'"),
            })?;
            self.preset = Some(preset.id.to_string());
            self.timer = preset.settings();
            return Ok(());
        }

        if let Some(field) = key.strip_prefix("timer.") {
            let patch = Self::timer_patch(key, field, value)?;
            let mut timer = self.timer;
            timer.apply(&patch);
            if timer != self.timer {
                self.timer = timer;
                self.preset = None;
            }
            return Ok(());
        }

        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let mut updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.timer.normalize();
        if updated.timer != self.timer {
            updated.preset = None;
        }
        *self = updated;
        Ok(())
    }

    fn timer_patch(key: &str, field: &str, value: &str) -> Result<SettingsPatch, ConfigError> {
        let n = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as integer"),
            })?;
        let mut patch = SettingsPatch::default();
        match field {
            "rounds" => patch.rounds = Some(n),
            "round_duration" => patch.round_duration = Some(n),
            "rest_duration" => patch.rest_duration = Some(n),
            "warning_time" => patch.warning_time = Some(n),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(patch)
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Idle timer built from the saved settings.
    pub fn build_timer(&self) -> IntervalTimer {
        let mut settings = self.timer;
        settings.normalize();
        match self.preset.as_deref().and_then(find_preset) {
            Some(preset) if preset.settings() == settings => IntervalTimer::with_preset(preset),
            _ => IntervalTimer::new(settings),
        }
    }

    /// Copy the timer's settings and preset choice into this config.
    pub fn remember(&mut self, timer: &IntervalTimer) {
        self.timer = *timer.settings();
        self.preset = timer.preset_id().map(str::to_string);
    }
}
