//! # Ringside Core Library
//!
//! This library provides the core logic for the Ringside boxing round
//! timer. Hosts (the CLI, or any GUI shell) own the clock and rendering;
//! everything that decides *what the timer is doing* lives here.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven round/rest state machine that requires
//!   the caller to invoke `tick()` once per second while running
//! - **Reconciliation**: replays missed ticks after the host was suspended
//! - **Presets**: built-in named settings bundles
//! - **Storage**: TOML-based configuration for settings and preset choice
//!
//! ## Key Components
//!
//! - [`IntervalTimer`]: Core timer state machine
//! - [`TimerSettings`]: Clamped user settings
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    find_preset, format_time, phase_color, phase_label, presets, progress, IntervalTimer, Phase,
    PhaseColor, SettingsPatch, TimerPreset, TimerSettings, TimerState,
};
