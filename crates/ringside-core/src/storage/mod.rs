mod config;

pub use config::{Config, FeedbackConfig, LoggingConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the Ringside data directory, creating it if needed.
///
/// `RINGSIDE_HOME` overrides the location outright. Otherwise this is
/// `~/.config/ringside[-dev]/`, with `RINGSIDE_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("RINGSIDE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("RINGSIDE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("ringside-dev")
            } else {
                base_dir.join("ringside")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
