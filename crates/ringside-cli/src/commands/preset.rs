//! Preset commands.
//!
//! Selecting a preset overwrites the saved timer settings wholesale.

use clap::Subcommand;
use ringside_core::{format_time, presets, Config};

use super::lookup_preset;

#[derive(Subcommand)]
pub enum PresetAction {
    /// List built-in presets
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one preset
    Show {
        /// Preset id (e.g. "amateur", "pro")
        id: String,
    },
    /// Select a preset and save it as the current settings
    Select {
        /// Preset id
        id: String,
    },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PresetAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(presets())?);
                return Ok(());
            }
            let config = Config::load()?;
            for preset in presets() {
                let active = if config.preset.as_deref() == Some(preset.id) {
                    " [ACTIVE]"
                } else {
                    ""
                };
                println!(
                    "  {:<10} {:<14} {} x {} / rest {}  total {}{}",
                    preset.id,
                    preset.name,
                    preset.rounds,
                    format_time(preset.round_duration),
                    format_time(preset.rest_duration),
                    format_time(preset.settings().total_duration_secs()),
                    active
                );
            }
        }
        PresetAction::Show { id } => {
            let preset = lookup_preset(&id)?;
            println!("{}", serde_json::to_string_pretty(preset)?);
        }
        PresetAction::Select { id } => {
            let preset = lookup_preset(&id)?;
            let mut config = Config::load()?;
            let mut timer = config.build_timer();
            let event = timer.select_preset(preset);
            config.remember(&timer);
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
