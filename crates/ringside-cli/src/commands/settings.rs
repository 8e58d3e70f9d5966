use clap::Subcommand;
use ringside_core::{Config, SettingsPatch};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the saved timer settings as JSON
    Show,
    /// Update timer settings. Out-of-range values are clamped.
    Set {
        /// Number of rounds (1-12)
        #[arg(long, allow_negative_numbers = true)]
        rounds: Option<i64>,
        /// Round length in seconds (30-300)
        #[arg(long, allow_negative_numbers = true)]
        round_duration: Option<i64>,
        /// Rest length in seconds (15-120)
        #[arg(long, allow_negative_numbers = true)]
        rest_duration: Option<i64>,
        /// Warning threshold in seconds before round end
        #[arg(long, allow_negative_numbers = true)]
        warning_time: Option<i64>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config.timer)?);
        }
        SettingsAction::Set {
            rounds,
            round_duration,
            rest_duration,
            warning_time,
        } => {
            let patch = SettingsPatch {
                rounds,
                round_duration,
                rest_duration,
                warning_time,
            };
            if patch.is_empty() {
                return Err("nothing to set; pass at least one of --rounds, --round-duration, --rest-duration, --warning-time".into());
            }
            let mut timer = config.build_timer();
            if timer.set_settings(&patch).is_some() {
                config.remember(&timer);
                config.save()?;
            }
            println!("{}", serde_json::to_string_pretty(timer.settings())?);
        }
    }
    Ok(())
}
