//! Timer commands.
//!
//! `run` is a live host: it owns the one-second trigger, renders the
//! countdown on a single terminal line and treats wall-clock gaps as a
//! suspend/resume pair. `simulate` drives the same engine deterministically.

use std::io::Write;

use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use ringside_core::storage::FeedbackConfig;
use ringside_core::{
    format_time, phase_color, phase_label, progress, Config, Event, IntervalTimer, Phase,
};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::lookup_preset;

/// A gap this long between two one-second triggers means the process was
/// not scheduled (laptop sleep, SIGSTOP).
const SUSPEND_GAP_SECS: i64 = 2;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a workout live in the terminal (Ctrl-C to stop)
    Run {
        /// Use a preset instead of the saved settings (not saved)
        #[arg(long)]
        preset: Option<String>,
    },
    /// Simulate a workout and print the resulting state as JSON
    Simulate {
        /// Number of foreground ticks (one per second)
        #[arg(long)]
        ticks: u32,
        /// Go to the background after this many ticks
        #[arg(long)]
        background_after: Option<u32>,
        /// Seconds spent in the background
        #[arg(long, default_value = "0")]
        away: u32,
        /// Use a preset instead of the saved settings (not saved)
        #[arg(long)]
        preset: Option<String>,
        /// Include every emitted event in the output
        #[arg(long)]
        events: bool,
    },
    /// Print the idle state for the saved settings as JSON
    Status,
}

fn build_timer(preset: Option<&str>) -> Result<(IntervalTimer, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let timer = match preset {
        Some(id) => IntervalTimer::with_preset(lookup_preset(id)?),
        None => config.build_timer(),
    };
    Ok((timer, config))
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { preset } => {
            let (timer, config) = build_timer(preset.as_deref())?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_live(timer, &config.feedback))?;
        }
        TimerAction::Simulate {
            ticks,
            background_after,
            away,
            preset,
            events,
        } => {
            let (mut timer, _) = build_timer(preset.as_deref())?;
            let emitted = simulate(&mut timer, ticks, background_after, away, Utc::now());
            let mut out = serde_json::json!({
                "state": timer.state(),
                "snapshot": timer.snapshot(),
            });
            if events {
                out["events"] = serde_json::to_value(&emitted)?;
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        TimerAction::Status => {
            let (timer, _) = build_timer(None)?;
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
    }
    Ok(())
}

/// Start `timer` and drive it for `ticks` foreground seconds, optionally
/// spending `away` seconds in the background after `background_after` ticks.
fn simulate(
    timer: &mut IntervalTimer,
    ticks: u32,
    background_after: Option<u32>,
    away: u32,
    now: DateTime<Utc>,
) -> Vec<Event> {
    let mut events: Vec<Event> = timer.start().into_iter().collect();
    let before = background_after.unwrap_or(ticks).min(ticks);

    events.extend((0..before).filter_map(|_| timer.tick()));
    if background_after.is_some() {
        let suspended_at = now + Duration::seconds(i64::from(before));
        timer.enter_background_at(suspended_at);
        events.extend(timer.enter_foreground_at(suspended_at + Duration::seconds(i64::from(away))));
    }
    events.extend((before..ticks).filter_map(|_| timer.tick()));
    events
}

async fn run_live(
    mut timer: IntervalTimer,
    feedback: &FeedbackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = timer.start() {
        announce(&event, feedback);
    }
    render(&timer, feedback)?;

    let mut trigger = interval(std::time::Duration::from_secs(1));
    trigger.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    trigger.tick().await;
    let mut last = Utc::now();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while timer.is_running() {
        tokio::select! {
            _ = trigger.tick() => {
                let now = Utc::now();
                let gap = (now - last).num_seconds();
                let events: Vec<Event> = if gap >= SUSPEND_GAP_SECS {
                    debug!(gap, "wall-clock gap detected; reconciling");
                    timer.enter_background_at(last);
                    last += Duration::seconds(gap);
                    timer.enter_foreground_at(last)
                } else {
                    // `last` tracks counted seconds, not trigger instants, so
                    // accumulated trigger drift is later caught up as a gap.
                    last += Duration::seconds(1);
                    timer.tick().into_iter().collect()
                };
                for event in &events {
                    announce(event, feedback);
                }
                render(&timer, feedback)?;
            }
            result = &mut ctrl_c => {
                result?;
                timer.pause();
                info!("interrupted");
                break;
            }
        }
    }

    println!();
    if timer.phase() == Phase::Complete {
        println!("Workout complete: {} rounds", timer.state().total_rounds);
    } else {
        let state = timer.state();
        println!(
            "Stopped in round {}/{} with {} left",
            state.current_round,
            state.total_rounds,
            format_time(state.time_remaining)
        );
    }
    Ok(())
}

fn announce(event: &Event, feedback: &FeedbackConfig) {
    if event.is_phase_edge() && feedback.bell {
        print!("\x07");
    }
    if let Event::Reconciled { elapsed_secs, .. } = event {
        info!(elapsed_secs, "caught up after suspension");
    }
}

fn render(timer: &IntervalTimer, feedback: &FeedbackConfig) -> std::io::Result<()> {
    let state = timer.state();
    let (r, g, b) = phase_color(state.phase).rgb();
    if feedback.countdown_beeps && state.phase.is_active() && (1..=3).contains(&state.time_remaining)
    {
        print!("\x07");
    }
    let mut stdout = std::io::stdout().lock();
    write!(
        stdout,
        "\r\x1b[2K\x1b[38;2;{r};{g};{b}m{:<8}\x1b[0m round {}/{}  {:>5}  {:>3.0}%",
        phase_label(state.phase),
        state.current_round,
        state.total_rounds,
        format_time(state.time_remaining),
        progress(state),
    )?;
    stdout.flush()
}
