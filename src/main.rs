//! Stack Tower headless driver
//!
//! Runs the simulation with the autopilot on a fixed timestep and hands the
//! emitted commands to a sink: log records by default, JSON lines on stdout
//! with `--json` (pipe them into a renderer).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use stack_tower::consts::*;
use stack_tower::sim::{Autopilot, TickInput, TowerState, tick};
use stack_tower::{CommandSink, HighScores, JsonLinesSink, LogSink, TowerConfig, dispatch};

/// Simulated frame time handed to the fixed-step loop
const FRAME_DT: f32 = 1.0 / 30.0;

#[derive(Debug, Parser)]
#[command(name = "stack-tower")]
#[command(about = "Headless stack tower run driven by the autopilot")]
struct Cli {
    /// JSON tuning file; missing fields keep their defaults
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write commands to stdout as JSON lines instead of logging them
    #[arg(long)]
    json: bool,

    /// Autopilot RNG seed
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Autopilot accuracy, 1.0 aims inside the perfect window
    #[arg(long, value_name = "0..=1", default_value_t = 0.8, value_parser = parse_accuracy)]
    accuracy: f32,

    /// Simulated seconds before the run stops
    #[arg(long, default_value_t = 120.0, value_parser = parse_seconds)]
    seconds: f32,

    /// Start a new tower after a miss instead of stopping
    #[arg(long)]
    restart: bool,

    /// Leaderboard file updated with the final tower
    #[arg(long, value_name = "PATH")]
    scores: Option<PathBuf>,
}

fn parse_accuracy(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("accuracy must be within 0 and 1, got {s}"))
    }
}

fn parse_seconds(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("seconds must be a positive number, got {s}"))
    }
}

/// Fixed-step loop. Returns the finished session.
fn run(
    config: TowerConfig,
    cli: &Cli,
    sink: &mut impl CommandSink,
) -> stack_tower::Result<TowerState> {
    let mut state = TowerState::new(config);
    state.autopilot = Autopilot::new(cli.seed, cli.accuracy)?;
    state.autopilot.restart_on_game_over = cli.restart;

    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };
    let mut accumulator = 0.0;
    let mut elapsed = 0.0;

    dispatch(&mut state, sink)?;

    while elapsed < cli.seconds && (cli.restart || !state.is_game_over()) {
        accumulator += FRAME_DT.min(MAX_FRAME_DT);
        elapsed += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        dispatch(&mut state, sink)?;
    }

    Ok(state)
}

fn record_score(path: &Path, state: &TowerState) -> stack_tower::Result<()> {
    let mut scores = HighScores::load(path)?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    match scores.add_score(state.score, state.best_combo, timestamp) {
        Some(rank) => {
            log::info!("New high score! Rank #{rank}");
            scores.save(path)?;
        }
        None => match scores.best() {
            Some(best) => log::info!(
                "No high score this time (best: height {}, combo {})",
                best.score,
                best.best_combo
            ),
            None => log::info!("No high score this time"),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match TowerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => TowerConfig::default(),
    };

    log::info!("Stack Tower starting (seed {:#x})", cli.seed);

    let result = if cli.json {
        let mut sink = JsonLinesSink::new(std::io::stdout().lock());
        run(config, &cli, &mut sink)
    } else {
        run(config, &cli, &mut LogSink)
    };

    let state = match result {
        Ok(state) => state,
        Err(e) => {
            log::error!("Run failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Finished after {} ticks: height {}, best combo {}, {}",
        state.time_ticks,
        state.height(),
        state.best_combo,
        if state.is_game_over() { "game over" } else { "time up" }
    );

    if let Some(path) = &cli.scores {
        if let Err(e) = record_score(path, &state) {
            log::warn!("Could not update high scores: {e}");
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use stack_tower::RecordingSink;

    #[test]
    fn test_accuracy_range() {
        assert_eq!(parse_accuracy("0.5"), Ok(0.5));
        assert_eq!(parse_accuracy("1"), Ok(1.0));
        assert!(parse_accuracy("NaN").is_err());
        assert!(parse_accuracy("1.01").is_err());
        assert!(parse_accuracy("-0.2").is_err());
        assert!(parse_accuracy("high").is_err());
    }

    #[test]
    fn test_seconds_must_be_positive() {
        assert_eq!(parse_seconds("2.5"), Ok(2.5));
        assert!(parse_seconds("0").is_err());
        assert!(parse_seconds("inf").is_err());
    }

    #[test]
    fn test_cli_positional_config() {
        let cli = Cli::try_parse_from(["stack-tower", "demos/fast_tower.json", "--json"])
            .expect("valid args");
        assert_eq!(cli.config, Some(PathBuf::from("demos/fast_tower.json")));
        assert!(cli.json);
        assert_eq!(cli.seed, 0x5eed);
        assert_eq!(cli.accuracy, 0.8);

        assert!(Cli::try_parse_from(["stack-tower", "--accuracy", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["stack-tower", "--bogus"]).is_err());
    }

    #[test]
    fn test_run_records_commands() {
        let cli = Cli::try_parse_from(["stack-tower", "--seconds", "5", "--accuracy", "1"])
            .expect("valid args");
        let mut sink = RecordingSink::default();
        let state = run(TowerConfig::default(), &cli, &mut sink).expect("run");
        assert!(state.score > 0);
        assert!(state.time_ticks > 0);
        assert!(!sink.commands.is_empty());
    }
}
