//! Space Attack headless entry point
//!
//! Runs the autopilot through the fixed-timestep loop and prints the final
//! frame snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use space_attack::sim::GameEvent;
#[cfg(not(target_arch = "wasm32"))]
use space_attack::{GameLoop, SimError, Tuning};

/// Progress log interval, in fast ticks
#[cfg(not(target_arch = "wasm32"))]
const REPORT_EVERY: u64 = 600;

/// Run the Space Attack autopilot headlessly and print the final frame as JSON.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "space-attack", version, about, long_about = None)]
struct Args {
    /// Run seed; a random one is picked when omitted.
    seed: Option<u64>,
    /// Fast ticks to simulate (60 per second of game time).
    #[arg(default_value_t = 3600, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: u64,
    /// Balance overrides as JSON; missing fields keep their defaults.
    #[arg(value_name = "TUNING_JSON")]
    tuning: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Space Attack (headless) starting...");

    let seed = args.seed.unwrap_or_else(rand::random);
    match run(seed, args.ticks, args.tuning.as_deref()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<&Path>) -> Result<Tuning, SimError> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    match std::fs::read_to_string(path) {
        Ok(json) => {
            log::info!("Loaded tuning from {}", path.display());
            Tuning::from_json(&json)
        }
        Err(e) => {
            log::warn!(
                "Could not read tuning file {}: {} (using defaults)",
                path.display(),
                e
            );
            Ok(Tuning::default())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(seed: u64, ticks: u64, tuning_path: Option<&Path>) -> Result<String, SimError> {
    let tuning = load_tuning(tuning_path)?;
    let mut game = GameLoop::with_tuning(seed, tuning)?;
    game.set_autopilot(true);
    log::info!("Game initialized with seed: {} ({} ticks)", seed, ticks);

    let frame = game.tick_len();
    let mut ticks_run = 0u64;
    let mut games_finished = 0u32;
    let mut best_score = 0u64;

    // time_ticks rewinds on restart, so count ticks here
    while ticks_run < ticks {
        let ran = u64::from(game.advance(frame));
        for event in game.drain_events() {
            match event {
                GameEvent::GameOver { score, level } => {
                    games_finished += 1;
                    best_score = best_score.max(score);
                    log::info!("Game {} over: score {} at level {}", games_finished, score, level);
                    // Demo mode keeps playing
                    game.restart();
                }
                GameEvent::LevelUp { level } => log::debug!("Reached level {}", level),
                _ => {}
            }
        }

        for n in ticks_run + 1..=ticks_run + ran {
            if n % REPORT_EVERY == 0 {
                let session = game.session();
                log::info!(
                    "tick {}: score {} level {} lives {}",
                    n,
                    session.score,
                    session.level,
                    session.lives
                );
            }
        }
        ticks_run += ran;
    }

    let snapshot = game.snapshot();
    best_score = best_score.max(snapshot.session.score);
    game.stop();
    log::info!("Finished {} game(s), best score {}", games_finished, best_score);

    Ok(serde_json::to_string_pretty(&snapshot)?)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["space-attack"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.ticks, 3600);
        assert!(args.tuning.is_none());
    }

    #[test]
    fn test_args_positional() {
        let args = Args::try_parse_from(["space-attack", "42", "120", "balance.json"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.ticks, 120);
        assert_eq!(args.tuning, Some(PathBuf::from("balance.json")));
    }

    #[test]
    fn test_args_rejected() {
        assert!(Args::try_parse_from(["space-attack", "-3"]).is_err());
        assert!(Args::try_parse_from(["space-attack", "seed"]).is_err());
        assert!(Args::try_parse_from(["space-attack", "1", "0"]).is_err());
    }

    #[test]
    fn test_run_prints_snapshot() {
        let json = run(9, 120, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["session"]["lives"].as_u64().is_some());
        assert!(value["enemies"].is_array());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; a host page drives `GameLoop` directly
}
