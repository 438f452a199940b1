// crates/spatial-tracker/src/cli/inspect.rs
// Debug commands for looking at model output and saved state

use anyhow::{Context, Result};
use spatial::config::TrackerConfig;
use spatial::render::render;
use spatial::{PersistedState, SpatialTracker, StageHooks, TurnOutcome};
use std::io::Read;
use std::path::{Path, PathBuf};

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Merge a reply into an empty state and print what the host would see
pub fn run_extract(file: Option<PathBuf>, config: &TrackerConfig) -> Result<()> {
    let reply = read_source(file.as_deref())?;

    // Debugging output should always examine the reply
    let mut tracker = SpatialTracker::new(config.clone());
    tracker.set_active(true);

    let state = tracker.on_session_load(None);
    let result = tracker.on_after_turn(state, &reply);

    println!("=== Outcome: {:?} ===\n", result.outcome);
    if let Some(ref diagnostic) = result.diagnostic {
        println!("ERROR: {}\n", diagnostic);
    }
    if result.outcome == TurnOutcome::Updated {
        println!("--- Cleaned reply ({} chars) ---\n", result.content.len());
        println!("{}\n", result.content);
    }
    println!("--- State ---\n");
    print!("{}", render(&result.state, &config.render));
    Ok(())
}

/// Render a saved state
pub fn run_render(file: Option<PathBuf>, no_grid: bool, config: &TrackerConfig) -> Result<()> {
    let raw = read_source(file.as_deref())?;
    let state: PersistedState =
        serde_json::from_str(&raw).context("input is not a valid spatial state")?;

    let mut opts = config.render;
    if no_grid {
        opts.show_grid = false;
    }
    print!("{}", render(&state, &opts));
    Ok(())
}
