// crates/spatial-tracker/src/main.rs
// Spatial tracker CLI and host hook entry point

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use spatial::config::{EnvConfig, TrackerConfig, log_level, spatial_dir};
use spatial::hooks::run_hook;
use spatial::tracker::build_instructions;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Load .env files (global first, then working directory)
    let _ = dotenvy::from_path(spatial_dir().join(".env"));
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Hooks stay quiet; stdout belongs to the host protocol either way
    let default_level = match &cli.command {
        Commands::Hook { .. } => Level::WARN,
        _ => Level::INFO,
    };
    let env_level = EnvConfig::log_level_from_env();

    // Subscriber goes in before config loading so its warnings are visible
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(env_level.as_deref(), default_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TrackerConfig::load();

    match cli.command {
        Commands::Instructions => {
            println!("{}", build_instructions());
        }
        Commands::Extract { file } => {
            cli::run_extract(file, &config)?;
        }
        Commands::Render { file, no_grid } => {
            cli::run_render(file, no_grid, &config)?;
        }
        Commands::Hook { event } => {
            run_hook(event.into(), &config)?;
        }
    }

    Ok(())
}
