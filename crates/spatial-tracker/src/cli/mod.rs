// crates/spatial-tracker/src/cli/mod.rs
// CLI module for spatial commands

use clap::{Parser, Subcommand, ValueEnum};
use spatial::hooks::HookEvent;
use std::path::PathBuf;

pub mod inspect;

pub use inspect::{run_extract, run_render};

#[derive(Parser)]
#[command(name = "spatial")]
#[command(about = "Spatial state tracking for conversational AI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the system instruction attached to active turns
    Instructions,

    /// Run extraction and merge on a model reply and show the result
    Extract {
        /// Read the reply from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Render a persisted state (JSON)
    Render {
        /// Read the state from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Hide the radar grid
        #[arg(long)]
        no_grid: bool,
    },

    /// Host hook handlers (JSON on stdin, JSON on stdout)
    Hook {
        #[arg(value_enum)]
        event: HookArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HookArg {
    /// Session start
    Load,
    /// History navigation
    Restore,
    /// Before the prompt is sent
    BeforePrompt,
    /// After the model replies
    AfterResponse,
}

impl From<HookArg> for HookEvent {
    fn from(arg: HookArg) -> Self {
        match arg {
            HookArg::Load => HookEvent::Load,
            HookArg::Restore => HookEvent::Restore,
            HookArg::BeforePrompt => HookEvent::BeforePrompt,
            HookArg::AfterResponse => HookEvent::AfterResponse,
        }
    }
}
