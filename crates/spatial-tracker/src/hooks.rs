// crates/spatial-tracker/src/hooks.rs
// Host hook handlers: one JSON object in on stdin, one JSON object out on stdout

use crate::config::{HostConfig, TrackerConfig};
use crate::error::Result;
use crate::tracker::{SpatialTracker, StageHooks, TurnOutcome};
use serde::{Deserialize, Serialize};
use spatial_types::PersistedState;
use std::io::Read;
use std::time::Instant;

/// Maximum hook input size read from stdin
const MAX_HOOK_INPUT_BYTES: u64 = 1_048_576;

/// Performance threshold in milliseconds - warn if a hook exceeds this
const HOOK_PERF_THRESHOLD_MS: u128 = 50;

/// Host lifecycle events exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Load,
    Restore,
    BeforePrompt,
    AfterResponse,
}

impl HookEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::Load => "load",
            HookEvent::Restore => "restore",
            HookEvent::BeforePrompt => "before-prompt",
            HookEvent::AfterResponse => "after-response",
        }
    }
}

// ═══════════════════════════════════════
// WIRE TYPES
// ═══════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadInput {
    #[serde(default)]
    pub config: Option<HostConfig>,
    #[serde(default)]
    pub state: Option<PersistedState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOutput {
    pub success: bool,
    pub active: bool,
    pub state: PersistedState,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreInput {
    #[serde(default)]
    pub state: Option<PersistedState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutput {
    pub state: PersistedState,
}

/// Input shared by the before-prompt and after-response events
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnInput {
    #[serde(default)]
    pub config: Option<HostConfig>,
    #[serde(default)]
    pub state: Option<PersistedState>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforePromptOutput {
    pub state: PersistedState,
    pub system_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AfterResponseOutput {
    pub state: PersistedState,
    /// Cleaned reply, `null` when the text is unchanged
    pub modified_message: Option<String>,
    pub error: Option<String>,
    pub outcome: TurnOutcome,
}

// ═══════════════════════════════════════
// HANDLERS
// ═══════════════════════════════════════

/// Dispatch one event against `base` config, merged with any host override
pub fn handle_event(
    event: HookEvent,
    base: &TrackerConfig,
    input: serde_json::Value,
) -> Result<serde_json::Value> {
    let output = match event {
        HookEvent::Load => {
            let input: LoadInput = serde_json::from_value(input)?;
            let tracker = SpatialTracker::new(base.clone().with_host(input.config));
            serde_json::to_value(LoadOutput {
                success: true,
                active: tracker.is_active(),
                state: tracker.on_session_load(input.state),
            })?
        }
        HookEvent::Restore => {
            let input: RestoreInput = serde_json::from_value(input)?;
            let tracker = SpatialTracker::new(base.clone());
            serde_json::to_value(RestoreOutput {
                state: tracker.on_history_restore(input.state),
            })?
        }
        HookEvent::BeforePrompt => {
            let input: TurnInput = serde_json::from_value(input)?;
            let tracker = SpatialTracker::new(base.clone().with_host(input.config));
            let state = current_state(input.state, event);
            let out = tracker.on_before_turn(state, &input.content);
            serde_json::to_value(BeforePromptOutput {
                state: out.state,
                system_message: out.system_instruction,
            })?
        }
        HookEvent::AfterResponse => {
            let input: TurnInput = serde_json::from_value(input)?;
            let tracker = SpatialTracker::new(base.clone().with_host(input.config));
            let state = current_state(input.state, event);
            let result = tracker.on_after_turn(state, &input.content);
            let modified_message = result.modified().then(|| result.content.clone());
            serde_json::to_value(AfterResponseOutput {
                state: result.state,
                modified_message,
                error: result.diagnostic,
                outcome: result.outcome,
            })?
        }
    };
    Ok(output)
}

fn current_state(state: Option<PersistedState>, event: HookEvent) -> PersistedState {
    state.unwrap_or_else(|| {
        tracing::debug!(event = event.name(), "No state in hook input, starting empty");
        PersistedState::fresh()
    })
}

/// Read hook input from stdin (host passes JSON)
pub fn read_hook_input() -> Result<serde_json::Value> {
    let mut input = String::new();
    std::io::stdin()
        .take(MAX_HOOK_INPUT_BYTES)
        .read_to_string(&mut input)?;
    let json: serde_json::Value = serde_json::from_str(&input)?;
    Ok(json)
}

/// Write hook output to stdout
pub fn write_hook_output(output: &serde_json::Value) {
    use std::io::Write;
    match serde_json::to_string(output) {
        Ok(s) => {
            let _ = writeln!(std::io::stdout(), "{}", s);
        }
        Err(e) => {
            eprintln!("Failed to serialize hook output: {}", e);
            let _ = writeln!(std::io::stdout(), "{{}}");
        }
    }
}

/// Full stdin -> handler -> stdout cycle for one event
pub fn run_hook(event: HookEvent, config: &TrackerConfig) -> Result<()> {
    let start = Instant::now();
    let input = read_hook_input()?;
    let output = handle_event(event, config, input)?;
    write_hook_output(&output);

    let elapsed = start.elapsed().as_millis();
    if elapsed > HOOK_PERF_THRESHOLD_MS {
        tracing::warn!(event = event.name(), elapsed_ms = elapsed, "Slow hook");
    }
    Ok(())
}
