// crates/spatial-tracker/src/tracker/merge.rs
// Merge a parsed packet into persisted state and clean the reply text

use super::extract::{Delimiters, TaggedBlock, extract_block, strip_block};
use super::parse::parse_snapshot;
use crate::error::SpatialError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spatial_types::{CharacterEntry, PersistedState, SpatialSnapshot};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of looking for and parsing a block in one reply
#[derive(Debug)]
pub enum Extraction<'a> {
    /// No complete delimiter pair
    NotFound,
    /// Block found and parsed
    Parsed {
        block: TaggedBlock<'a>,
        snapshot: SpatialSnapshot,
    },
    /// Block found but its body was rejected
    Failed {
        block: TaggedBlock<'a>,
        error: SpatialError,
    },
}

/// Locate the first block in `reply` and parse its body
pub fn extract_and_parse<'a>(reply: &'a str, delims: &Delimiters<'_>) -> Extraction<'a> {
    let Some(block) = extract_block(reply, delims) else {
        return Extraction::NotFound;
    };
    match parse_snapshot(block.inner) {
        Ok(snapshot) => Extraction::Parsed { block, snapshot },
        Err(error) => Extraction::Failed { block, error },
    }
}

/// What happened to the state on one after-response event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Updated,
    NoBlock,
    ParseFailed,
    Inactive,
}

/// State and reply text after a merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub state: PersistedState,
    /// Reply text to show; unchanged unless the state was updated
    pub content: String,
    pub outcome: TurnOutcome,
    /// Cause of a parse failure, kept for the host to surface
    pub diagnostic: Option<String>,
}

impl MergeResult {
    /// True when `content` differs from the reply that was merged
    pub fn modified(&self) -> bool {
        self.outcome == TurnOutcome::Updated
    }
}

/// Apply an extraction to `state`.
///
/// On success the snapshot is replaced wholesale (characters missing from the
/// new packet are dropped), names are made unique and the block is cut from
/// the reply. On a miss or a parse failure state and text come back as given.
pub fn merge(
    state: PersistedState,
    extraction: Extraction<'_>,
    reply: &str,
    now: DateTime<Utc>,
) -> MergeResult {
    match extraction {
        Extraction::NotFound => {
            debug!("No spatial block in reply");
            MergeResult {
                state,
                content: reply.to_string(),
                outcome: TurnOutcome::NoBlock,
                diagnostic: None,
            }
        }
        Extraction::Failed { block, error } => {
            warn!(
                error = %error,
                block_start = block.span.start,
                "Failed to parse spatial block, keeping previous state"
            );
            MergeResult {
                state,
                content: reply.to_string(),
                outcome: TurnOutcome::ParseFailed,
                diagnostic: Some(format!("spatial block rejected: {error}")),
            }
        }
        Extraction::Parsed { block, snapshot } => {
            let characters = dedup_by_name(snapshot.characters);
            debug!(characters = characters.len(), "Spatial state updated");
            MergeResult {
                state: PersistedState {
                    snapshot: SpatialSnapshot::new(characters),
                    last_update: now,
                },
                content: strip_block(reply, &block),
                outcome: TurnOutcome::Updated,
                diagnostic: None,
            }
        }
    }
}

/// Collapse repeated names to one entry.
///
/// The later entry's data wins; it takes the slot where the name first
/// appeared so the rest of the order is stable.
pub fn dedup_by_name(characters: Vec<CharacterEntry>) -> Vec<CharacterEntry> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(characters.len());
    let mut out: Vec<CharacterEntry> = Vec::with_capacity(characters.len());

    for entry in characters {
        match slots.get(&entry.name) {
            Some(&i) => out[i] = entry,
            None => {
                slots.insert(entry.name.clone(), out.len());
                out.push(entry);
            }
        }
    }
    out
}
