// crates/spatial-tracker/src/tracker/parse.rs
// Strict JSON parsing of a spatial packet into a snapshot

use crate::error::{Result, SpatialError};
use serde::Deserialize;
use spatial_types::{CharacterEntry, SpatialSnapshot};

/// Packet shape before per-entry validation, so failures can name the entry
#[derive(Deserialize)]
struct RawPacket {
    characters: Vec<serde_json::Value>,
}

/// Parse the body of a spatial block.
///
/// Any invalid entry rejects the whole packet; entries are never skipped.
pub fn parse_snapshot(body: &str) -> Result<SpatialSnapshot> {
    let raw: RawPacket = serde_json::from_str(body)?;

    let characters = raw
        .characters
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<CharacterEntry>(value).map_err(|e| {
                SpatialError::InvalidEntry {
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SpatialSnapshot::new(characters))
}
