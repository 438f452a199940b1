// crates/spatial-types/src/lib.rs
// Shared types for the spatial tracker (wire format + persisted state)
// Only serde-level dependencies allowed here

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// ═══════════════════════════════════════
// WIRE TYPES
// ═══════════════════════════════════════

/// One tracked character relative to the user at (0, 0).
///
/// `x` is left (negative) / right (positive), `y` is behind (negative) /
/// ahead (positive). Both accept a JSON number or a numeric string and are
/// stored as `f64`, so they always serialize as floats: `"x": 1` comes back
/// as `"x": 1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterEntry {
    #[serde(deserialize_with = "deserialize_name")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub x: f64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub y: f64,
    #[serde(default)]
    pub status: String,
}

impl CharacterEntry {
    pub fn new(name: impl Into<String>, x: f64, y: f64, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            status: status.into(),
        }
    }
}

/// Full set of tracked character positions at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialSnapshot {
    pub characters: Vec<CharacterEntry>,
}

impl SpatialSnapshot {
    pub fn new(characters: Vec<CharacterEntry>) -> Self {
        Self { characters }
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Look up a character by exact name
    pub fn get(&self, name: &str) -> Option<&CharacterEntry> {
        self.characters.iter().find(|c| c.name == name)
    }
}

// ═══════════════════════════════════════
// PERSISTED STATE
// ═══════════════════════════════════════

/// Per-session state carried between turns by the host.
///
/// `lastUpdate` is encoded as epoch milliseconds to match the host's
/// native timestamp representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub snapshot: SpatialSnapshot,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_update: DateTime<Utc>,
}

impl PersistedState {
    /// Empty state stamped with the given time
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            snapshot: SpatialSnapshot::default(),
            last_update: now,
        }
    }

    /// Empty state stamped with the current time
    pub fn fresh() -> Self {
        Self::new(Utc::now())
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::fresh()
    }
}

// ═══════════════════════════════════════
// COERCION
// ═══════════════════════════════════════

/// Integer or decimal literal with optional sign. No exponents, no hex.
#[allow(clippy::expect_used)]
static NUMERIC_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").expect("valid regex"));

/// Parse a numeric-looking string (`"5"`, `"-3"`, `"5.5"`, `" .5 "`).
///
/// Returns `None` for anything that is not a plain integer or decimal literal.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !NUMERIC_LITERAL_RE.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("coordinate out of range: {n}"))),
        serde_json::Value::String(s) => parse_numeric(s)
            .ok_or_else(|| de::Error::custom(format!("coordinate is not numeric: {s:?}"))),
        other => Err(de::Error::custom(format!(
            "coordinate must be a number or numeric string, got {other}"
        ))),
    }
}

fn deserialize_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        return Err(de::Error::custom("character name must not be empty"));
    }
    Ok(name)
}
