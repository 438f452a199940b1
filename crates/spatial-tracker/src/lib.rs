// crates/spatial-tracker/src/lib.rs
// Spatial state tracking for conversational AI

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod hooks;
pub mod render;
pub mod tracker;

pub use error::{Result, SpatialError};
pub use spatial_types::{CharacterEntry, PersistedState, SpatialSnapshot};
pub use tracker::{BeforeTurn, MergeResult, SpatialTracker, StageHooks, TurnOutcome};
