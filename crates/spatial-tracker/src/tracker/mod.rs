// crates/spatial-tracker/src/tracker/mod.rs
// Spatial state tracker: lifecycle hooks over prompt, extract, parse and merge

pub mod extract;
pub mod merge;
pub mod parse;
pub mod prompt;

pub use extract::{Delimiters, SPATIAL_BLOCK, TaggedBlock, extract_block, strip_block};
pub use merge::{Extraction, MergeResult, TurnOutcome, dedup_by_name, extract_and_parse, merge};
pub use parse::parse_snapshot;
pub use prompt::build_instructions;

use crate::config::TrackerConfig;
use chrono::{DateTime, Utc};
use spatial_types::PersistedState;
use tracing::{debug, info};

/// Output of the before-prompt event
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeTurn {
    /// Carried forward unchanged
    pub state: PersistedState,
    /// System instruction to attach out-of-band, `None` when inactive
    pub system_instruction: Option<String>,
}

/// Host lifecycle events.
///
/// State is passed in by value and handed back; implementors hold no
/// per-session mutable state of their own.
pub trait StageHooks {
    /// Session start: adopt a saved state or begin empty
    fn on_session_load(&self, saved: Option<PersistedState>) -> PersistedState;

    /// History navigation: the restored state replaces the current view
    fn on_history_restore(&self, restored: Option<PersistedState>) -> PersistedState;

    /// Before the user's message goes to the model
    fn on_before_turn(&self, state: PersistedState, user_message: &str) -> BeforeTurn;

    /// After the model replies
    fn on_after_turn(&self, state: PersistedState, reply: &str) -> MergeResult;
}

/// Tracker for the `<spatial_system>` packet protocol
#[derive(Debug, Clone)]
pub struct SpatialTracker {
    config: TrackerConfig,
    delims: Delimiters<'static>,
}

impl SpatialTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            delims: SPATIAL_BLOCK,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.config.active
    }

    /// Flip the feature toggle. Persisted state is never reset by this.
    pub fn set_active(&mut self, active: bool) {
        if self.config.active != active {
            info!(active, "Spatial tracking toggled");
        }
        self.config.active = active;
    }

    /// After-turn handling with an explicit clock
    pub fn after_turn_at(
        &self,
        state: PersistedState,
        reply: &str,
        now: DateTime<Utc>,
    ) -> MergeResult {
        if !self.config.active {
            return MergeResult {
                state,
                content: reply.to_string(),
                outcome: TurnOutcome::Inactive,
                diagnostic: None,
            };
        }
        merge(state, extract_and_parse(reply, &self.delims), reply, now)
    }
}

impl Default for SpatialTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl StageHooks for SpatialTracker {
    fn on_session_load(&self, saved: Option<PersistedState>) -> PersistedState {
        let state = saved.unwrap_or_else(PersistedState::fresh);
        info!(
            active = self.config.active,
            characters = state.snapshot.len(),
            "Spatial tracker loaded"
        );
        state
    }

    fn on_history_restore(&self, restored: Option<PersistedState>) -> PersistedState {
        debug!(restored = restored.is_some(), "Restoring spatial state");
        restored.unwrap_or_else(PersistedState::fresh)
    }

    fn on_before_turn(&self, state: PersistedState, _user_message: &str) -> BeforeTurn {
        let system_instruction = self.config.active.then(build_instructions);
        BeforeTurn {
            state,
            system_instruction,
        }
    }

    fn on_after_turn(&self, state: PersistedState, reply: &str) -> MergeResult {
        self.after_turn_at(state, reply, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use spatial_types::{CharacterEntry, SpatialSnapshot};

    const BOB_REPLY: &str = "Hi there. <spatial_system>{\"characters\":[{\"name\":\"Bob\",\"x\":5,\"y\":0,\"status\":\"Walking\"}]}</spatial_system>";

    fn inactive() -> SpatialTracker {
        let mut tracker = SpatialTracker::default();
        tracker.set_active(false);
        tracker
    }

    fn bob_state() -> PersistedState {
        PersistedState {
            snapshot: SpatialSnapshot::new(vec![CharacterEntry::new("Bob", 1.0, 2.0, "Sitting")]),
            last_update: Utc.timestamp_millis_opt(42).unwrap(),
        }
    }

    // ============================================================================
    // Lifecycle tests
    // ============================================================================

    #[test]
    fn test_session_load_fresh() {
        let state = SpatialTracker::default().on_session_load(None);
        assert!(state.snapshot.is_empty());
    }

    #[test]
    fn test_session_load_keeps_saved() {
        let state = SpatialTracker::default().on_session_load(Some(bob_state()));
        assert_eq!(state, bob_state());
    }

    #[test]
    fn test_history_restore_replaces_view() {
        let restored = SpatialTracker::default().on_history_restore(Some(bob_state()));
        assert_eq!(restored, bob_state());

        let empty = SpatialTracker::default().on_history_restore(None);
        assert!(empty.snapshot.is_empty());
    }

    // ============================================================================
    // Gate tests
    // ============================================================================

    #[test]
    fn test_before_turn_active_attaches_instruction() {
        let out = SpatialTracker::default().on_before_turn(bob_state(), "hello");
        assert_eq!(out.state, bob_state());
        assert!(out.system_instruction.unwrap().contains("<spatial_system>"));
    }

    #[test]
    fn test_before_turn_inactive_no_instruction() {
        let out = inactive().on_before_turn(bob_state(), "hello");
        assert_eq!(out.state, bob_state());
        assert!(out.system_instruction.is_none());
    }

    #[test]
    fn test_after_turn_inactive_passes_through() {
        let out = inactive().on_after_turn(bob_state(), BOB_REPLY);
        assert_eq!(out.state, bob_state());
        assert_eq!(out.content, BOB_REPLY);
        assert_eq!(out.outcome, TurnOutcome::Inactive);
    }

    #[test]
    fn test_reenable_resumes_on_existing_state() {
        let mut tracker = inactive();
        let state = tracker.on_after_turn(bob_state(), BOB_REPLY).state;
        assert_eq!(state, bob_state());

        tracker.set_active(true);
        let no_block = tracker.on_after_turn(state, "Nothing new.");
        assert_eq!(no_block.state, bob_state());

        let updated = tracker.on_after_turn(no_block.state, BOB_REPLY);
        assert_eq!(updated.outcome, TurnOutcome::Updated);
        assert_eq!(updated.state.snapshot.get("Bob").map(|c| c.x), Some(5.0));
    }

    #[test]
    fn test_after_turn_at_uses_given_clock() {
        let now = Utc.timestamp_millis_opt(1_234_567).unwrap();
        let out = SpatialTracker::default().after_turn_at(bob_state(), BOB_REPLY, now);
        assert_eq!(out.state.last_update, now);
        assert_eq!(out.content, "Hi there.");
    }
}
