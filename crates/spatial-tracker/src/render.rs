// crates/spatial-tracker/src/render.rs
// Read-only text view of the persisted spatial state

use crate::config::RenderOptions;
use spatial_types::{CharacterEntry, PersistedState, SpatialSnapshot};
use std::collections::BTreeMap;
use std::fmt::Write;

const USER_MARK: char = '@';
const EMPTY_MARK: char = '.';
const COLLISION_MARK: char = '*';

/// Render the state as a character list, optionally followed by a radar grid
pub fn render(state: &PersistedState, opts: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Spatial state (updated {})",
        state.last_update.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let snapshot = &state.snapshot;
    if snapshot.is_empty() {
        out.push_str("  No characters tracked\n");
        return out;
    }

    let name_width = snapshot
        .characters
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    for c in &snapshot.characters {
        let _ = write!(
            out,
            "  {:<width$}  ({}, {})  {}",
            c.name,
            c.x,
            c.y,
            describe_position(c.x, c.y),
            width = name_width
        );
        if !c.status.is_empty() {
            let _ = write!(out, "  - {}", c.status);
        }
        out.push('\n');
    }

    if opts.show_grid {
        out.push('\n');
        out.push_str(&render_grid(snapshot, opts.grid_radius));
    }
    out
}

/// Human phrase for an offset from the user
pub fn describe_position(x: f64, y: f64) -> String {
    let mut parts = Vec::with_capacity(2);
    if x < 0.0 {
        parts.push(format!("{} left", -x));
    } else if x > 0.0 {
        parts.push(format!("{} right", x));
    }
    if y > 0.0 {
        parts.push(format!("{} ahead", y));
    } else if y < 0.0 {
        parts.push(format!("{} behind", -y));
    }

    if parts.is_empty() {
        "at your position".to_string()
    } else {
        parts.join(", ")
    }
}

/// Square radar centered on the user, ahead at the top.
///
/// Positions round to the nearest cell. Characters beyond `radius` are
/// pinned to the border and listed as out of range.
pub fn render_grid(snapshot: &SpatialSnapshot, radius: u32) -> String {
    let r = i64::from(radius);
    let mut cells: BTreeMap<(i64, i64), Vec<&CharacterEntry>> = BTreeMap::new();
    let mut out_of_range = Vec::new();

    for c in &snapshot.characters {
        let (cx, x_in) = grid_cell(c.x, r);
        let (cy, y_in) = grid_cell(c.y, r);
        if !(x_in && y_in) {
            out_of_range.push(c.name.as_str());
        }
        cells.entry((cx, cy)).or_default().push(c);
    }

    let mut out = String::new();
    for y in (-r..=r).rev() {
        let row: Vec<String> = (-r..=r)
            .map(|x| cell_mark(x, y, cells.get(&(x, y))).to_string())
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }

    let legend: Vec<String> = snapshot
        .characters
        .iter()
        .map(|c| format!("{} = {}", initial(c), c.name))
        .collect();
    let _ = writeln!(out, "Legend: {} = you, {}", USER_MARK, legend.join(", "));
    if !out_of_range.is_empty() {
        let _ = writeln!(out, "Out of range: {}", out_of_range.join(", "));
    }
    out
}

/// Round a coordinate to a cell index clamped to `[-r, r]`.
///
/// Range check and clamp happen in f64 so huge coordinates never hit
/// integer saturation. Returns whether the position was inside the grid.
fn grid_cell(v: f64, r: i64) -> (i64, bool) {
    let limit = r as f64;
    let rounded = v.round();
    (rounded.clamp(-limit, limit) as i64, rounded.abs() <= limit)
}

fn cell_mark(x: i64, y: i64, occupants: Option<&Vec<&CharacterEntry>>) -> char {
    let is_origin = x == 0 && y == 0;
    match occupants.map(|o| o.as_slice()) {
        None | Some([]) if is_origin => USER_MARK,
        None | Some([]) => EMPTY_MARK,
        Some([only]) if !is_origin => initial(only),
        Some(_) => COLLISION_MARK,
    }
}

fn initial(c: &CharacterEntry) -> char {
    c.name
        .trim()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().next().unwrap_or(ch))
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn state_with(chars: Vec<CharacterEntry>) -> PersistedState {
        PersistedState {
            snapshot: SpatialSnapshot::new(chars),
            last_update: Utc.with_ymd_and_hms(2026, 10, 16, 12, 30, 0).unwrap(),
        }
    }

    fn list_only() -> RenderOptions {
        RenderOptions {
            show_grid: false,
            ..Default::default()
        }
    }

    // ============================================================================
    // describe_position tests
    // ============================================================================

    #[test]
    fn test_describe_position() {
        assert_eq!(describe_position(5.0, 0.0), "5 right");
        assert_eq!(describe_position(-2.5, 3.0), "2.5 left, 3 ahead");
        assert_eq!(describe_position(0.0, -1.0), "1 behind");
        assert_eq!(describe_position(0.0, 0.0), "at your position");
    }

    // ============================================================================
    // render tests
    // ============================================================================

    #[test]
    fn test_render_empty_state() {
        let text = render(&state_with(vec![]), &RenderOptions::default());
        assert!(text.contains("2026-10-16 12:30:00 UTC"));
        assert!(text.contains("No characters tracked"));
    }

    #[test]
    fn test_render_list() {
        let text = render(
            &state_with(vec![
                CharacterEntry::new("Bob", 5.0, 0.0, "Walking"),
                CharacterEntry::new("Alice", -1.0, 2.0, ""),
            ]),
            &list_only(),
        );
        assert!(text.contains("Bob    (5, 0)  5 right  - Walking"));
        assert!(text.contains("Alice  (-1, 2)  1 left, 2 ahead\n"));
        assert!(!text.contains("Legend"));
    }

    // ============================================================================
    // render_grid tests
    // ============================================================================

    #[test]
    fn test_grid_places_characters() {
        let snap = SpatialSnapshot::new(vec![
            CharacterEntry::new("bob", 1.0, 1.0, ""),
            CharacterEntry::new("Ann", -1.0, -0.6, ""),
        ]);
        let grid = render_grid(&snap, 1);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows[0], ". . B");
        assert_eq!(rows[1], ". @ .");
        assert_eq!(rows[2], "A . .");
        assert!(grid.contains("Legend: @ = you, B = bob, A = Ann"));
    }

    #[test]
    fn test_grid_collisions_and_origin() {
        let snap = SpatialSnapshot::new(vec![
            CharacterEntry::new("Bob", 1.0, 0.0, ""),
            CharacterEntry::new("Bea", 1.2, 0.1, ""),
            CharacterEntry::new("Cat", 0.0, 0.0, ""),
        ]);
        let grid = render_grid(&snap, 1);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows[1], ". * *");
    }

    #[test]
    fn test_grid_out_of_range_clamped() {
        let snap = SpatialSnapshot::new(vec![CharacterEntry::new("Far", 10.0, 0.0, "")]);
        let grid = render_grid(&snap, 2);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 5 + 2);
        assert_eq!(rows[2], ". . @ . F");
        assert!(grid.contains("Out of range: Far"));
    }

    #[test]
    fn test_grid_extreme_coordinates_clamped() {
        let snap = SpatialSnapshot::new(vec![
            CharacterEntry::new("West", -1e300, 0.0, ""),
            CharacterEntry::new("North", 0.0, 1e300, ""),
            CharacterEntry::new("Corner", f64::MAX, f64::MIN, ""),
        ]);
        let grid = render_grid(&snap, 1);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows[0], ". N .");
        assert_eq!(rows[1], "W @ .");
        assert_eq!(rows[2], ". . C");
        assert!(grid.contains("Out of range: West, North, Corner"));
    }

    #[test]
    fn test_render_state_with_huge_coordinate_from_reply() {
        use crate::tracker::{SpatialTracker, StageHooks, TurnOutcome};

        let reply = r#"<spatial_system>{"characters":[{"name":"Far","x":-1e300,"y":0,"status":""}]}</spatial_system>"#;
        let result = SpatialTracker::default().on_after_turn(state_with(vec![]), reply);
        assert_eq!(result.outcome, TurnOutcome::Updated);

        let text = render(&result.state, &RenderOptions::default());
        assert!(text.contains("Out of range: Far"));
    }

    #[test]
    fn test_render_includes_grid_by_default() {
        let text = render(
            &state_with(vec![CharacterEntry::new("Bob", 0.0, 1.0, "")]),
            &RenderOptions::default(),
        );
        assert!(text.contains("Legend: @ = you, B = Bob"));
    }
}
