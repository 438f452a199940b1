// crates/spatial-tracker/src/tracker/prompt.rs
// Out-of-band system instruction asking the model for a spatial block

use super::extract::SPATIAL_BLOCK;
use serde_json::json;

/// Build the instruction attached to every active turn.
///
/// Pure function of a static template: the coordinate convention, the exact
/// delimiter pair, and one example packet to anchor the output format.
pub fn build_instructions() -> String {
    let example = json!({
        "characters": [
            { "name": "Alice", "x": -2, "y": 3, "status": "Leaning against the bar" },
            { "name": "Guard", "x": 4, "y": -1, "status": "Watching the door" }
        ]
    });

    format!(
        "[SPATIAL TRACKING]\n\
         Track where every character in the scene stands relative to the user.\n\
         The user is always at (0,0). x is left (negative) / right (positive); \
         y is behind (negative) / ahead (positive). One unit is roughly one step.\n\
         At the very end of every reply, append exactly one block in this format:\n\
         {open}\n{example}\n{close}\n\
         List every character currently present, including ones that did not move. \
         Coordinates must be numbers. Keep status to a short phrase. \
         Do not mention the block in the narrative.",
        open = SPATIAL_BLOCK.open,
        close = SPATIAL_BLOCK.close,
        example = example,
    )
}
