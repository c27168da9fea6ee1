//! Single-pass greedy move selection.
//!
//! Every line that still has an empty cell is visited once, in tracker
//! order. The first line whose sum is one automated stone short of a win
//! is taken immediately. Otherwise the move goes into the line with the
//! greatest sum, where a later line replaces an earlier one on equal sums.
//!
//! This does not look ahead. Blocks happen because a line with two human
//! stones outweighs every line the engine could still be building.

use tracing::trace;

use crate::cell::Cell;
use crate::constants::{AUTOMATED_WEIGHT, N};
use crate::tracker::LineTracker;

/// Line sum that means the automated player needs one more cell to win.
const ONE_SHORT: u32 = (N as u32 - 1) * AUTOMATED_WEIGHT;

/// Choose a cell for the automated player. Does not play it.
///
/// Returns `None` only when no line has an empty cell left.
pub fn choose_move(tracker: &LineTracker) -> Option<Cell> {
    let mut best = None;
    let mut max_weight = 0;

    for line in tracker.lines() {
        // Skip lines with nowhere left to play
        let Some(empty) = line.first_empty() else {
            continue;
        };
        let weight = line.sum();

        if weight == ONE_SHORT {
            trace!(line = ?line.kind, cell = %empty, "line one move from completion");
            return Some(empty);
        }

        if weight >= max_weight {
            max_weight = weight;
            best = Some(empty);
        }
    }

    trace!(max_weight, "greedy fallback");
    best
}
