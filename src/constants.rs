//! Constants for board geometry, side weights, and search scores.
//!
//! The line tracker works on any square board, but the game is played on
//! the fixed 3x3 grid described here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = N * N;

/// Number of winning lines: every column, every row, and the two diagonals.
pub const LINE_COUNT: usize = 2 * N + 2;

/// Column labels, left to right.
pub const COLUMN_LABELS: [char; N] = ['A', 'B', 'C'];

/// Row labels, bottom to top.
pub const ROW_LABELS: [char; N] = ['1', '2', '3'];

// =============================================================================
// Line Weights
// =============================================================================

/// Weight of a cell held by the automated player.
pub const AUTOMATED_WEIGHT: u32 = 1;

/// Weight of a cell held by the human player.
///
/// Must exceed `N * AUTOMATED_WEIGHT` so a mixed line never sums to either
/// winning threshold.
pub const HUMAN_WEIGHT: u32 = 10;

/// Weight of an empty cell.
pub const EMPTY_WEIGHT: u32 = 0;

// =============================================================================
// Search Scores
// =============================================================================

/// Score of a won position at depth 0. Deeper wins score `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 1000;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

// Compile-time check: the weight encoding must keep the two sides apart.
const _: () = assert!(HUMAN_WEIGHT > N as u32 * AUTOMATED_WEIGHT);
