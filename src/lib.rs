//! Tictac-Rust: a tic-tac-toe engine that does not lose.
//!
//! The board is tracked as a set of weighted winning lines rather than a
//! grid. Each move writes a per-side weight into every line containing the
//! cell, and a line's sum shows both completion and how close each side is
//! to completing it.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, side weights, and search scores
//! - [`cell`] - Cell identifiers and coordinate parsing
//! - [`tracker`] - Line tracker: move application, win and draw detection
//! - [`greedy`] - Single-pass line-sum heuristic
//! - [`search`] - Exhaustive negamax search
//! - [`strategy`] - Strategy selection
//! - [`console`] - Text driver for a human opponent
//! - [`selfplay`] - Batch games against a random opponent
//!
//! ## Example
//!
//! ```
//! use tictac_rust::cell::parse_cell;
//! use tictac_rust::strategy::Strategy;
//! use tictac_rust::tracker::{LineTracker, Side};
//!
//! let mut tracker = LineTracker::default();
//! tracker.apply_move(parse_cell("A1").unwrap(), Side::Human);
//! tracker.apply_move(parse_cell("A2").unwrap(), Side::Human);
//!
//! // The engine blocks column A
//! let reply = tracker.select_automated_move(Strategy::Negamax);
//! assert_eq!(reply, parse_cell("A3"));
//! ```

pub mod cell;
pub mod console;
pub mod constants;
pub mod greedy;
pub mod search;
pub mod selfplay;
pub mod strategy;
pub mod tracker;
