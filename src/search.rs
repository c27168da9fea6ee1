//! Exhaustive negamax search with alpha-beta pruning.
//!
//! The 3x3 game tree is small enough to search to the end from any
//! position, so the automated player never loses when it uses this
//! strategy. Scores are depth-adjusted: a win found sooner scores higher
//! and a forced loss is pushed back as far as possible. That keeps the
//! greedy contract intact (win now if possible, otherwise block now) while
//! also avoiding forks the greedy pass cannot see.

use tracing::debug;

use crate::cell::{Cell, all_cells};
use crate::constants::{CELL_COUNT, DRAW_SCORE, WIN_SCORE};
use crate::tracker::{LineTracker, Side};

/// Compact board snapshot used during search.
struct SearchBoard {
    cells: [Option<Side>; CELL_COUNT],
    lines: Vec<Vec<usize>>,
    nodes: u64,
}

impl SearchBoard {
    fn from_tracker(tracker: &LineTracker) -> Self {
        let mut cells = [None; CELL_COUNT];
        for &(cell, side) in tracker.history() {
            cells[cell.index()] = Some(side);
        }
        let lines = tracker
            .lines()
            .iter()
            .map(|line| line.cells().map(|(cell, _)| cell.index()).collect())
            .collect();
        Self {
            cells,
            lines,
            nodes: 0,
        }
    }

    fn has_won(&self, side: Side) -> bool {
        self.lines
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Some(side)))
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Score from the point of view of `to_move`.
    fn negamax(&mut self, to_move: Side, depth: i32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        if self.has_won(to_move.opponent()) {
            return -(WIN_SCORE - depth);
        }
        if self.is_full() {
            return DRAW_SCORE;
        }

        let mut best = -(WIN_SCORE + 1);
        for idx in 0..CELL_COUNT {
            if self.cells[idx].is_some() {
                continue;
            }
            self.cells[idx] = Some(to_move);
            let score = -self.negamax(to_move.opponent(), depth + 1, -beta, -alpha);
            self.cells[idx] = None;

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Find the best cell for the automated player in the current position.
///
/// Ties go to the first cell in [`all_cells`] order. Returns `None` if the
/// game is already decided or no cell is empty.
pub fn best_move(tracker: &LineTracker) -> Option<Cell> {
    let mut board = SearchBoard::from_tracker(tracker);
    if board.has_won(Side::Automated) || board.has_won(Side::Human) {
        return None;
    }

    let mut best: Option<(Cell, i32)> = None;
    let mut alpha = -(WIN_SCORE + 1);
    let beta = WIN_SCORE + 1;

    for cell in all_cells() {
        let idx = cell.index();
        if board.cells[idx].is_some() {
            continue;
        }
        board.cells[idx] = Some(Side::Automated);
        let score = -board.negamax(Side::Human, 1, -beta, -alpha);
        board.cells[idx] = None;

        if best.is_none_or(|(_, s)| score > s) {
            best = Some((cell, score));
            alpha = alpha.max(score);
        }
    }

    if let Some((cell, score)) = best {
        debug!(cell = %cell, score, nodes = board.nodes, "negamax search finished");
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::parse_cell;

    fn c(s: &str) -> Cell {
        parse_cell(s).unwrap()
    }

    fn setup(moves: &[(&str, Side)]) -> LineTracker {
        let mut tracker = LineTracker::default();
        for &(s, side) in moves {
            tracker.apply_move(c(s), side);
        }
        tracker
    }

    #[test]
    fn test_takes_immediate_win() {
        let tracker = setup(&[
            ("A1", Side::Human),
            ("B1", Side::Automated),
            ("A2", Side::Human),
            ("B2", Side::Automated),
        ]);
        assert_eq!(best_move(&tracker), Some(c("B3")));
    }

    #[test]
    fn test_blocks_even_when_lost() {
        // Two human cells and nothing for the engine: every move eventually
        // loses, but A3 loses latest.
        let tracker = setup(&[("A1", Side::Human), ("A2", Side::Human)]);
        assert_eq!(best_move(&tracker), Some(c("A3")));
    }

    #[test]
    fn test_answers_corner_with_center() {
        let tracker = setup(&[("A1", Side::Human)]);
        assert_eq!(best_move(&tracker), Some(c("B2")));
    }

    #[test]
    fn test_avoids_greedy_fork_trap() {
        // After A1 / B2 / C3 the greedy pass plays a corner and walks into a
        // double threat; search has to play an edge.
        let tracker = setup(&[
            ("A1", Side::Human),
            ("B2", Side::Automated),
            ("C3", Side::Human),
        ]);
        let cell = best_move(&tracker).unwrap();
        assert!(
            ["A2", "B1", "B3", "C2"].contains(&cell.to_string().as_str()),
            "expected an edge, got {cell}"
        );
    }

    #[test]
    fn test_none_when_decided() {
        let tracker = setup(&[
            ("A1", Side::Human),
            ("A2", Side::Human),
            ("A3", Side::Human),
        ]);
        assert_eq!(best_move(&tracker), None);
    }
}
