//! Line tracker: board state, move application, and win/draw detection.
//!
//! The board is never stored as a grid. Instead every winning line (each
//! column, each row, and both diagonals) keeps its own cell-to-weight map.
//! A move writes the mover's weight into every line containing the cell,
//! so a line's sum tells at a glance how far each side has progressed:
//!
//! - `N * AUTOMATED_WEIGHT` - the automated player owns the whole line
//! - `N * HUMAN_WEIGHT` - the human player owns the whole line
//! - anything else - the line is open or blocked
//!
//! Lines never share cell state; updating a cell touches each line
//! independently.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::cell::{Cell, all_cells, parse_labeled};
use crate::constants::{
    AUTOMATED_WEIGHT, COLUMN_LABELS, EMPTY_WEIGHT, HUMAN_WEIGHT, LINE_COUNT, N, ROW_LABELS,
};
use crate::strategy::Strategy;
use crate::{greedy, search};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The engine ("computer")
    Automated,
    /// The operator at the terminal ("player")
    Human,
}

impl Side {
    /// Weight this side writes into a line.
    #[inline]
    pub fn weight(self) -> u32 {
        match self {
            Side::Automated => AUTOMATED_WEIGHT,
            Side::Human => HUMAN_WEIGHT,
        }
    }

    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Automated => Side::Human,
            Side::Human => Side::Automated,
        }
    }

    /// Line sum at which this side has completed the line.
    #[inline]
    pub fn winning_sum(self) -> u32 {
        N as u32 * self.weight()
    }

    /// Board glyph used when rendering the grid.
    pub fn mark(self) -> char {
        match self {
            Side::Automated => 'X',
            Side::Human => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Automated => write!(f, "computer"),
            Side::Human => write!(f, "player"),
        }
    }
}

/// Which winning combination a [`Line`] represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    Column(usize),
    Row(usize),
    /// A3, B2, C1
    MajorDiagonal,
    /// A1, B2, C3
    MinorDiagonal,
}

/// A winning line with its own per-cell weights.
#[derive(Clone, Debug)]
pub struct Line {
    pub kind: LineKind,
    weights: Vec<(Cell, u32)>,
}

impl Line {
    fn new(kind: LineKind, cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            kind,
            weights: cells.into_iter().map(|c| (c, EMPTY_WEIGHT)).collect(),
        }
    }

    /// Total weight of the line.
    pub fn sum(&self) -> u32 {
        self.weights.iter().map(|&(_, w)| w).sum()
    }

    /// First empty cell in line order, if any.
    pub fn first_empty(&self) -> Option<Cell> {
        self.weights
            .iter()
            .find(|&&(_, w)| w == EMPTY_WEIGHT)
            .map(|&(c, _)| c)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.weights.iter().any(|&(c, _)| c == cell)
    }

    /// Weight recorded for `cell`, or `None` if the cell is not on this line.
    pub fn weight_of(&self, cell: Cell) -> Option<u32> {
        self.weights
            .iter()
            .find(|&&(c, _)| c == cell)
            .map(|&(_, w)| w)
    }

    /// Cells of the line with their current weights.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.weights.iter().copied()
    }

    /// The side that owns every cell of this line, if one does.
    pub fn completed_by(&self) -> Option<Side> {
        let sum = self.sum();
        [Side::Automated, Side::Human]
            .into_iter()
            .find(|side| sum == side.winning_sum())
    }

    fn set(&mut self, cell: Cell, weight: u32) {
        if let Some(entry) = self.weights.iter_mut().find(|(c, _)| *c == cell) {
            entry.1 = weight;
        }
    }
}

/// Error returned by [`LineTracker::try_apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Cell has already been played
    Occupied(Cell),
    /// A line has already been completed
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Occupied(cell) => write!(f, "illegal move: {cell} is already taken"),
            MoveError::GameOver => write!(f, "illegal move: the game is over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Game state for a single game: all lines, the move set, and the
/// game-over flag.
#[derive(Clone, Debug)]
pub struct LineTracker {
    columns: [char; N],
    rows: [char; N],
    lines: Vec<Line>,
    cells: BTreeSet<Cell>,
    moves: BTreeSet<Cell>,
    history: Vec<(Cell, Side)>,
    game_over: bool,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self::new(COLUMN_LABELS, ROW_LABELS)
    }
}

impl LineTracker {
    /// Build an empty board from column and row labels, with every
    /// winning line at zero weight.
    ///
    /// Lines are ordered: columns, rows, major diagonal, minor diagonal.
    /// The greedy heuristic depends on this order for its tie-breaks.
    pub fn new(columns: [char; N], rows: [char; N]) -> Self {
        let mut lines = Vec::with_capacity(LINE_COUNT);

        for col in 0..N {
            lines.push(Line::new(
                LineKind::Column(col),
                (0..N).map(|row| Cell { col, row }),
            ));
        }
        for row in 0..N {
            lines.push(Line::new(
                LineKind::Row(row),
                (0..N).map(|col| Cell { col, row }),
            ));
        }
        // Column i pairs with row N - i (1-based), i.e. A3, B2, C1
        lines.push(Line::new(
            LineKind::MajorDiagonal,
            (0..N).map(|col| Cell { col, row: N - 1 - col }),
        ));
        lines.push(Line::new(
            LineKind::MinorDiagonal,
            (0..N).map(|col| Cell { col, row: col }),
        ));

        Self {
            columns,
            rows,
            lines,
            cells: all_cells().collect(),
            moves: BTreeSet::new(),
            history: Vec::new(),
            game_over: false,
        }
    }

    /// Play `cell` for `side` without any legality check.
    ///
    /// The weight is written into every line containing the cell before the
    /// lines are scanned for completion. Callers must only pass unoccupied
    /// cells; use [`LineTracker::try_apply_move`] when that is not already
    /// guaranteed.
    ///
    /// Returns the set of all cells played so far.
    #[instrument(level = "debug", skip(self), fields(cell = %cell))]
    pub fn apply_move(&mut self, cell: Cell, side: Side) -> &BTreeSet<Cell> {
        let weight = side.weight();
        for line in self.lines.iter_mut().filter(|l| l.contains(cell)) {
            line.set(cell, weight);
        }

        let completed = self
            .lines
            .iter()
            .filter(|l| l.contains(cell))
            .find(|l| l.completed_by().is_some());
        if let Some(line) = completed {
            info!(line = ?line.kind, sum = line.sum(), "line completed");
            self.game_over = true;
        }

        self.moves.insert(cell);
        self.history.push((cell, side));
        &self.moves
    }

    /// Play `cell` for `side`, rejecting occupied cells and finished games.
    pub fn try_apply_move(
        &mut self,
        cell: Cell,
        side: Side,
    ) -> Result<&BTreeSet<Cell>, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if self.moves.contains(&cell) {
            return Err(MoveError::Occupied(cell));
        }
        Ok(self.apply_move(cell, side))
    }

    /// Pick a cell for the automated player with `strategy` and play it.
    ///
    /// Returns `None` when the game is already over or no empty cell
    /// remains; the caller should treat that as the end of the game.
    #[instrument(level = "debug", skip(self))]
    pub fn select_automated_move(&mut self, strategy: Strategy) -> Option<Cell> {
        if self.game_over {
            warn!("automated move requested after the game ended");
            return None;
        }

        let choice = match strategy {
            Strategy::Greedy => greedy::choose_move(self),
            Strategy::Negamax => search::best_move(self),
        };

        match choice {
            Some(cell) => {
                debug!(cell = %cell, "automated move chosen");
                self.apply_move(cell, Side::Automated);
                Some(cell)
            }
            None => {
                warn!(moves = self.moves.len(), "no automated move available");
                None
            }
        }
    }

    /// True once any line has been completed. Never resets.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// True when every cell is played and no line was completed.
    pub fn is_draw(&self) -> bool {
        self.moves.len() == self.cells.len() && !self.game_over
    }

    /// The side owning a completed line, if any.
    pub fn winner(&self) -> Option<Side> {
        self.lines.iter().find_map(Line::completed_by)
    }

    /// Cells played so far.
    pub fn moves(&self) -> &BTreeSet<Cell> {
        &self.moves
    }

    /// Moves in the order they were played.
    pub fn history(&self) -> &[(Cell, Side)] {
        &self.history
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Parse a coordinate such as "b2" against this board's labels.
    pub fn parse_cell(&self, text: &str) -> Option<Cell> {
        parse_labeled(text, &self.columns, &self.rows)
    }

    /// Two-character label of `cell` on this board.
    pub fn label(&self, cell: Cell) -> String {
        format!("{}{}", self.columns[cell.col], self.rows[cell.row])
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The side that played `cell`, if any.
    pub fn occupant(&self, cell: Cell) -> Option<Side> {
        self.history
            .iter()
            .find(|&&(c, _)| c == cell)
            .map(|&(_, side)| side)
    }
}

impl fmt::Display for LineTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for label in self.columns {
            write!(f, " {label}")?;
        }
        writeln!(f)?;
        for row in (0..N).rev() {
            write!(f, "{}", self.rows[row])?;
            for col in 0..N {
                let ch = self
                    .occupant(Cell { col, row })
                    .map(Side::mark)
                    .unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::parse_cell;
    use crate::constants::{CELL_COUNT, LINE_COUNT};

    fn c(s: &str) -> Cell {
        parse_cell(s).unwrap()
    }

    fn line_labels(line: &Line) -> Vec<String> {
        line.cells().map(|(cell, _)| cell.to_string()).collect()
    }

    #[test]
    fn test_new_builds_all_lines() {
        let tracker = LineTracker::default();
        assert_eq!(tracker.lines().len(), LINE_COUNT);
        for line in tracker.lines() {
            assert_eq!(line.cells().count(), N);
            assert_eq!(line.sum(), 0);
            assert!(line.first_empty().is_some());
        }
        assert_eq!(tracker.cell_count(), CELL_COUNT);
        assert!(tracker.moves().is_empty());
        assert!(!tracker.is_over());
        assert!(!tracker.is_draw());
    }

    #[test]
    fn test_new_from_explicit_labels() {
        let tracker = LineTracker::new(['X', 'Y', 'Z'], ['7', '8', '9']);
        assert_eq!(tracker.cell_count(), CELL_COUNT);
        assert_eq!(tracker.lines().len(), LINE_COUNT);

        let labels = |line: &Line| -> Vec<String> {
            line.cells().map(|(cell, _)| tracker.label(cell)).collect()
        };
        assert_eq!(labels(&tracker.lines()[0]), ["X7", "X8", "X9"]);
        assert_eq!(labels(&tracker.lines()[4]), ["X8", "Y8", "Z8"]);
        assert_eq!(labels(&tracker.lines()[6]), ["X9", "Y8", "Z7"]);
        assert_eq!(labels(&tracker.lines()[7]), ["X7", "Y8", "Z9"]);

        assert_eq!(tracker.parse_cell("y8"), Some(Cell { col: 1, row: 1 }));
        assert_eq!(tracker.parse_cell("A1"), None);
    }

    #[test]
    fn test_custom_labels_in_grid() {
        let mut tracker = LineTracker::new(['X', 'Y', 'Z'], ['7', '8', '9']);
        let cell = tracker.parse_cell("Z7").unwrap();
        tracker.apply_move(cell, Side::Human);
        assert_eq!(tracker.to_string(), "  X Y Z\n9 . . .\n8 . . .\n7 . . O\n");
    }

    #[test]
    fn test_no_automated_move_after_game_over() {
        for strategy in [Strategy::Greedy, Strategy::Negamax] {
            let mut tracker = LineTracker::default();
            for s in ["A1", "A2", "A3"] {
                tracker.apply_move(c(s), Side::Human);
            }
            assert!(tracker.is_over());

            assert_eq!(tracker.select_automated_move(strategy), None, "{strategy}");
            assert_eq!(tracker.moves().len(), 3, "{strategy}");
            assert_eq!(tracker.winner(), Some(Side::Human));
        }
    }

    #[test]
    fn test_line_order_and_diagonals() {
        let tracker = LineTracker::default();
        let lines = tracker.lines();
        assert_eq!(line_labels(&lines[0]), ["A1", "A2", "A3"]);
        assert_eq!(line_labels(&lines[3]), ["A1", "B1", "C1"]);
        assert_eq!(lines[6].kind, LineKind::MajorDiagonal);
        assert_eq!(line_labels(&lines[6]), ["A3", "B2", "C1"]);
        assert_eq!(lines[7].kind, LineKind::MinorDiagonal);
        assert_eq!(line_labels(&lines[7]), ["A1", "B2", "C3"]);
    }

    #[test]
    fn test_apply_move_updates_every_containing_line() {
        let mut tracker = LineTracker::default();
        tracker.apply_move(c("B2"), Side::Human);

        let touched: Vec<_> = tracker
            .lines()
            .iter()
            .filter(|l| l.weight_of(c("B2")) == Some(HUMAN_WEIGHT))
            .map(|l| l.kind)
            .collect();
        assert_eq!(
            touched,
            [
                LineKind::Column(1),
                LineKind::Row(1),
                LineKind::MajorDiagonal,
                LineKind::MinorDiagonal
            ]
        );
        let untouched = tracker.lines().iter().filter(|l| l.sum() == 0).count();
        assert_eq!(untouched, LINE_COUNT - 4);
    }

    #[test]
    fn test_apply_move_returns_move_set() {
        let mut tracker = LineTracker::default();
        tracker.apply_move(c("A1"), Side::Human);
        let moves = tracker.apply_move(c("C3"), Side::Automated);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&c("A1")));
        assert!(moves.contains(&c("C3")));
    }

    #[test]
    fn test_win_fires_on_completing_move_only() {
        let mut tracker = LineTracker::default();
        tracker.apply_move(c("A1"), Side::Automated);
        assert!(!tracker.is_over());
        tracker.apply_move(c("B1"), Side::Automated);
        assert!(!tracker.is_over());
        tracker.apply_move(c("C1"), Side::Automated);
        assert!(tracker.is_over());
        assert_eq!(tracker.winner(), Some(Side::Automated));
        assert!(!tracker.is_draw());
    }

    #[test]
    fn test_human_win_sums_to_thirty() {
        let mut tracker = LineTracker::default();
        for s in ["A3", "B2", "C1"] {
            tracker.apply_move(c(s), Side::Human);
        }
        let diag = &tracker.lines()[6];
        assert_eq!(diag.sum(), N as u32 * HUMAN_WEIGHT);
        assert_eq!(diag.completed_by(), Some(Side::Human));
        assert!(tracker.is_over());
    }

    #[test]
    fn test_mixed_lines_never_reach_threshold() {
        // Every owner pattern of a single line with both sides present.
        let sides = [Side::Automated, Side::Human];
        for a in sides {
            for b in sides {
                for d in sides {
                    let mut tracker = LineTracker::default();
                    tracker.apply_move(c("A1"), a);
                    tracker.apply_move(c("A2"), b);
                    tracker.apply_move(c("A3"), d);
                    let mixed = !(a == b && b == d);
                    assert_eq!(tracker.is_over(), !mixed, "{a:?} {b:?} {d:?}");
                }
            }
        }
    }

    #[test]
    fn test_draw_only_on_full_board_without_win() {
        let mut tracker = LineTracker::default();
        let order = [
            ("A3", Side::Human),
            ("B3", Side::Automated),
            ("A2", Side::Human),
            ("B2", Side::Automated),
            ("B1", Side::Human),
            ("C2", Side::Automated),
            ("C1", Side::Human),
            ("A1", Side::Automated),
            ("C3", Side::Human),
        ];
        for (i, (s, side)) in order.iter().enumerate() {
            assert!(!tracker.is_draw(), "draw reported early at move {i}");
            tracker.apply_move(c(s), *side);
            assert!(!tracker.is_over());
        }
        assert_eq!(tracker.moves().len(), CELL_COUNT);
        assert!(tracker.is_draw());
        assert_eq!(tracker.winner(), None);
    }

    #[test]
    fn test_try_apply_move_rejects_occupied() {
        let mut tracker = LineTracker::default();
        tracker.try_apply_move(c("B2"), Side::Human).unwrap();
        let err = tracker.try_apply_move(c("B2"), Side::Automated).unwrap_err();
        assert_eq!(err, MoveError::Occupied(c("B2")));
        assert_eq!(tracker.lines()[1].weight_of(c("B2")), Some(HUMAN_WEIGHT));
        assert_eq!(tracker.moves().len(), 1);
    }

    #[test]
    fn test_try_apply_move_rejects_after_game_over() {
        let mut tracker = LineTracker::default();
        for s in ["A1", "A2", "A3"] {
            tracker.try_apply_move(c(s), Side::Human).unwrap();
        }
        assert_eq!(
            tracker.try_apply_move(c("B1"), Side::Automated),
            Err(MoveError::GameOver)
        );
        assert!(tracker.is_over());
    }

    #[test]
    fn test_occupant_and_display() {
        let mut tracker = LineTracker::default();
        tracker.apply_move(c("A1"), Side::Automated);
        tracker.apply_move(c("B2"), Side::Human);
        assert_eq!(tracker.occupant(c("A1")), Some(Side::Automated));
        assert_eq!(tracker.occupant(c("B2")), Some(Side::Human));
        assert_eq!(tracker.occupant(c("C3")), None);
        assert_eq!(tracker.to_string(), "  A B C\n3 . . .\n2 . O .\n1 X . .\n");
    }
}
