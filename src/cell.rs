//! Cell identifiers and their two-character labels.
//!
//! A cell is a (column, row) pair of zero-based indices into
//! [`COLUMN_LABELS`] and [`ROW_LABELS`]. On the wire it is written as the
//! column label followed by the row label, e.g. `"A1"`.

use std::fmt;

use crate::constants::{COLUMN_LABELS, N, ROW_LABELS};

/// A single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Column index (0 = `A`)
    pub col: usize,
    /// Row index (0 = `1`)
    pub row: usize,
}

impl Cell {
    /// Create a cell from zero-based indices.
    ///
    /// Returns `None` when either index falls outside the board.
    pub fn new(col: usize, row: usize) -> Option<Self> {
        (col < N && row < N).then_some(Self { col, row })
    }

    /// Flat index in column-major order, matching [`all_cells`].
    #[inline]
    pub fn index(self) -> usize {
        self.col * N + self.row
    }

}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COLUMN_LABELS[self.col], ROW_LABELS[self.row])
    }
}

/// Parse a coordinate string (e.g., "b2") into a [`Cell`].
///
/// Input is trimmed and uppercased first. Returns `None` for anything that
/// is not exactly one column label followed by one row label.
pub fn parse_cell(s: &str) -> Option<Cell> {
    parse_labeled(s, &COLUMN_LABELS, &ROW_LABELS)
}

/// Parse a coordinate string against arbitrary column and row labels.
pub(crate) fn parse_labeled(s: &str, columns: &[char], rows: &[char]) -> Option<Cell> {
    let upper = s.trim().to_uppercase();
    let mut chars = upper.chars();
    let (col_char, row_char) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }

    let col = columns.iter().position(|&c| c.to_ascii_uppercase() == col_char)?;
    let row = rows.iter().position(|&r| r.to_ascii_uppercase() == row_char)?;
    Cell::new(col, row)
}

/// Convert a cell to its coordinate string (e.g., "B2").
pub fn str_cell(cell: Cell) -> String {
    cell.to_string()
}

/// Every cell on the board in column-major order: A1, A2, A3, B1, ...
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (0..N).flat_map(|col| (0..N).map(move |row| Cell { col, row }))
}
