//! Line-oriented console driver.
//!
//! Runs one game over any `BufRead` / `Write` pair: asks who moves first,
//! then alternates human and automated turns until a line is completed or
//! the board fills up.
//!
//! ## Session
//!
//! ```text
//! Tic Tac Toe. Who goes first? 1 - player (P), 2 - computer (C)
//! 2
//! C A1
//! P B2
//! C C3
//! P C4
//! Incorrect field name
//! P C1
//! C A3
//! P A2
//! C B3
//! The computer won
//! ```
//!
//! Invalid input is re-prompted. With no retry cap this repeats forever;
//! end of input always aborts the game with an error.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, instrument};

use crate::cell::Cell;
use crate::strategy::Strategy;
use crate::tracker::{LineTracker, Side};

const SIDE_PROMPT: &str = "Tic Tac Toe. Who goes first? 1 - player (P), 2 - computer (C)";
const HUMAN_PROMPT: &str = "P ";

/// Rejected operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Side selection was not `1` or `2`
    InvalidSideSelection,
    /// Text does not name a board cell
    InvalidCell,
    /// Cell has already been played
    CellOccupied,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::InvalidSideSelection => {
                write!(f, "Incorrect value. Repeat the enter: 1 or 2")
            }
            InputError::InvalidCell => write!(f, "Incorrect field name"),
            InputError::CellOccupied => write!(f, "Such a move has already been"),
        }
    }
}

impl std::error::Error for InputError {}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// Options for a console game.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Strategy for the automated player
    pub strategy: Strategy,
    /// Side moving first; asked interactively when `None`
    pub first: Option<Side>,
    /// Consecutive invalid entries tolerated before giving up; `None` = no limit
    pub max_retries: Option<usize>,
    /// Print the grid after every move
    pub show_board: bool,
}

/// Parse the answer to the "who goes first" prompt.
pub fn parse_side_selection(s: &str) -> Result<Side, InputError> {
    match s.trim().parse::<u32>() {
        Ok(1) => Ok(Side::Human),
        Ok(2) => Ok(Side::Automated),
        _ => Err(InputError::InvalidSideSelection),
    }
}

/// A single game played over a text stream.
pub struct Console<R, W> {
    input: R,
    output: W,
    settings: Settings,
    tracker: LineTracker,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Self::with_tracker(input, output, settings, LineTracker::default())
    }

    /// Play on a board with its own labels.
    pub fn with_tracker(
        input: R,
        output: W,
        settings: Settings,
        tracker: LineTracker,
    ) -> Self {
        Self {
            input,
            output,
            settings,
            tracker,
        }
    }

    /// Game state so far.
    pub fn tracker(&self) -> &LineTracker {
        &self.tracker
    }

    /// Give back the output stream (for inspecting a finished game).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play the game to the end.
    #[instrument(skip(self), fields(strategy = %self.settings.strategy))]
    pub fn run(&mut self) -> Result<Outcome> {
        let mut side = match self.settings.first {
            Some(side) => side,
            None => self.ask_first()?,
        };
        info!(first = %side, "game started");

        loop {
            match side {
                Side::Human => {
                    let cell = self.read_human_move()?;
                    self.tracker.apply_move(cell, Side::Human);
                }
                Side::Automated => {
                    match self.tracker.select_automated_move(self.settings.strategy) {
                        Some(cell) => {
                            writeln!(self.output, "C {}", self.tracker.label(cell))?
                        }
                        None => return self.finish(Outcome::Draw),
                    }
                }
            }

            if self.settings.show_board {
                write!(self.output, "{}", self.tracker)?;
            }

            if self.tracker.is_draw() {
                return self.finish(Outcome::Draw);
            }
            if self.tracker.is_over() {
                return self.finish(Outcome::Winner(side));
            }
            side = side.opponent();
        }
    }

    /// Check an operator's cell entry against the board and the move set.
    pub fn validate_cell(&self, text: &str) -> Result<Cell, InputError> {
        let cell = self
            .tracker
            .parse_cell(text)
            .ok_or(InputError::InvalidCell)?;
        if self.tracker.moves().contains(&cell) {
            return Err(InputError::CellOccupied);
        }
        Ok(cell)
    }

    fn finish(&mut self, outcome: Outcome) -> Result<Outcome> {
        let message = match outcome {
            Outcome::Draw => "Draw",
            Outcome::Winner(Side::Human) => "The player won",
            Outcome::Winner(Side::Automated) => "The computer won",
        };
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        info!(?outcome, moves = self.tracker.moves().len(), "game finished");
        Ok(outcome)
    }

    fn ask_first(&mut self) -> Result<Side> {
        let mut failures = 0;
        loop {
            let line = self.prompt(&format!("{SIDE_PROMPT}\n"))?;
            match parse_side_selection(&line) {
                Ok(side) => return Ok(side),
                Err(err) => self.reject(err, &mut failures)?,
            }
        }
    }

    fn read_human_move(&mut self) -> Result<Cell> {
        let mut failures = 0;
        loop {
            let line = self.prompt(HUMAN_PROMPT)?;
            match self.validate_cell(&line) {
                Ok(cell) => return Ok(cell),
                Err(err) => self.reject(err, &mut failures)?,
            }
        }
    }

    /// Report a bad entry and enforce the retry cap.
    fn reject(&mut self, err: InputError, failures: &mut usize) -> Result<()> {
        debug!(?err, failures = *failures, "input rejected");
        writeln!(self.output, "{err}")?;
        *failures += 1;
        if let Some(max) = self.settings.max_retries {
            if *failures > max {
                bail!("giving up after {failures} invalid entries (last: {err})");
            }
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            bail!("input closed before the game finished");
        }
        Ok(line.trim().to_string())
    }
}
