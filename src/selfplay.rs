//! Batch games against a random opponent.
//!
//! The human seat is filled by a seeded random mover that picks uniformly
//! among empty cells. The side moving first alternates from game to game.
//! Useful for checking a strategy's loss rate without a terminal.

use tracing::{debug, info};

use crate::cell::{Cell, all_cells};
use crate::strategy::Strategy;
use crate::tracker::{LineTracker, Side};

/// Aggregate results of a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub games: usize,
    pub computer_wins: usize,
    pub player_wins: usize,
    pub draws: usize,
}

impl MatchStats {
    /// Fraction of games the automated player lost.
    pub fn loss_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.player_wins as f64 / self.games as f64
        }
    }
}

/// Pick a uniformly random empty cell.
fn random_move(tracker: &LineTracker, rng: &mut fastrand::Rng) -> Option<Cell> {
    let empty: Vec<Cell> = all_cells()
        .filter(|cell| !tracker.moves().contains(cell))
        .collect();
    if empty.is_empty() {
        None
    } else {
        Some(empty[rng.usize(..empty.len())])
    }
}

/// Play one game and return the winner, or `None` for a draw.
pub fn play_game(strategy: Strategy, first: Side, rng: &mut fastrand::Rng) -> Option<Side> {
    let mut tracker = LineTracker::default();
    let mut side = first;

    loop {
        let played = match side {
            Side::Human => random_move(&tracker, rng).map(|cell| {
                tracker.apply_move(cell, Side::Human);
                cell
            }),
            Side::Automated => tracker.select_automated_move(strategy),
        };
        if played.is_none() || tracker.is_draw() {
            return None;
        }
        if tracker.is_over() {
            return Some(side);
        }
        side = side.opponent();
    }
}

/// Play `games` games with `strategy` against the random mover.
pub fn run_matches(games: usize, strategy: Strategy, seed: u64) -> MatchStats {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut stats = MatchStats::default();

    for game in 0..games {
        let first = if game % 2 == 0 {
            Side::Human
        } else {
            Side::Automated
        };
        let result = play_game(strategy, first, &mut rng);
        debug!(game, ?first, ?result, "game finished");

        stats.games += 1;
        match result {
            Some(Side::Automated) => stats.computer_wins += 1,
            Some(Side::Human) => stats.player_wins += 1,
            None => stats.draws += 1,
        }
    }

    info!(?stats, %strategy, seed, "self-play finished");
    stats
}
