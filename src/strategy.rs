//! Move-selection strategies for the automated player.

use std::fmt;
use std::str::FromStr;

/// How the automated player picks its cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Single pass over line sums ([`crate::greedy`]). Fast, but can be forked.
    Greedy,
    /// Full game-tree search ([`crate::search`]). Never loses.
    #[default]
    Negamax,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Negamax => write!(f, "negamax"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "negamax" | "minimax" => Ok(Strategy::Negamax),
            other => Err(format!("unknown strategy: {other} (expected greedy or negamax)")),
        }
    }
}
