//! Aggregated per-player statistics.

use serde::{Deserialize, Serialize};

/// One row of the roster: a player's running totals across all recorded
/// games. Derived from the ledger, never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique key across all games.
    pub name: String,

    /// Number of games participated in. A player at zero leaves the roster.
    pub games: u32,

    /// Net balance summed over all participated games.
    pub balance: f64,
}

impl Player {
    pub fn new(name: impl Into<String>, games: u32, balance: f64) -> Self {
        Self {
            name: name.into(),
            games,
            balance,
        }
    }
}
