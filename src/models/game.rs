//! Recorded game model.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::GameId;
use crate::calculate;

/// Kind of session a game was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    CashGame,
    Tournament,
}

impl GameType {
    /// Human-readable label, as shown in session history.
    pub fn label(&self) -> &'static str {
        match self {
            GameType::CashGame => "Cash Game",
            GameType::Tournament => "Tournament",
        }
    }

    /// Parse a user-supplied type string ("cash", "tournament", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" | "cashgame" | "cash-game" | "cash game" => Some(GameType::CashGame),
            "tournament" | "tourney" => Some(GameType::Tournament),
            _ => None,
        }
    }
}

/// One player's settled result within a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: String,
    /// Signed amount in currency units. Positive means the player won money.
    pub balance: f64,
}

impl PlayerResult {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

/// A completed session, immutable once it enters the ledger.
///
/// `total_value` is derived at construction: half the sum of absolute
/// balances, i.e. the total money that changed hands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier, assigned at creation and preserved across edits.
    pub id: GameId,

    /// Cash game or tournament.
    pub game_type: GameType,

    /// Date the session was recorded. Preserved across edits.
    pub date: NaiveDate,

    /// Per-player settled results, in entry order.
    pub players: Vec<PlayerResult>,

    /// Money that changed hands.
    pub total_value: f64,
}

impl Game {
    /// Create a new game dated today with a fresh id.
    ///
    /// Rows with blank names are dropped; they are empty form entries, not
    /// participants.
    pub fn new(game_type: GameType, players: Vec<PlayerResult>) -> Self {
        let players: Vec<PlayerResult> = players
            .into_iter()
            .filter(|p| !p.name.trim().is_empty())
            .collect();
        let total_value = calculate::total_value(&players);

        Self {
            id: GameId::generate(),
            game_type,
            date: Utc::now().date_naive(),
            players,
            total_value,
        }
    }

    /// Builder method to set an explicit id (edits keep the original id).
    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = id;
        self
    }

    /// Builder method to set an explicit date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Signed sum of all player balances. Zero for a correct settlement.
    pub fn settlement_offset(&self) -> f64 {
        calculate::settlement_offset(&self.players)
    }
}
