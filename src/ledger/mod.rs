//! The ordered collection of recorded games.
//!
//! The ledger is the source of truth: player statistics are derived from it
//! and must always be reconstructable by replaying it from empty. Games are
//! kept most recent first; a game that fails the zero-sum settlement check
//! never enters.

use thiserror::Error;

use crate::calculate;
use crate::models::{Game, GameId, GameType};

/// Errors raised by ledger mutations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("balances must net to zero, off by {offset:.2}")]
    ChecksumInvalid { offset: f64 },

    #[error("player {0:?} appears more than once in the game")]
    DuplicatePlayer(String),

    #[error("no game with id {0}")]
    NotFound(GameId),
}

/// Ordered set of recorded games, most recent first.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    games: Vec<Game>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously persisted games.
    pub fn from_games(games: Vec<Game>) -> Self {
        Self { games }
    }

    /// Validate a candidate game without mutating anything.
    ///
    /// Checks the settlement checksum and that no name appears twice.
    fn validate(game: &Game) -> Result<(), LedgerError> {
        let offset = calculate::settlement_offset(&game.players);
        if offset.abs() >= calculate::SETTLEMENT_EPSILON {
            return Err(LedgerError::ChecksumInvalid { offset });
        }

        for (i, player) in game.players.iter().enumerate() {
            if game.players[..i].iter().any(|p| p.name == player.name) {
                return Err(LedgerError::DuplicatePlayer(player.name.clone()));
            }
        }

        Ok(())
    }

    /// Insert a validated game at the front.
    pub fn add_game(&mut self, game: Game) -> Result<&Game, LedgerError> {
        Self::validate(&game)?;
        self.games.insert(0, game);
        Ok(&self.games[0])
    }

    /// Replace the game with the matching id in place, keeping its position,
    /// original id and date. Returns the replaced game and the stored
    /// replacement, so the caller can swap their contributions to derived
    /// statistics.
    pub fn update_game(
        &mut self,
        id: &GameId,
        candidate: Game,
    ) -> Result<(Game, &Game), LedgerError> {
        Self::validate(&candidate)?;

        let pos = self
            .games
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;

        let replacement = candidate
            .with_id(self.games[pos].id.clone())
            .with_date(self.games[pos].date);
        let old = std::mem::replace(&mut self.games[pos], replacement);
        Ok((old, &self.games[pos]))
    }

    /// Remove the game with the matching id. `None` if it was never there.
    pub fn delete_game(&mut self, id: &GameId) -> Option<Game> {
        let pos = self.games.iter().position(|g| &g.id == id)?;
        Some(self.games.remove(pos))
    }

    /// Look up a single game.
    pub fn game(&self, id: &GameId) -> Option<&Game> {
        self.games.iter().find(|g| &g.id == id)
    }

    pub fn contains(&self, id: &GameId) -> bool {
        self.game(id).is_some()
    }

    /// Iterate stored games, optionally restricted to one type. Order is
    /// preserved: most recent first.
    pub fn games(&self, filter: Option<GameType>) -> impl Iterator<Item = &Game> {
        self.games
            .iter()
            .filter(move |g| filter.map_or(true, |t| g.game_type == t))
    }

    /// All games in stored order.
    pub fn all(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
