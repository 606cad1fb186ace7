//! Application state: ledger, roster cache and their persisted mirror.
//!
//! One `SessionTracker` is owned by the application root and handed by
//! reference to whichever surface needs it (CLI or HTTP). Every mutation
//! goes through here so the roster stays in lockstep with the ledger and
//! both collections are snapshotted to disk afterwards.

use tracing::{info, warn};

use crate::calculate::{self, Delta, SortKey, SortOrder};
use crate::ledger::{Ledger, LedgerError};
use crate::models::{Game, GameId, GameType, Player};
use crate::storage::{Collection, JsonReader, JsonWriter, StorageConfig};

pub struct SessionTracker {
    storage: StorageConfig,
    ledger: Ledger,
    roster: Vec<Player>,
}

impl SessionTracker {
    /// Load persisted state, falling back to empty collections.
    ///
    /// A missing or unreadable players file is not fatal: the roster is a
    /// cache, so it is rebuilt from the ledger instead.
    pub fn load(storage: StorageConfig) -> Self {
        let games: Vec<Game> = JsonReader::for_collection(&storage, Collection::Games)
            .read_all()
            .unwrap_or_else(|e| {
                warn!("Failed to read games: {}", e);
                Vec::new()
            });
        let players: Vec<Player> = JsonReader::for_collection(&storage, Collection::Players)
            .read_all()
            .unwrap_or_else(|e| {
                warn!("Failed to read players: {}", e);
                Vec::new()
            });

        let ledger = Ledger::from_games(games);
        let roster = if players.is_empty() && !ledger.is_empty() {
            info!("Players cache missing, recomputing from {} games", ledger.len());
            calculate::recompute_roster(ledger.all())
        } else {
            players
        };

        Self {
            storage,
            ledger,
            roster,
        }
    }

    /// Record a game, or replace an existing one when the id is already in
    /// the ledger.
    ///
    /// On update the roster delta is swapped in full: the old game's
    /// contribution is reverted before the new one is applied, so a player
    /// dropped from the edited version loses the game entirely.
    pub fn add_or_update_game(&mut self, game: Game) -> Result<GameId, LedgerError> {
        let id = game.id.clone();

        if self.ledger.contains(&id) {
            let (old, stored) = self.ledger.update_game(&id, game)?;
            let stored = stored.clone();
            calculate::apply_delta(&mut self.roster, &old, Delta::Revert);
            calculate::apply_delta(&mut self.roster, &stored, Delta::Apply);
            info!(game = %id, "Updated game");
        } else {
            let stored = self.ledger.add_game(game)?.clone();
            calculate::apply_delta(&mut self.roster, &stored, Delta::Apply);
            info!(game = %id, "Recorded game ({} players)", stored.players.len());
        }

        self.persist();
        Ok(id)
    }

    /// Delete a game. Unknown ids are a no-op.
    pub fn delete_game(&mut self, id: &GameId) -> bool {
        match self.ledger.delete_game(id) {
            Some(old) => {
                calculate::apply_delta(&mut self.roster, &old, Delta::Revert);
                info!(game = %id, "Deleted game");
                self.persist();
                true
            }
            None => {
                warn!(game = %id, "Delete ignored, no such game");
                false
            }
        }
    }

    /// Session history in stored order, optionally restricted to one type.
    pub fn list_games(&self, filter: Option<GameType>) -> Vec<Game> {
        self.ledger.games(filter).cloned().collect()
    }

    /// Look up a single game.
    pub fn game(&self, id: &GameId) -> Option<&Game> {
        self.ledger.game(id)
    }

    /// Sorted copy of the current roster.
    pub fn roster(&self, key: SortKey, order: SortOrder) -> Vec<Player> {
        let mut roster = self.roster.clone();
        calculate::sort_roster(&mut roster, key, order);
        roster
    }

    pub fn game_count(&self) -> usize {
        self.ledger.len()
    }

    /// Snapshot both collections. Best effort: a failed write is logged and
    /// the in-memory state stands.
    fn persist(&self) {
        if let Err(e) =
            JsonWriter::for_collection(&self.storage, Collection::Games).write_all(self.ledger.all())
        {
            warn!("Failed to persist games: {}", e);
        }
        if let Err(e) =
            JsonWriter::for_collection(&self.storage, Collection::Players).write_all(&self.roster)
        {
            warn!("Failed to persist players: {}", e);
        }
    }
}
