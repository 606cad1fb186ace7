//! Persisted state.
//!
//! Two JSON documents under the data directory, rewritten in full after
//! every mutation:
//! - `games.json`: the ledger, ordered most recent first
//! - `players.json`: the roster cache (derivable from the games)

mod json;

pub use json::{Collection, JsonReader, JsonWriter};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn games_path(&self) -> PathBuf {
        self.data_dir.join(Collection::Games.filename())
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(Collection::Players.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
