//! Whole-document JSON storage.
//!
//! Each collection is one JSON array on disk, replaced wholesale after
//! every mutation. The store holds the full state each time, not an append
//! log, so there is no partial-write recovery to do: a bad file is treated
//! as empty at load time.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// The two persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Games,
    Players,
}

impl Collection {
    /// Get the filename for this collection.
    pub fn filename(&self) -> &'static str {
        match self {
            Collection::Games => "games.json",
            Collection::Players => "players.json",
        }
    }
}

/// JSON snapshot writer.
pub struct JsonWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonWriter<T> {
    /// Create a writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for one of the named collections.
    pub fn for_collection(config: &StorageConfig, collection: Collection) -> Self {
        Self::new(config.data_dir.join(collection.filename()))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Replace the file with a snapshot of `items`.
    pub fn write_all(&self, items: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, items)?;

        debug!("Wrote {} items to {:?}", items.len(), self.path);
        Ok(items.len())
    }
}

/// JSON snapshot reader.
pub struct JsonReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonReader<T> {
    /// Create a reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for one of the named collections.
    pub fn for_collection(config: &StorageConfig, collection: Collection) -> Self {
        Self::new(config.data_dir.join(collection.filename()))
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored items.
    ///
    /// A missing file is an empty collection. A file that fails to parse is
    /// also treated as empty, with a warning: losing a cache beats refusing
    /// to start.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        match serde_json::from_reader::<_, Vec<T>>(reader) {
            Ok(items) => {
                debug!("Read {} items from {:?}", items.len(), self.path);
                Ok(items)
            }
            Err(e) => {
                warn!("Failed to parse {:?}, treating as empty: {}", self.path, e);
                Ok(Vec::new())
            }
        }
    }
}
