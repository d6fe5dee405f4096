//! JSONL (JSON Lines) storage.
//!
//! One raw source row per line. Files are written by `import` and read back
//! by the local row source.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};

/// Row kinds kept on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Team,
    Match,
    Player,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [EntityType::Team, EntityType::Match, EntityType::Player];

    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Team => "teams.jsonl",
            EntityType::Match => "matches.jsonl",
            EntityType::Player => "players.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for an entity type under the data directory.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} rows to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for an entity type under the data directory.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    /// Read all rows. A missing file reads as empty; unparseable lines are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        // Split on raw bytes so a line of invalid UTF-8 is skipped like any other bad row.
        for (idx, line) in reader.split(b'\n').enumerate() {
            let line = line?;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} rows from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}
