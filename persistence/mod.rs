/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Named mind-map store on redb.
//!
//! Values are the JSON record from `services::persistence::types`,
//! zstd-compressed. Named maps live under a `named:` key prefix; the bare
//! `latest` key holds the autosave slot.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use redb::{ReadableDatabase, ReadableTable};

use crate::model::graph::GraphSnapshot;
pub use crate::services::persistence::PersistenceError;
use crate::services::persistence::{snapshot_from_json_bytes, snapshot_to_json_bytes};

const MAPS_TABLE: redb::TableDefinition<&str, &[u8]> = redb::TableDefinition::new("maps");
const LATEST_KEY: &str = "latest";
const NAMED_MAP_PREFIX: &str = "named:";
const ZSTD_LEVEL: i32 = 3;

/// Persistent store of named mind maps.
pub struct MapStore {
    db: redb::Database,
    path: PathBuf,
}

impl MapStore {
    fn named_map_key(name: &str) -> Result<String, PersistenceError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PersistenceError::InvalidName(
                "map name must not be empty".to_string(),
            ));
        }
        if trimmed == LATEST_KEY {
            return Err(PersistenceError::InvalidName(format!(
                "map name '{LATEST_KEY}' is reserved"
            )));
        }
        Ok(format!("{NAMED_MAP_PREFIX}{trimmed}"))
    }

    /// Open or create a store in `base_dir`.
    pub fn open(base_dir: &Path) -> Result<Self, PersistenceError> {
        std::fs::create_dir_all(base_dir)?;
        let path = base_dir.join("maps.redb");
        let db = redb::Database::create(&path).map_err(redb_error)?;
        debug!("opened map store at {}", path.display());
        Ok(Self { db, path })
    }

    /// `<data dir>/mindgraph/maps`, if the platform has a data directory.
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("mindgraph").join("maps"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save `snapshot` under `name`, replacing any previous map of that name.
    pub fn save(&mut self, name: &str, snapshot: &GraphSnapshot) -> Result<(), PersistenceError> {
        let key = Self::named_map_key(name)?;
        self.write_entry(&key, snapshot)
    }

    pub fn load(&self, name: &str) -> Result<Option<GraphSnapshot>, PersistenceError> {
        let key = Self::named_map_key(name)?;
        self.read_entry(&key)
    }

    /// Names of saved maps in sorted order. The autosave slot is not listed.
    pub fn list(&self) -> Result<Vec<String>, PersistenceError> {
        let read_txn = self.db.begin_read().map_err(redb_error)?;
        let table = match read_txn.open_table(MAPS_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(redb_error(e)),
        };
        let mut names = Vec::new();
        for entry in table.iter().map_err(redb_error)? {
            let (key, _) = entry.map_err(redb_error)?;
            if let Some(name) = key.value().strip_prefix(NAMED_MAP_PREFIX) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete the map called `name`. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> Result<bool, PersistenceError> {
        let key = Self::named_map_key(name)?;
        let write_txn = self.db.begin_write().map_err(redb_error)?;
        let removed = {
            let mut table = write_txn.open_table(MAPS_TABLE).map_err(redb_error)?;
            let removed = table.remove(key.as_str()).map_err(redb_error)?;
            removed.is_some()
        };
        write_txn.commit().map_err(redb_error)?;
        if !removed {
            warn!("delete of unknown map '{}'", name.trim());
        }
        Ok(removed)
    }

    pub fn save_latest(&mut self, snapshot: &GraphSnapshot) -> Result<(), PersistenceError> {
        self.write_entry(LATEST_KEY, snapshot)
    }

    pub fn load_latest(&self) -> Result<Option<GraphSnapshot>, PersistenceError> {
        self.read_entry(LATEST_KEY)
    }

    fn write_entry(&mut self, key: &str, snapshot: &GraphSnapshot) -> Result<(), PersistenceError> {
        let json = snapshot_to_json_bytes(snapshot)?;
        let bytes = zstd::stream::encode_all(std::io::Cursor::new(json), ZSTD_LEVEL)
            .map_err(|e| PersistenceError::Compression(format!("zstd encode failed: {e}")))?;
        let write_txn = self.db.begin_write().map_err(redb_error)?;
        {
            let mut table = write_txn.open_table(MAPS_TABLE).map_err(redb_error)?;
            table
                .insert(key, bytes.as_slice())
                .map_err(redb_error)?;
        }
        write_txn.commit().map_err(redb_error)?;
        debug!(
            "stored '{key}' ({} nodes, {} bytes)",
            snapshot.node_count(),
            bytes.len()
        );
        Ok(())
    }

    fn read_entry(&self, key: &str) -> Result<Option<GraphSnapshot>, PersistenceError> {
        let read_txn = self.db.begin_read().map_err(redb_error)?;
        let table = match read_txn.open_table(MAPS_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(redb_error(e)),
        };
        let Some(entry) = table.get(key).map_err(redb_error)? else {
            return Ok(None);
        };
        let json = zstd::stream::decode_all(std::io::Cursor::new(entry.value()))
            .map_err(|e| PersistenceError::Compression(format!("zstd decode failed: {e}")))?;
        snapshot_from_json_bytes(&json).map(Some)
    }
}

fn redb_error(error: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Redb(error.to_string())
}
