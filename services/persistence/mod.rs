/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! JSON encoding of graph snapshots and file import/export.

pub mod types;

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::model::graph::{GraphError, GraphSnapshot};
use types::PersistedGraph;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("redb error: {0}")]
    Redb(String),

    #[error("compression error: {0}")]
    Compression(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] GraphError),

    #[error("invalid map name: {0}")]
    InvalidName(String),
}

pub fn snapshot_to_json(snapshot: &GraphSnapshot) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&PersistedGraph::from(snapshot))?)
}

pub fn snapshot_from_json(raw: &str) -> Result<GraphSnapshot, PersistenceError> {
    let persisted: PersistedGraph = serde_json::from_str(raw)?;
    Ok(GraphSnapshot::try_from(persisted)?)
}

pub(crate) fn snapshot_to_json_bytes(snapshot: &GraphSnapshot) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(&PersistedGraph::from(snapshot))?)
}

pub(crate) fn snapshot_from_json_bytes(bytes: &[u8]) -> Result<GraphSnapshot, PersistenceError> {
    let persisted: PersistedGraph = serde_json::from_slice(bytes)?;
    Ok(GraphSnapshot::try_from(persisted)?)
}

/// Write `snapshot` to `path` as pretty-printed JSON.
pub fn export_json(path: &Path, snapshot: &GraphSnapshot) -> Result<(), PersistenceError> {
    fs::write(path, snapshot_to_json(snapshot)?)?;
    debug!(
        "exported {} nodes, {} edges to {}",
        snapshot.node_count(),
        snapshot.edge_count(),
        path.display()
    );
    Ok(())
}

/// Read and validate a snapshot previously written by [`export_json`].
pub fn import_json(path: &Path) -> Result<GraphSnapshot, PersistenceError> {
    let raw = fs::read_to_string(path)?;
    let snapshot = snapshot_from_json(&raw)?;
    debug!(
        "imported {} nodes, {} edges from {}",
        snapshot.node_count(),
        snapshot.edge_count(),
        path.display()
    );
    Ok(snapshot)
}
