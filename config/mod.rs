/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor configuration loaded from TOML.
//!
//! Every key is optional. Values that parse but make no sense are ignored
//! with a warning and the default is used instead.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::history::MAX_HISTORY;

/// Deletions of more nodes than this ask the user for confirmation first.
pub const DEFAULT_DELETE_CONFIRM_THRESHOLD: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum number of retained undo snapshots.
    pub max_history: usize,
    pub delete_confirm_threshold: usize,
    /// `tracing-subscriber` env-filter directive, e.g. `mindgraph=debug`.
    pub log_filter: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            delete_confirm_threshold: DEFAULT_DELETE_CONFIRM_THRESHOLD,
            log_filter: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    max_history: Option<i64>,
    delete_confirm_threshold: Option<i64>,
    log_filter: Option<String>,
}

impl EditorConfig {
    /// Default location: `<config dir>/mindgraph/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mindgraph").join("config.toml"))
    }

    /// Load `path` if given (it must exist), otherwise the default location
    /// when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::load_from(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let parsed: RawConfig = toml::from_str(raw)?;
        let mut config = Self::default();

        if let Some(value) = parsed.max_history {
            match usize::try_from(value) {
                Ok(limit) if limit > 0 => config.max_history = limit,
                _ => warn!("Ignoring invalid max_history: {value}"),
            }
        }
        if let Some(value) = parsed.delete_confirm_threshold {
            match usize::try_from(value) {
                Ok(threshold) => config.delete_confirm_threshold = threshold,
                Err(_) => warn!("Ignoring invalid delete_confirm_threshold: {value}"),
            }
        }
        config.log_filter = parsed
            .log_filter
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty());

        Ok(config)
    }
}
