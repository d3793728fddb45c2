/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph state manager for a hierarchical mind-map editor.
//!
//! Nodes and edges live in immutable [`GraphSnapshot`] values. Every edit
//! produces a new snapshot, which [`app::MindMapApp`] records in a bounded
//! undo history while keeping search results and the selection in step.

pub mod app;
pub mod cli;
pub mod config;
pub mod history;
pub mod input;
pub mod model;
pub mod persistence;
pub mod search;
pub mod selection;
pub mod services;

pub use model::graph::{GraphError, GraphSnapshot};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
