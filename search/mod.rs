/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Label search with a cycling result cursor.

use crate::model::graph::{GraphSnapshot, NodeId};

/// Matches for one query, in snapshot node order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    query: String,
    matches: Vec<NodeId>,
    cursor: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `query` against `snapshot`. The cursor always restarts at 0.
    pub fn search(snapshot: &GraphSnapshot, query: &str) -> Self {
        Self {
            query: query.to_string(),
            matches: matching_node_ids(snapshot, query),
            cursor: 0,
        }
    }

    /// Move to the next match, wrapping after the last one.
    pub fn advance(&mut self) {
        self.step(1);
    }

    /// Move by `step` matches in either direction, wrapping at both ends.
    pub fn step(&mut self, step: isize) {
        if self.matches.is_empty() {
            self.cursor = 0;
            return;
        }
        let len = self.matches.len() as isize;
        self.cursor = (self.cursor as isize + step).rem_euclid(len) as usize;
    }

    /// Re-run the current query after the graph changed. The cursor is kept
    /// while it still points into the new match list.
    pub fn refresh(&mut self, snapshot: &GraphSnapshot) {
        self.matches = matching_node_ids(snapshot, &self.query);
        if self.cursor >= self.matches.len() {
            self.cursor = 0;
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether a non-blank query is active. A query with zero matches is
    /// still an active query.
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Focused match, if any.
    pub fn active_match(&self) -> Option<&NodeId> {
        self.matches.get(self.cursor)
    }
}

fn matching_node_ids(snapshot: &GraphSnapshot, query: &str) -> Vec<NodeId> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    snapshot
        .nodes()
        .iter()
        .filter(|node| node.label.to_lowercase().contains(&needle))
        .map(|node| node.id.clone())
        .collect()
}
