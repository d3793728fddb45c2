/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Bounded linear undo/redo log of full graph snapshots.
//!
//! The log is never empty: `entries[cursor]` is always the current state.
//! Entries after the cursor are the redo-able future and are discarded as
//! soon as a new checkpoint is recorded.

use log::debug;

use crate::model::graph::GraphSnapshot;

/// Default number of retained snapshots.
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<GraphSnapshot>,
    cursor: usize,
    max_entries: usize,
}

impl HistoryLog {
    /// Log holding only `initial`, bounded by [`MAX_HISTORY`].
    pub fn new(initial: GraphSnapshot) -> Self {
        Self::with_limit(initial, MAX_HISTORY)
    }

    /// Log holding only `initial`. A limit of zero is raised to one.
    pub fn with_limit(initial: GraphSnapshot, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record `snapshot` as the new current state.
    pub fn checkpoint(&mut self, snapshot: GraphSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(0..excess);
            self.cursor = self.cursor.saturating_sub(excess);
            debug!("history: evicted {excess} oldest entries");
        }
        debug!(
            "history: checkpoint {} of {}",
            self.cursor + 1,
            self.entries.len()
        );
    }

    /// Step back one entry. At the oldest entry this is a no-op.
    pub fn undo(&mut self) -> &GraphSnapshot {
        if self.can_undo() {
            self.cursor -= 1;
            debug!("history: undo to {}", self.cursor);
        }
        self.current()
    }

    /// Step forward one entry. At the newest entry this is a no-op.
    pub fn redo(&mut self) -> &GraphSnapshot {
        if self.can_redo() {
            self.cursor += 1;
            debug!("history: redo to {}", self.cursor);
        }
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &GraphSnapshot {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Drop all entries and start over from `snapshot`.
    pub fn restart_from(&mut self, snapshot: GraphSnapshot) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.cursor = 0;
    }
}
