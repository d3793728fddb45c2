/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashSet;
use std::ops::Deref;

use crate::model::graph::{GraphSnapshot, NodeId};

/// Canonical node-selection state.
///
/// Wraps the selected-id set with selection order, the primary (most
/// recently selected) node, and a revision counter so consumers can detect
/// changes without diffing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    nodes: HashSet<NodeId>,
    order: Vec<NodeId>,
    primary: Option<NodeId>,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic revision incremented whenever the selection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Primary selected node (most recently selected).
    pub fn primary(&self) -> Option<&NodeId> {
        self.primary.as_ref()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Replace the whole selection. Duplicates keep their first position.
    pub fn set_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut nodes = HashSet::new();
        let mut order = Vec::new();
        for id in ids {
            if nodes.insert(id.clone()) {
                order.push(id);
            }
        }
        if order == self.order {
            return;
        }
        self.nodes = nodes;
        self.primary = order.last().cloned();
        self.order = order;
        self.revision = self.revision.saturating_add(1);
    }

    pub fn clear(&mut self) {
        if self.nodes.is_empty() && self.primary.is_none() {
            return;
        }
        self.nodes.clear();
        self.order.clear();
        self.primary = None;
        self.revision = self.revision.saturating_add(1);
    }

    /// Drop every id that no longer exists in `snapshot`. Returns whether
    /// anything was dropped.
    pub fn reconcile(&mut self, snapshot: &GraphSnapshot) -> bool {
        let before = self.order.len();
        self.order.retain(|id| snapshot.contains_node(id));
        if self.order.len() == before {
            return false;
        }
        self.nodes.retain(|id| snapshot.contains_node(id));
        self.primary = self.order.last().cloned();
        self.revision = self.revision.saturating_add(1);
        true
    }

    /// Ordered pair of selected nodes when exactly two nodes are selected.
    pub fn ordered_pair(&self) -> Option<(&NodeId, &NodeId)> {
        match self.order.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }
}

impl Deref for SelectionState {
    type Target = HashSet<NodeId>;

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}
