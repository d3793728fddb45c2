/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor session state and the intent reducer.
//!
//! `MindMapApp` owns the working snapshot, its undo history, the search
//! state and the node selection. The presentation layer feeds it
//! [`MindMapIntent`] values in arrival order and renders whatever snapshot
//! it publishes afterwards.

use log::debug;

use crate::config::EditorConfig;
use crate::history::HistoryLog;
use crate::model::graph::{
    EdgeAnchors, EdgeId, GraphError, GraphSnapshot, NodeId, NodeKind, NodePatch, Position,
    PositionChange, seeded_snapshot,
};
use crate::search::SearchState;
use crate::selection::SelectionState;

/// Stage of a node drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Intermediate frame; updates the working snapshot only.
    Moving,
    /// Pointer released; commits the positions as one undo step.
    Released,
}

/// One-shot request for the presentation layer, taken with
/// [`MindMapApp::take_pending_view_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    FitView,
    FocusSearchField,
    /// Center the viewport on this node (the active search match).
    FocusNode(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MindMapIntent {
    AddNode {
        kind: NodeKind,
        position: Position,
    },
    AddEdge {
        source: NodeId,
        target: NodeId,
        anchors: EdgeAnchors,
    },
    /// Connect the first selected node to the second one.
    ConnectSelectedPair,
    UpdateNodeField {
        id: NodeId,
        patch: NodePatch,
    },
    DeleteNodes {
        ids: Vec<NodeId>,
    },
    DeleteSelection,
    DragNodes {
        changes: Vec<PositionChange>,
        phase: DragPhase,
    },
    Undo,
    Redo,
    Checkpoint,
    Search {
        query: String,
    },
    AdvanceSearch,
    RetreatSearch,
    SetSelection {
        ids: Vec<NodeId>,
    },
    ClearSelection,
    Clear,
    Reset,
    RequestFitView,
    RequestSearchFocus,
}

pub struct MindMapApp {
    /// Working snapshot. Equal to `history.current()` except during a drag.
    snapshot: GraphSnapshot,
    /// Snapshot restored by [`MindMapApp::reset`].
    initial: GraphSnapshot,
    history: HistoryLog,
    search: SearchState,
    selection: SelectionState,
    config: EditorConfig,
    pending_view_request: Option<ViewRequest>,
}

impl MindMapApp {
    /// Session starting from the seeded example map.
    pub fn new(config: EditorConfig) -> Self {
        Self::from_snapshot(seeded_snapshot(), config)
    }

    /// Session whose initial (and reset) state is `snapshot`.
    pub fn from_snapshot(snapshot: GraphSnapshot, config: EditorConfig) -> Self {
        Self {
            history: HistoryLog::with_limit(snapshot.clone(), config.max_history),
            initial: snapshot.clone(),
            snapshot,
            search: SearchState::new(),
            selection: SelectionState::new(),
            config,
            pending_view_request: None,
        }
    }

    /// Session on an empty graph with default config.
    pub fn new_for_testing() -> Self {
        Self::from_snapshot(GraphSnapshot::new(), EditorConfig::default())
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a batch of intents in order. The first failing intent stops the
    /// batch; intents before it stay applied.
    pub fn apply_intents<I>(&mut self, intents: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = MindMapIntent>,
    {
        for intent in intents {
            self.apply_intent(intent)?;
        }
        Ok(())
    }

    pub fn apply_intent(&mut self, intent: MindMapIntent) -> Result<(), GraphError> {
        match intent {
            MindMapIntent::AddNode { kind, position } => {
                self.add_node(kind, position);
            },
            MindMapIntent::AddEdge {
                source,
                target,
                anchors,
            } => {
                self.add_edge(&source, &target, anchors)?;
            },
            MindMapIntent::ConnectSelectedPair => {
                self.connect_selected_pair()?;
            },
            MindMapIntent::UpdateNodeField { id, patch } => self.update_node_field(&id, patch)?,
            MindMapIntent::DeleteNodes { ids } => {
                self.delete_nodes(&ids)?;
            },
            MindMapIntent::DeleteSelection => {
                self.delete_selection()?;
            },
            MindMapIntent::DragNodes { changes, phase } => self.drag_nodes(&changes, phase)?,
            MindMapIntent::Undo => {
                self.undo();
            },
            MindMapIntent::Redo => {
                self.redo();
            },
            MindMapIntent::Checkpoint => self.checkpoint(),
            MindMapIntent::Search { query } => self.search(&query),
            MindMapIntent::AdvanceSearch => self.advance_search(),
            MindMapIntent::RetreatSearch => self.step_search(-1),
            MindMapIntent::SetSelection { ids } => self.set_selection(ids),
            MindMapIntent::ClearSelection => self.selection.clear(),
            MindMapIntent::Clear => self.clear(),
            MindMapIntent::Reset => self.reset(),
            MindMapIntent::RequestFitView => {
                self.pending_view_request = Some(ViewRequest::FitView);
            },
            MindMapIntent::RequestSearchFocus => {
                self.pending_view_request = Some(ViewRequest::FocusSearchField);
            },
        }
        Ok(())
    }

    /// Add a node and select it.
    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let (next, id) = self.snapshot.add_node(kind, position);
        self.commit(next);
        self.selection.set_selection([id.clone()]);
        id
    }

    pub fn add_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        anchors: EdgeAnchors,
    ) -> Result<EdgeId, GraphError> {
        let (next, id) = self.snapshot.add_edge(source, target, anchors)?;
        self.commit(next);
        Ok(id)
    }

    /// Connect the two selected nodes in selection order. Anything other
    /// than exactly two selected nodes is a no-op.
    pub fn connect_selected_pair(&mut self) -> Result<Option<EdgeId>, GraphError> {
        let Some((source, target)) = self.selection.ordered_pair() else {
            return Ok(None);
        };
        let (source, target) = (source.clone(), target.clone());
        self.add_edge(&source, &target, EdgeAnchors::default())
            .map(Some)
    }

    /// Commit a field edit as one undo step. An empty patch changes nothing.
    pub fn update_node_field(&mut self, id: &NodeId, patch: NodePatch) -> Result<(), GraphError> {
        match self.snapshot.update_node_field(id, patch) {
            Ok(next) => {
                self.commit(next);
                Ok(())
            },
            Err(GraphError::EmptyOperation) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Delete `ids` and their descendants. Returns the number of removed
    /// nodes; an empty `ids` removes nothing.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> Result<usize, GraphError> {
        let before = self.snapshot.node_count();
        match self.snapshot.delete_nodes(ids) {
            Ok(next) => {
                let removed = before - next.node_count();
                self.commit(next);
                debug!("deleted {removed} nodes");
                Ok(removed)
            },
            Err(GraphError::EmptyOperation) => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Delete the current selection and its descendants.
    pub fn delete_selection(&mut self) -> Result<usize, GraphError> {
        let ids = self.selection.ids().to_vec();
        self.delete_nodes(&ids)
    }

    /// Whether deleting `ids` would remove more nodes than the configured
    /// confirmation threshold.
    pub fn deletion_requires_confirmation(&self, ids: &[NodeId]) -> bool {
        self.snapshot.descendant_closure(ids).len() > self.config.delete_confirm_threshold
    }

    /// Batch position update without an undo step.
    pub fn apply_node_positions(&mut self, changes: &[PositionChange]) -> Result<(), GraphError> {
        match self.snapshot.apply_node_positions(changes) {
            Ok(next) => {
                self.publish(next);
                Ok(())
            },
            Err(GraphError::EmptyOperation) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Move nodes during a drag. Only the release frame is recorded in
    /// history.
    pub fn drag_nodes(
        &mut self,
        changes: &[PositionChange],
        phase: DragPhase,
    ) -> Result<(), GraphError> {
        if !changes.is_empty() {
            self.apply_node_positions(changes)?;
        }
        if phase == DragPhase::Released && self.has_uncommitted_changes() {
            self.checkpoint();
        }
        Ok(())
    }

    /// Record the working snapshot as an undo step.
    pub fn checkpoint(&mut self) {
        self.history.checkpoint(self.snapshot.clone());
    }

    /// Step back one undo entry, dropping positions from an unreleased drag
    /// first. Returns whether the snapshot moved.
    pub fn undo(&mut self) -> bool {
        let dropped_drag = self.has_uncommitted_changes();
        if dropped_drag {
            let committed = self.history.current().clone();
            self.publish(committed);
            debug!("undo dropped uncommitted drag positions");
        }
        if !self.history.can_undo() {
            return dropped_drag;
        }
        let previous = self.history.undo().clone();
        self.publish(previous);
        true
    }

    /// Step forward one undo entry. Returns whether the snapshot moved.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let next = self.history.redo().clone();
        self.publish(next);
        true
    }

    /// Start a new search. The cursor restarts at the first match.
    pub fn search(&mut self, query: &str) {
        self.search = SearchState::search(&self.snapshot, query);
        self.request_focus_on_active_match();
    }

    pub fn advance_search(&mut self) {
        self.step_search(1);
    }

    pub fn step_search(&mut self, step: isize) {
        self.search.step(step);
        self.request_focus_on_active_match();
    }

    pub fn set_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let snapshot = &self.snapshot;
        self.selection
            .set_selection(ids.into_iter().filter(|id| snapshot.contains_node(id)));
    }

    /// Remove every node and edge as one undo step. The selection is emptied.
    pub fn clear(&mut self) {
        self.commit(GraphSnapshot::new());
        self.selection.clear();
    }

    /// Return to the session's initial snapshot as one undo step. The
    /// selection is emptied.
    pub fn reset(&mut self) {
        self.commit(self.initial.clone());
        self.selection.clear();
    }

    pub fn take_pending_view_request(&mut self) -> Option<ViewRequest> {
        self.pending_view_request.take()
    }

    fn has_uncommitted_changes(&self) -> bool {
        &self.snapshot != self.history.current()
    }

    fn request_focus_on_active_match(&mut self) {
        if let Some(id) = self.search.active_match() {
            self.pending_view_request = Some(ViewRequest::FocusNode(id.clone()));
        }
    }

    /// Publish `next` and record it as one undo step.
    fn commit(&mut self, next: GraphSnapshot) {
        self.publish(next);
        self.checkpoint();
    }

    /// Make `next` the working snapshot and re-derive selection and search.
    fn publish(&mut self, next: GraphSnapshot) {
        self.snapshot = next;
        self.selection.reconcile(&self.snapshot);
        self.search.refresh(&self.snapshot);
    }
}
