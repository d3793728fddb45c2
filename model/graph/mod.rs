/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the mind-map editor.
//!
//! Core structures:
//! - `GraphSnapshot`: immutable, ordered node/edge container
//! - `Node`: typed map entry with position and label
//! - `Edge`: directed parent→child link between two nodes
//!
//! Boundary: every mutation is a pure function from one snapshot to a new
//! one. A published snapshot is never modified; node and edge sequences are
//! reference counted so an untouched sequence is shared with the parent
//! snapshot instead of copied.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use euclid::default::Point2D;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;
use thiserror::Error;
use uuid::Uuid;

mod seed;

pub use seed::seeded_snapshot;

/// Position in canvas space.
pub type Position = Point2D<f64>;

/// Stable node identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh unique id for a newly created node.
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Stable edge identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn fresh() -> Self {
        Self(format!("e-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Node type. Only affects rendering and the label given on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Topic,
    Subtopic,
    Note,
}

impl NodeKind {
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Topic => "New Topic",
            Self::Subtopic => "New Subtopic",
            Self::Note => "New Note",
        }
    }
}

/// Connection handle on a node's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

/// A mind-map entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable node identity.
    pub id: NodeId,

    pub kind: NodeKind,

    /// Position in canvas space
    pub position: Position,

    /// Display text
    pub label: String,
}

/// Directed link; `source` is the parent, `target` the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_anchor: Option<Anchor>,
    pub target_anchor: Option<Anchor>,
}

impl Edge {
    fn touches(&self, ids: &HashSet<&str>) -> bool {
        ids.contains(self.source.as_str()) || ids.contains(self.target.as_str())
    }
}

/// Optional handles for a new edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeAnchors {
    pub source: Option<Anchor>,
    pub target: Option<Anchor>,
}

impl EdgeAnchors {
    pub fn new(source: Anchor, target: Anchor) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
        }
    }
}

/// Partial update of a node's mutable fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodePatch {
    pub position: Option<Position>,
    pub label: Option<String>,
}

impl NodePatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            position: None,
            label: Some(label.into()),
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            label: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.label.is_none()
    }
}

/// One entry of a batch position update.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionChange {
    pub id: NodeId,
    pub position: Position,
}

impl PositionChange {
    pub fn new(id: impl Into<NodeId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Depth-annotated entry of [`GraphSnapshot::outline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub id: NodeId,
}

/// Failures of graph store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge endpoint `{id}` does not exist")]
    InvalidReference { id: NodeId },

    #[error("node `{id}` does not exist")]
    NotFound { id: NodeId },

    #[error("operation has nothing to apply")]
    EmptyOperation,

    #[error("node `{id}` cannot be connected to itself")]
    SelfConnection { id: NodeId },

    #[error("duplicate node id `{id}`")]
    DuplicateId { id: NodeId },
}

/// Immutable graph value. Insertion order of `nodes` is the render order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphSnapshot {
    nodes: Arc<Vec<Node>>,
    edges: Arc<Vec<Edge>>,
}

impl GraphSnapshot {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw parts, rejecting duplicate node ids and
    /// edges with a missing endpoint.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateId {
                    id: node.id.clone(),
                });
            }
        }
        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(GraphError::InvalidReference {
                        id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(Self::from_parts_unchecked(nodes, edges))
    }

    pub(crate) fn from_parts_unchecked(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: Arc::new(nodes),
            edges: Arc::new(edges),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Targets of edges leaving `id`, in edge order.
    pub fn children<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges
            .iter()
            .filter(move |edge| &edge.source == id)
            .map(|edge| &edge.target)
    }

    /// True when both snapshots hold the same node allocation.
    pub fn shares_nodes_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// True when both snapshots hold the same edge allocation.
    pub fn shares_edges_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.edges, &other.edges)
    }

    /// Append a node of `kind` with a fresh id and the kind's default label.
    pub fn add_node(&self, kind: NodeKind, position: Position) -> (Self, NodeId) {
        let id = NodeId::fresh();
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend(self.nodes.iter().cloned());
        nodes.push(Node {
            id: id.clone(),
            kind,
            position,
            label: kind.default_label().to_string(),
        });
        let snapshot = Self {
            nodes: Arc::new(nodes),
            edges: Arc::clone(&self.edges),
        };
        (snapshot, id)
    }

    /// Connect `source` to `target`. Duplicate and cyclic edges are allowed.
    pub fn add_edge(
        &self,
        source: &NodeId,
        target: &NodeId,
        anchors: EdgeAnchors,
    ) -> Result<(Self, EdgeId), GraphError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::InvalidReference {
                    id: endpoint.clone(),
                });
            }
        }
        if source == target {
            return Err(GraphError::SelfConnection { id: source.clone() });
        }

        let id = EdgeId::fresh();
        let mut edges = Vec::with_capacity(self.edges.len() + 1);
        edges.extend(self.edges.iter().cloned());
        edges.push(Edge {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
            source_anchor: anchors.source,
            target_anchor: anchors.target,
        });
        let snapshot = Self {
            nodes: Arc::clone(&self.nodes),
            edges: Arc::new(edges),
        };
        Ok((snapshot, id))
    }

    /// Merge `patch` into the node named `id`.
    pub fn update_node_field(&self, id: &NodeId, patch: NodePatch) -> Result<Self, GraphError> {
        let Some(index) = self.nodes.iter().position(|node| &node.id == id) else {
            return Err(GraphError::NotFound { id: id.clone() });
        };
        if patch.is_empty() {
            return Err(GraphError::EmptyOperation);
        }

        let mut nodes = self.nodes.as_ref().clone();
        let node = &mut nodes[index];
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(label) = patch.label {
            node.label = label;
        }
        Ok(Self {
            nodes: Arc::new(nodes),
            edges: Arc::clone(&self.edges),
        })
    }

    /// Batch position update, validated as a whole before anything applies.
    pub fn apply_node_positions(&self, changes: &[PositionChange]) -> Result<Self, GraphError> {
        if changes.is_empty() {
            return Err(GraphError::EmptyOperation);
        }
        if let Some(missing) = changes.iter().find(|change| !self.contains_node(&change.id)) {
            return Err(GraphError::NotFound {
                id: missing.id.clone(),
            });
        }

        let mut nodes = self.nodes.as_ref().clone();
        for change in changes {
            if let Some(node) = nodes.iter_mut().find(|node| node.id == change.id) {
                node.position = change.position;
            }
        }
        Ok(Self {
            nodes: Arc::new(nodes),
            edges: Arc::clone(&self.edges),
        })
    }

    /// Every node reachable from `seeds` by following edges from source to
    /// target, seeds included, in snapshot order. Seeds missing from the
    /// snapshot are ignored.
    pub fn descendant_closure(&self, seeds: &[NodeId]) -> Vec<NodeId> {
        let graph: DiGraphMap<&str, ()> = DiGraphMap::from_edges(
            self.edges
                .iter()
                .map(|edge| (edge.source.as_str(), edge.target.as_str())),
        );

        let mut closure: HashSet<&str> = HashSet::new();
        for seed in seeds {
            if closure.contains(seed.as_str()) || !self.contains_node(seed) {
                continue;
            }
            closure.insert(seed.as_str());
            if !graph.contains_node(seed.as_str()) {
                continue;
            }
            // Bfs keeps its own discovered set, so cycles terminate.
            let mut bfs = Bfs::new(&graph, seed.as_str());
            while let Some(reached) = bfs.next(&graph) {
                closure.insert(reached);
            }
        }

        self.nodes
            .iter()
            .filter(|node| closure.contains(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect()
    }

    /// Remove `ids`, all their descendants, and every edge touching a
    /// removed node.
    pub fn delete_nodes(&self, ids: &[NodeId]) -> Result<Self, GraphError> {
        let Some(first) = ids.first() else {
            return Err(GraphError::EmptyOperation);
        };
        let closure = self.descendant_closure(ids);
        if closure.is_empty() {
            return Err(GraphError::NotFound { id: first.clone() });
        }

        let removed: HashSet<&str> = closure.iter().map(NodeId::as_str).collect();
        let nodes = self
            .nodes
            .iter()
            .filter(|node| !removed.contains(node.id.as_str()))
            .cloned()
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|edge| !edge.touches(&removed))
            .cloned()
            .collect();
        Ok(Self::from_parts_unchecked(nodes, edges))
    }

    /// Depth-first walk from every root (node without a parent), then from
    /// any node only reachable through a cycle. Each node appears once.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let has_parent: HashSet<&str> = self.edges.iter().map(|e| e.target.as_str()).collect();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut out = Vec::with_capacity(self.nodes.len());

        let roots = self
            .nodes
            .iter()
            .filter(|node| !has_parent.contains(node.id.as_str()))
            .chain(self.nodes.iter());
        for root in roots {
            if visited.contains(root.id.as_str()) {
                continue;
            }
            let mut stack = vec![(0usize, &root.id)];
            while let Some((depth, id)) = stack.pop() {
                if !visited.insert(id.as_str()) {
                    continue;
                }
                out.push(OutlineEntry {
                    depth,
                    id: id.clone(),
                });
                let children: Vec<&NodeId> = self.children(id).collect();
                for child in children.into_iter().rev() {
                    if !visited.contains(child.as_str()) {
                        stack.push((depth + 1, child));
                    }
                }
            }
        }
        out
    }
}
