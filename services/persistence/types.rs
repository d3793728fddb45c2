/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable record of a graph snapshot.
//!
//! The JSON shape is `{"nodes": [...], "edges": [...]}` with camelCase
//! field names, which is what the canvas front end reads and writes.

use serde::{Deserialize, Serialize};

use crate::model::graph::{
    Anchor, Edge, EdgeId, GraphError, GraphSnapshot, Node, NodeId, NodeKind, Position,
};

/// Node type for persistence.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersistedNodeKind {
    Topic,
    Subtopic,
    Note,
}

/// Edge handle for persistence.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersistedAnchor {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PersistedPosition {
    pub x: f64,
    pub y: f64,
}

/// Persisted node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedNode {
    pub id: String,
    pub kind: PersistedNodeKind,
    pub position: PersistedPosition,
    pub label: String,
}

/// Persisted edge.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_anchor: Option<PersistedAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_anchor: Option<PersistedAnchor>,
}

/// Full graph record for save/load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PersistedGraph {
    pub nodes: Vec<PersistedNode>,
    pub edges: Vec<PersistedEdge>,
}

impl From<NodeKind> for PersistedNodeKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Topic => Self::Topic,
            NodeKind::Subtopic => Self::Subtopic,
            NodeKind::Note => Self::Note,
        }
    }
}

impl From<PersistedNodeKind> for NodeKind {
    fn from(kind: PersistedNodeKind) -> Self {
        match kind {
            PersistedNodeKind::Topic => Self::Topic,
            PersistedNodeKind::Subtopic => Self::Subtopic,
            PersistedNodeKind::Note => Self::Note,
        }
    }
}

impl From<Anchor> for PersistedAnchor {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Top => Self::Top,
            Anchor::Bottom => Self::Bottom,
            Anchor::Left => Self::Left,
            Anchor::Right => Self::Right,
        }
    }
}

impl From<PersistedAnchor> for Anchor {
    fn from(anchor: PersistedAnchor) -> Self {
        match anchor {
            PersistedAnchor::Top => Self::Top,
            PersistedAnchor::Bottom => Self::Bottom,
            PersistedAnchor::Left => Self::Left,
            PersistedAnchor::Right => Self::Right,
        }
    }
}

impl From<&GraphSnapshot> for PersistedGraph {
    fn from(snapshot: &GraphSnapshot) -> Self {
        let nodes = snapshot
            .nodes()
            .iter()
            .map(|node| PersistedNode {
                id: node.id.as_str().to_string(),
                kind: node.kind.into(),
                position: PersistedPosition {
                    x: node.position.x,
                    y: node.position.y,
                },
                label: node.label.clone(),
            })
            .collect();
        let edges = snapshot
            .edges()
            .iter()
            .map(|edge| PersistedEdge {
                id: edge.id.as_str().to_string(),
                source: edge.source.as_str().to_string(),
                target: edge.target.as_str().to_string(),
                source_anchor: edge.source_anchor.map(Into::into),
                target_anchor: edge.target_anchor.map(Into::into),
            })
            .collect();
        Self { nodes, edges }
    }
}

impl TryFrom<PersistedGraph> for GraphSnapshot {
    type Error = GraphError;

    /// Rejects duplicate node ids and edges whose endpoints are missing.
    fn try_from(persisted: PersistedGraph) -> Result<Self, Self::Error> {
        let nodes = persisted
            .nodes
            .into_iter()
            .map(|node| Node {
                id: NodeId::new(node.id),
                kind: node.kind.into(),
                position: Position::new(node.position.x, node.position.y),
                label: node.label,
            })
            .collect();
        let edges = persisted
            .edges
            .into_iter()
            .map(|edge| Edge {
                id: EdgeId::new(edge.id),
                source: NodeId::new(edge.source),
                target: NodeId::new(edge.target),
                source_anchor: edge.source_anchor.map(Into::into),
                target_anchor: edge.target_anchor.map(Into::into),
            })
            .collect();
        GraphSnapshot::from_parts(nodes, edges)
    }
}
