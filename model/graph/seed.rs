/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The example map every fresh session starts from.

use super::{Anchor, Edge, EdgeId, GraphSnapshot, Node, NodeId, NodeKind, Position};

const SEED_NODES: &[(&str, NodeKind, &str, f64, f64)] = &[
    ("root", NodeKind::Topic, "Windsurf Documentation", 100.0, 400.0),
    ("get-started", NodeKind::Subtopic, "Get Started", 400.0, 100.0),
    ("cascade", NodeKind::Subtopic, "Cascade", 400.0, 220.0),
    ("editor", NodeKind::Subtopic, "Windsurf Editor", 400.0, 340.0),
    ("context", NodeKind::Subtopic, "Context Awareness", 400.0, 460.0),
    ("troubleshooting", NodeKind::Subtopic, "Troubleshooting", 400.0, 580.0),
    ("installation", NodeKind::Note, "Installation & Setup", 700.0, 50.0),
    ("onboarding", NodeKind::Note, "Onboarding Flow", 700.0, 120.0),
    ("first-steps", NodeKind::Note, "Things to Try", 700.0, 190.0),
    ("cascade-overview", NodeKind::Note, "Overview", 700.0, 260.0),
    ("cascade-usage", NodeKind::Note, "Usage & Credits", 700.0, 320.0),
    ("memories", NodeKind::Note, "Memories & Rules", 700.0, 380.0),
    ("models", NodeKind::Note, "AI Models", 700.0, 440.0),
    ("terminal", NodeKind::Note, "Terminal", 700.0, 500.0),
    ("previews", NodeKind::Note, "Previews (Beta)", 700.0, 560.0),
    ("context-overview", NodeKind::Note, "Overview", 700.0, 620.0),
    ("local-indexing", NodeKind::Note, "Local Indexing", 700.0, 680.0),
    ("common-issues", NodeKind::Note, "Common Issues", 700.0, 740.0),
    ("logs", NodeKind::Note, "Gathering Logs", 700.0, 800.0),
];

const SEED_EDGES: &[(&str, &str, &str)] = &[
    ("e-root-get-started", "root", "get-started"),
    ("e-root-cascade", "root", "cascade"),
    ("e-root-editor", "root", "editor"),
    ("e-root-context", "root", "context"),
    ("e-root-troubleshooting", "root", "troubleshooting"),
    ("e-get-started-installation", "get-started", "installation"),
    ("e-get-started-onboarding", "get-started", "onboarding"),
    ("e-get-started-first-steps", "get-started", "first-steps"),
    ("e-cascade-overview", "cascade", "cascade-overview"),
    ("e-cascade-usage", "cascade", "cascade-usage"),
    ("e-cascade-memories", "cascade", "memories"),
    ("e-editor-models", "editor", "models"),
    ("e-editor-terminal", "editor", "terminal"),
    ("e-editor-previews", "editor", "previews"),
    ("e-context-overview", "context", "context-overview"),
    ("e-context-indexing", "context", "local-indexing"),
    ("e-troubleshooting-issues", "troubleshooting", "common-issues"),
    ("e-troubleshooting-logs", "troubleshooting", "logs"),
];

/// Root topic with five sections and their notes, all linked right→left.
pub fn seeded_snapshot() -> GraphSnapshot {
    let nodes = SEED_NODES
        .iter()
        .map(|&(id, kind, label, x, y)| Node {
            id: NodeId::new(id),
            kind,
            position: Position::new(x, y),
            label: label.to_string(),
        })
        .collect();
    let edges = SEED_EDGES
        .iter()
        .map(|&(id, source, target)| Edge {
            id: EdgeId::new(id),
            source: NodeId::new(source),
            target: NodeId::new(target),
            source_anchor: Some(Anchor::Right),
            target_anchor: Some(Anchor::Left),
        })
        .collect();
    GraphSnapshot::from_parts_unchecked(nodes, edges)
}
