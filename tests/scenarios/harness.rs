/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use mindgraph::app::MindMapApp;
use mindgraph::config::EditorConfig;
use mindgraph::model::graph::{EdgeAnchors, GraphSnapshot, NodeId, NodeKind, Position};

pub(crate) struct TestHarness {
    pub(crate) app: MindMapApp,
}

impl TestHarness {
    /// Empty graph, default config.
    pub(crate) fn new() -> Self {
        Self {
            app: MindMapApp::new_for_testing(),
        }
    }

    /// The seeded example map.
    pub(crate) fn seeded() -> Self {
        Self {
            app: MindMapApp::new(EditorConfig::default()),
        }
    }

    pub(crate) fn with_config(snapshot: GraphSnapshot, config: EditorConfig) -> Self {
        Self {
            app: MindMapApp::from_snapshot(snapshot, config),
        }
    }

    pub(crate) fn add_note(&mut self, x: f64) -> NodeId {
        self.app.add_node(NodeKind::Note, Position::new(x, 0.0))
    }

    pub(crate) fn connect(&mut self, source: &NodeId, target: &NodeId) {
        self.app
            .add_edge(source, target, EdgeAnchors::default())
            .unwrap();
    }

    pub(crate) fn snapshot(&self) -> &GraphSnapshot {
        self.app.snapshot()
    }
}

pub(crate) fn ids(list: &[&str]) -> Vec<NodeId> {
    list.iter().map(|id| NodeId::new(*id)).collect()
}
