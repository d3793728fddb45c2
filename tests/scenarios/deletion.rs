/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use mindgraph::app::MindMapIntent;
use mindgraph::model::graph::{GraphError, NodeId};

use super::harness::{TestHarness, ids};

fn assert_no_dangling_edges(harness: &TestHarness) {
    let snapshot = harness.snapshot();
    for edge in snapshot.edges() {
        assert!(snapshot.contains_node(&edge.source), "dangling {}", edge.id);
        assert!(snapshot.contains_node(&edge.target), "dangling {}", edge.id);
    }
}

#[test]
fn test_deleting_root_removes_whole_map() {
    let mut harness = TestHarness::seeded();
    let removed = harness.app.delete_nodes(&ids(&["root"])).unwrap();

    assert_eq!(removed, 19);
    assert!(harness.snapshot().is_empty());
    assert_eq!(harness.snapshot().edge_count(), 0);
}

#[test]
fn test_deleting_section_keeps_siblings_and_edges_consistent() {
    let mut harness = TestHarness::seeded();
    harness.app.delete_nodes(&ids(&["troubleshooting"])).unwrap();

    assert_eq!(harness.snapshot().node_count(), 16);
    assert_eq!(harness.snapshot().edge_count(), 15);
    assert!(harness.snapshot().contains_node(&NodeId::new("context")));
    assert_no_dangling_edges(&harness);
}

#[test]
fn test_cycle_deletion_terminates() {
    let mut harness = TestHarness::new();
    let a = harness.add_note(0.0);
    let b = harness.add_note(1.0);
    let c = harness.add_note(2.0);
    let d = harness.add_note(3.0);
    harness.connect(&a, &b);
    harness.connect(&b, &c);
    harness.connect(&c, &a);
    harness.connect(&d, &b);

    harness.app.delete_nodes(&[a]).unwrap();

    assert_eq!(harness.snapshot().node_count(), 1);
    assert!(harness.snapshot().contains_node(&d));
    assert_eq!(harness.snapshot().edge_count(), 0);
}

#[test]
fn test_incoming_edges_from_survivors_are_removed() {
    let mut harness = TestHarness::seeded();
    let cascade = NodeId::new("cascade");
    let terminal = NodeId::new("terminal");
    harness.connect(&terminal, &cascade);

    harness.app.delete_nodes(&[cascade]).unwrap();

    assert!(harness.snapshot().contains_node(&terminal));
    assert_no_dangling_edges(&harness);
}

#[test]
fn test_unknown_ids_leave_snapshot_untouched() {
    let mut harness = TestHarness::seeded();
    let before = harness.snapshot().clone();

    let err = harness.app.delete_nodes(&ids(&["ghost"])).unwrap_err();
    assert_eq!(
        err,
        GraphError::NotFound {
            id: NodeId::new("ghost")
        }
    );
    assert_eq!(harness.snapshot(), &before);
    assert!(!harness.app.can_undo());
}

#[test]
fn test_delete_selection_intent_with_empty_selection_is_noop() {
    let mut harness = TestHarness::seeded();
    harness
        .app
        .apply_intent(MindMapIntent::DeleteSelection)
        .unwrap();
    assert_eq!(harness.snapshot().node_count(), 19);
    assert!(!harness.app.can_undo());
}

#[test]
fn test_deleted_nodes_leave_selection() {
    let mut harness = TestHarness::seeded();
    harness.app.apply_intents([
        MindMapIntent::SetSelection {
            ids: ids(&["get-started", "installation", "models"]),
        },
        MindMapIntent::DeleteNodes {
            ids: ids(&["get-started"]),
        },
    ])
    .unwrap();

    assert_eq!(harness.app.selection().ids(), ids(&["models"]).as_slice());

    harness.app.undo();
    assert_eq!(harness.snapshot().node_count(), 19);
    assert_eq!(harness.app.selection().len(), 1);
}

#[test]
fn test_large_deletion_requires_confirmation() {
    let harness = TestHarness::seeded();
    assert!(harness.app.deletion_requires_confirmation(&ids(&["root"])));
    assert!(
        !harness
            .app
            .deletion_requires_confirmation(&ids(&["cascade", "editor"]))
    );
}
