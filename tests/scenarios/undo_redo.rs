/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use mindgraph::app::{DragPhase, MindMapIntent};
use mindgraph::config::EditorConfig;
use mindgraph::model::graph::{GraphSnapshot, NodePatch, Position, PositionChange};

use super::harness::{TestHarness, ids};

#[test]
fn test_undo_n_times_returns_to_initial_snapshot() {
    let mut harness = TestHarness::seeded();
    let initial = harness.snapshot().clone();

    let a = harness.add_note(10.0);
    let b = harness.add_note(20.0);
    harness.connect(&a, &b);
    harness
        .app
        .update_node_field(&a, NodePatch::label("Renamed"))
        .unwrap();
    harness.app.delete_nodes(&ids(&["editor"])).unwrap();

    for _ in 0..5 {
        assert!(harness.app.undo());
    }
    assert_eq!(harness.snapshot(), &initial);
    assert!(!harness.app.can_undo());
    assert!(!harness.app.undo(), "undo at the oldest entry is a no-op");
}

#[test]
fn test_redo_restores_exact_undone_snapshot() {
    let mut harness = TestHarness::new();
    harness.add_note(0.0);
    harness.add_note(1.0);
    let latest = harness.snapshot().clone();

    harness.app.undo();
    assert_eq!(harness.snapshot().node_count(), 1);
    assert!(harness.app.redo());
    assert_eq!(harness.snapshot(), &latest);
    assert!(!harness.app.redo(), "redo at the newest entry is a no-op");
}

#[test]
fn test_new_checkpoint_discards_redo_branch() {
    let mut harness = TestHarness::new();
    harness.add_note(0.0);
    harness.add_note(1.0);

    harness.app.undo();
    assert!(harness.app.can_redo());
    harness.add_note(2.0);

    assert!(!harness.app.can_redo(), "redo branch should be discarded");
    let after = harness.snapshot().clone();
    assert!(!harness.app.redo());
    assert_eq!(harness.snapshot(), &after);
}

#[test]
fn test_history_is_bounded_and_undo_bottoms_out() {
    let mut harness = TestHarness::with_config(
        GraphSnapshot::new(),
        EditorConfig {
            max_history: 5,
            ..EditorConfig::default()
        },
    );
    for i in 0..12 {
        harness.add_note(i as f64);
    }
    assert_eq!(harness.app.history().len(), 5);

    let mut undone = 0;
    while harness.app.undo() {
        undone += 1;
    }
    assert_eq!(undone, 4);
    assert_eq!(harness.snapshot().node_count(), 8);
    assert!(!harness.app.can_undo());
}

#[test]
fn test_drag_records_one_undo_step() {
    let mut harness = TestHarness::seeded();
    let initial = harness.snapshot().clone();

    let mut intents: Vec<MindMapIntent> = (1..=20)
        .map(|step| MindMapIntent::DragNodes {
            changes: vec![
                PositionChange::new("root", Position::new(step as f64, 0.0)),
                PositionChange::new("cascade", Position::new(0.0, step as f64)),
            ],
            phase: DragPhase::Moving,
        })
        .collect();
    intents.push(MindMapIntent::DragNodes {
        changes: Vec::new(),
        phase: DragPhase::Released,
    });
    harness.app.apply_intents(intents).unwrap();

    assert_eq!(harness.app.history().len(), 2);
    assert!(harness.app.undo());
    assert_eq!(harness.snapshot(), &initial);
}

#[test]
fn test_explicit_checkpoint_records_uncommitted_moves() {
    let mut harness = TestHarness::seeded();
    harness
        .app
        .apply_node_positions(&[PositionChange::new("root", Position::new(0.0, 0.0))])
        .unwrap();
    assert_eq!(harness.app.history().len(), 1);

    harness.app.apply_intent(MindMapIntent::Checkpoint).unwrap();
    assert_eq!(harness.app.history().len(), 2);
    assert!(harness.app.can_undo());
}

#[test]
fn test_unchanged_sequences_are_shared_between_snapshots() {
    let mut harness = TestHarness::seeded();
    let before = harness.snapshot().clone();

    harness.add_note(0.0);
    assert!(harness.snapshot().shares_edges_with(&before));
    assert!(!harness.snapshot().shares_nodes_with(&before));

    let with_node = harness.snapshot().clone();
    let ids = ids(&["root", "cascade"]);
    harness.connect(&ids[0], &ids[1]);
    assert!(harness.snapshot().shares_nodes_with(&with_node));
}

#[test]
fn test_undo_at_oldest_entry_drops_unreleased_drag() {
    let mut harness = TestHarness::seeded();
    let initial = harness.snapshot().clone();

    harness
        .app
        .drag_nodes(
            &[PositionChange::new("root", Position::new(1.0, 1.0))],
            DragPhase::Moving,
        )
        .unwrap();
    assert_ne!(harness.snapshot(), &initial);

    assert!(harness.app.undo(), "dropping the drag moves the snapshot");
    assert_eq!(harness.snapshot(), &initial);
    assert!(!harness.app.undo());

    // The abandoned drag must not ride along inside the next step.
    harness.add_note(0.0);
    assert!(harness.app.undo());
    assert_eq!(harness.snapshot(), &initial);
}
