/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use mindgraph::app::MindMapApp;
use mindgraph::config::EditorConfig;
use mindgraph::model::graph::{GraphError, NodePatch};
use mindgraph::persistence::{MapStore, PersistenceError};
use mindgraph::services::persistence::{
    export_json, import_json, snapshot_from_json, snapshot_to_json,
};
use tempfile::TempDir;

use super::harness::{TestHarness, ids};

#[test]
fn test_edited_map_survives_json_round_trip() {
    let mut harness = TestHarness::seeded();
    let a = harness.add_note(42.5);
    harness.connect(&ids(&["root"])[0], &a);
    harness
        .app
        .update_node_field(&a, NodePatch::label("Round trip"))
        .unwrap();

    let json = snapshot_to_json(harness.snapshot()).unwrap();
    let restored = snapshot_from_json(&json).unwrap();
    assert_eq!(&restored, harness.snapshot());
}

#[test]
fn test_imported_map_starts_a_fresh_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docs.json");
    let mut harness = TestHarness::seeded();
    harness.app.delete_nodes(&ids(&["cascade"])).unwrap();
    export_json(&path, harness.snapshot()).unwrap();

    let imported = import_json(&path).unwrap();
    let mut app = MindMapApp::from_snapshot(imported.clone(), EditorConfig::default());
    assert_eq!(app.snapshot().node_count(), 15);
    assert!(!app.can_undo());

    app.clear();
    app.reset();
    assert_eq!(app.snapshot(), &imported);
}

#[test]
fn test_dangling_edge_in_json_is_rejected() {
    let raw = r#"{
        "nodes": [ { "id": "a", "kind": "topic", "position": { "x": 0, "y": 0 }, "label": "A" } ],
        "edges": [ { "id": "e", "source": "a", "target": "gone", "sourceAnchor": "right" } ]
    }"#;
    let err = snapshot_from_json(raw).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::InvalidSnapshot(GraphError::InvalidReference { .. })
    ));
}

#[test]
fn test_named_store_and_autosave() {
    let dir = TempDir::new().unwrap();
    let mut store = MapStore::open(dir.path()).unwrap();
    let mut harness = TestHarness::seeded();

    store.save("before", harness.snapshot()).unwrap();
    harness.app.clear();
    store.save_latest(harness.snapshot()).unwrap();

    assert_eq!(store.list().unwrap(), vec!["before".to_string()]);
    let before = store.load("before").unwrap().unwrap();
    assert_eq!(before.node_count(), 19);
    assert!(store.load_latest().unwrap().unwrap().is_empty());

    assert!(store.delete("before").unwrap());
    assert!(store.list().unwrap().is_empty());
}
