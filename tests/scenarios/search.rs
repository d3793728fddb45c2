/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use mindgraph::app::{MindMapIntent, ViewRequest};
use mindgraph::model::graph::{NodeId, NodePatch};

use super::harness::{TestHarness, ids};

fn match_ids(harness: &TestHarness) -> Vec<&str> {
    harness
        .app
        .search_state()
        .matches()
        .iter()
        .map(NodeId::as_str)
        .collect()
}

/// Labels "Cascade", "Cascade Overview", "Cascade Usage", cycled three times.
#[test]
fn test_advance_cycles_through_matches() {
    let mut harness = TestHarness::seeded();
    harness
        .app
        .update_node_field(
            &NodeId::new("cascade-overview"),
            NodePatch::label("Cascade Overview"),
        )
        .unwrap();
    harness
        .app
        .update_node_field(
            &NodeId::new("cascade-usage"),
            NodePatch::label("Cascade Usage"),
        )
        .unwrap();

    harness.app.search("cascade");
    assert_eq!(
        match_ids(&harness),
        vec!["cascade", "cascade-overview", "cascade-usage"]
    );

    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(harness.app.search_state().cursor());
        harness.app.apply_intent(MindMapIntent::AdvanceSearch).unwrap();
    }
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(harness.app.search_state().cursor(), 0);
}

#[test]
fn test_retreat_wraps_to_last_match() {
    let mut harness = TestHarness::seeded();
    harness.app.search("overview");
    harness.app.apply_intent(MindMapIntent::RetreatSearch).unwrap();
    assert_eq!(
        harness.app.search_state().active_match(),
        Some(&NodeId::new("context-overview"))
    );
    assert_eq!(
        harness.app.take_pending_view_request(),
        Some(ViewRequest::FocusNode(NodeId::new("context-overview")))
    );
}

#[test]
fn test_blank_query_has_no_matches() {
    let mut harness = TestHarness::seeded();
    harness
        .app
        .apply_intent(MindMapIntent::Search {
            query: "   ".to_string(),
        })
        .unwrap();
    assert!(harness.app.search_state().matches().is_empty());
    harness.app.advance_search();
    assert_eq!(harness.app.search_state().cursor(), 0);
}

#[test]
fn test_search_follows_undo_and_redo() {
    let mut harness = TestHarness::seeded();
    harness.app.search("logs");
    assert_eq!(match_ids(&harness), vec!["logs"]);

    harness.app.delete_nodes(&ids(&["troubleshooting"])).unwrap();
    assert!(match_ids(&harness).is_empty());
    assert_eq!(harness.app.search_state().query(), "logs");

    harness.app.undo();
    assert_eq!(match_ids(&harness), vec!["logs"]);
}

#[test]
fn test_new_query_resets_cursor() {
    let mut harness = TestHarness::seeded();
    harness.app.search("overview");
    harness.app.advance_search();
    assert_eq!(harness.app.search_state().cursor(), 1);

    harness.app.search("o");
    assert_eq!(harness.app.search_state().cursor(), 0);
}

#[test]
fn test_matches_track_new_nodes() {
    let mut harness = TestHarness::new();
    harness.app.search("new note");
    assert!(harness.app.search_state().matches().is_empty());

    let first = harness.add_note(0.0);
    let second = harness.add_note(1.0);
    assert_eq!(
        harness.app.search_state().matches(),
        &[first, second][..]
    );
}
