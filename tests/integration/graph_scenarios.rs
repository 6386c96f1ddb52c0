#![allow(missing_docs)]

use slotgraph::admin::verify;
use slotgraph::storage::{CounterMetrics, Graph, GraphOptions};
use slotgraph::types::{GraphError, PoolKind};
use std::sync::Arc;

fn labels_of(graph: &Graph) -> Vec<String> {
    graph
        .compact_vertices()
        .into_iter()
        .map(|id| graph.label(id).to_string())
        .collect()
}

#[test]
fn labels_are_normalized_and_listed_in_pool_order() {
    let mut graph = Graph::with_capacity(8, 8).expect("graph");
    graph.create_vertex("foo").expect("foo");
    graph.create_vertex("BAR").expect("bar");
    assert_eq!(labels_of(&graph), vec!["FOO", "BAR"]);
}

#[test]
fn weighted_edge_is_found_by_any_label_case() {
    let mut graph = Graph::with_capacity(8, 8).expect("graph");
    graph.create_vertex("foo").expect("foo");
    graph.create_vertex("BAR").expect("bar");
    let id = graph
        .create_edge_by_labels(5, "FOO", "BAR")
        .expect("edge");

    let found = graph.find_edge_by_labels("foo", "bar").expect("lookup");
    assert_eq!(found, id);
    assert_eq!(graph.edge(found).weight, 5);
}

#[test]
fn edge_to_unknown_vertex_leaves_edge_pool_untouched() {
    let mut graph = Graph::with_capacity(8, 8).expect("graph");
    graph.create_vertex("foo").expect("foo");
    let free_before = graph.free_edge_slots();

    let err = graph.create_edge_by_labels(3, "FOO", "BAZ").unwrap_err();
    assert_eq!(
        err,
        GraphError::NotFound {
            what: "vertex",
            key: "BAZ".into()
        }
    );
    assert_eq!(graph.free_edge_slots(), free_before);
    assert!(graph.compact_edges().is_empty());
}

#[test]
fn reset_frees_every_slot() {
    let mut graph = Graph::with_capacity(4, 6).expect("graph");
    graph.create_vertex("a").expect("a");
    graph.create_vertex("b").expect("b");
    graph.create_edge_by_labels(1, "a", "b").expect("edge");

    graph.reset();
    assert!(graph.compact_vertices().is_empty());
    assert!(graph.compact_edges().is_empty());
    assert_eq!(graph.free_vertex_slots(), 4);
    assert_eq!(graph.free_edge_slots(), 6);
}

#[test]
fn case_variants_resolve_to_one_vertex() {
    let mut graph = Graph::with_capacity(4, 4).expect("graph");
    let id = graph.create_vertex("MiXeD").expect("create");
    for variant in ["mixed", "MIXED", "Mixed", "mIxEd"] {
        assert_eq!(graph.find_vertex(variant), Some(id), "{variant}");
    }
}

#[test]
fn duplicate_label_occupies_one_slot() {
    let mut graph = Graph::with_capacity(4, 4).expect("graph");
    graph.create_vertex("VALID").expect("first");
    let err = graph.create_vertex("valid").unwrap_err();
    assert_eq!(
        err,
        GraphError::DuplicateLabel {
            label: "VALID".into()
        }
    );
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.free_vertex_slots(), 3);
}

#[test]
fn exhausted_vertex_pool_rejects_without_state_change() {
    let mut graph = Graph::with_capacity(3, 4).expect("graph");
    for label in ["a", "b", "c"] {
        graph.create_vertex(label).expect(label);
    }
    assert_eq!(graph.free_vertex_slots(), 0);
    let before = graph.compact_vertices();

    let err = graph.create_vertex("d").unwrap_err();
    assert_eq!(
        err,
        GraphError::PoolExhausted {
            pool: PoolKind::Vertex,
            capacity: 3
        }
    );
    assert_eq!(graph.compact_vertices(), before);
    assert_eq!(graph.find_vertex("d"), None);
}

#[test]
fn pools_exhaust_independently() {
    let mut graph = Graph::with_capacity(2, 1).expect("graph");
    graph.create_vertex("a").expect("a");
    graph.create_vertex("b").expect("b");
    graph.create_edge_by_labels(1, "a", "b").expect("edge");

    let err = graph.create_edge_by_labels(2, "b", "a").unwrap_err();
    assert_eq!(err.kind(), "pool_exhausted");
    assert!(matches!(
        graph.create_vertex("c"),
        Err(GraphError::PoolExhausted {
            pool: PoolKind::Vertex,
            ..
        })
    ));

    graph.delete_vertex_by_label("a").expect("delete a");
    assert_eq!(graph.free_edge_slots(), 1);
    graph.create_vertex("c").expect("c fits after delete");
}

#[test]
fn deleted_vertex_is_no_longer_found() {
    let mut graph = Graph::with_capacity(4, 4).expect("graph");
    graph.create_vertex("gone").expect("create");
    graph.create_vertex("stay").expect("create");
    let free_before = graph.free_vertex_slots();

    graph.delete_vertex_by_label("GONE").expect("delete");
    assert_eq!(graph.find_vertex("gone"), None);
    assert_eq!(graph.free_vertex_slots(), free_before + 1);
    assert_eq!(
        graph.resolve("gone").unwrap_err().kind(),
        "not_found"
    );
}

#[test]
fn ordered_pairs_are_unique_per_direction() {
    let mut graph = Graph::with_capacity(4, 4).expect("graph");
    let a = graph.create_vertex("a").expect("a");
    let b = graph.create_vertex("b").expect("b");
    let ab = graph.create_edge(10, a, b).expect("a -> b");

    let err = graph.create_edge(99, a, b).unwrap_err();
    assert_eq!(err, GraphError::DuplicatePair { edge: ab, weight: 10 });
    assert_eq!(graph.edge(ab).weight, 10);

    let ba = graph.create_edge(10, b, a).expect("reverse direction");
    assert_ne!(ab, ba);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn compaction_lists_each_occupied_slot_once() {
    let mut graph = Graph::with_capacity(6, 6).expect("graph");
    for label in ["a", "b", "c", "d"] {
        graph.create_vertex(label).expect(label);
    }
    graph.delete_vertex_by_label("b").expect("delete b");
    graph.create_vertex("e").expect("e reuses b's slot");

    assert_eq!(labels_of(&graph), vec!["A", "E", "C", "D"]);
    let dense = graph.dense_index();
    let positions: Vec<usize> = graph
        .compact_vertices()
        .iter()
        .map(|id| dense[id])
        .collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[test]
fn adjacency_follows_edge_direction() {
    let mut graph = Graph::with_capacity(4, 8).expect("graph");
    let a = graph.create_vertex("a").expect("a");
    let b = graph.create_vertex("b").expect("b");
    let c = graph.create_vertex("c").expect("c");
    let ab = graph.create_edge(1, a, b).expect("ab");
    let ac = graph.create_edge(2, a, c).expect("ac");
    let cb = graph.create_edge(3, c, b).expect("cb");

    assert_eq!(graph.adjacency_out(a), vec![ab, ac]);
    assert!(graph.adjacency_in(a).is_empty());
    assert_eq!(graph.adjacency_in(b), vec![ab, cb]);
    assert_eq!(graph.adjacency_out(c), vec![cb]);
}

#[test]
fn cascade_keeps_graph_consistent() {
    let metrics = Arc::new(CounterMetrics::default());
    let mut graph = Graph::new(
        GraphOptions::new()
            .vertex_capacity(4)
            .edge_capacity(8)
            .metrics(metrics.clone()),
    )
    .expect("graph");
    for label in ["a", "b", "c"] {
        graph.create_vertex(label).expect(label);
    }
    for (w, from, to) in [(1, "a", "b"), (2, "b", "c"), (3, "c", "a"), (4, "b", "b")] {
        graph.create_edge_by_labels(w, from, to).expect("edge");
    }

    let removal = graph.delete_vertex_by_label("b").expect("delete b");
    assert_eq!(removal.edges.len(), 3);
    assert_eq!(graph.edge_count(), 1);
    assert!(verify(&graph).success);

    let snapshot = graph.metrics().expect("counter metrics");
    assert_eq!(snapshot.vertices_created, 3);
    assert_eq!(snapshot.vertices_deleted, 1);
    assert_eq!(snapshot.edges_created, 4);
    assert_eq!(snapshot.edges_deleted, 3);
}

#[test]
fn invalid_labels_are_rejected() {
    let mut graph = Graph::with_capacity(4, 4).expect("graph");
    for raw in ["", "has space", "seventeen-chars-x", "tab\there"] {
        let err = graph.create_vertex(raw).unwrap_err();
        assert_eq!(err.kind(), "invalid_label", "{raw:?}");
    }
    assert_eq!(graph.vertex_count(), 0);
    assert_eq!(graph.find_vertex(""), None);
}

#[test]
fn zero_capacity_is_rejected() {
    let err = Graph::with_capacity(0, 4).unwrap_err();
    assert_eq!(err.kind(), "invalid_argument");
}
