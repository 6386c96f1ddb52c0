#![allow(missing_docs)]

use proptest::prelude::*;
use slotgraph::admin::verify;
use slotgraph::storage::Graph;
use std::collections::{BTreeMap, BTreeSet};

const VERTEX_CAPACITY: usize = 6;
const EDGE_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
enum Operation {
    CreateVertex(String),
    DeleteVertex(String),
    CreateEdge { weight: i32, from: String, to: String },
    DeleteEdge { from: String, to: String },
    Reset,
}

fn arb_label() -> impl Strategy<Value = String> {
    "[a-dA-D]{1,2}"
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => arb_label().prop_map(Operation::CreateVertex),
        2 => arb_label().prop_map(Operation::DeleteVertex),
        5 => (any::<i32>(), arb_label(), arb_label())
            .prop_map(|(weight, from, to)| Operation::CreateEdge { weight, from, to }),
        2 => (arb_label(), arb_label()).prop_map(|(from, to)| Operation::DeleteEdge { from, to }),
        1 => Just(Operation::Reset),
    ]
}

/// Reference model: label set plus weighted ordered pairs.
#[derive(Default)]
struct Model {
    vertices: BTreeSet<String>,
    edges: BTreeMap<(String, String), i32>,
}

impl Model {
    fn apply(&mut self, op: &Operation) {
        match op {
            Operation::CreateVertex(raw) => {
                let label = raw.to_ascii_uppercase();
                if self.vertices.len() < VERTEX_CAPACITY {
                    self.vertices.insert(label);
                }
            }
            Operation::DeleteVertex(raw) => {
                let label = raw.to_ascii_uppercase();
                if self.vertices.remove(&label) {
                    self.edges
                        .retain(|(from, to), _| *from != label && *to != label);
                }
            }
            Operation::CreateEdge { weight, from, to } => {
                let key = (from.to_ascii_uppercase(), to.to_ascii_uppercase());
                let known = self.vertices.contains(&key.0) && self.vertices.contains(&key.1);
                if known && self.edges.len() < EDGE_CAPACITY {
                    self.edges.entry(key).or_insert(*weight);
                }
            }
            Operation::DeleteEdge { from, to } => {
                self.edges
                    .remove(&(from.to_ascii_uppercase(), to.to_ascii_uppercase()));
            }
            Operation::Reset => {
                self.vertices.clear();
                self.edges.clear();
            }
        }
    }
}

fn apply(graph: &mut Graph, op: &Operation) {
    let _ = match op {
        Operation::CreateVertex(label) => graph.create_vertex(label).map(|_| ()),
        Operation::DeleteVertex(label) => graph.delete_vertex_by_label(label).map(|_| ()),
        Operation::CreateEdge { weight, from, to } => {
            graph.create_edge_by_labels(*weight, from, to).map(|_| ())
        }
        Operation::DeleteEdge { from, to } => graph.delete_edge_by_labels(from, to).map(|_| ()),
        Operation::Reset => {
            graph.reset();
            Ok(())
        }
    };
}

fn observed(graph: &Graph) -> (BTreeSet<String>, BTreeMap<(String, String), i32>) {
    let vertices = graph
        .compact_vertices()
        .into_iter()
        .map(|id| graph.label(id).to_string())
        .collect();
    let edges = graph
        .compact_edges()
        .into_iter()
        .map(|id| {
            let edge = graph.edge(id);
            (
                (
                    graph.label(edge.origin).to_string(),
                    graph.label(edge.endpoint).to_string(),
                ),
                edge.weight,
            )
        })
        .collect();
    (vertices, edges)
}

proptest! {
    #[test]
    fn prop_graph_matches_model(ops in prop::collection::vec(arb_operation(), 1..120)) {
        let mut graph = Graph::with_capacity(VERTEX_CAPACITY, EDGE_CAPACITY).unwrap();
        let mut model = Model::default();

        for op in &ops {
            apply(&mut graph, op);
            model.apply(op);

            let (vertices, edges) = observed(&graph);
            prop_assert_eq!(&vertices, &model.vertices, "after {:?}", op);
            prop_assert_eq!(&edges, &model.edges, "after {:?}", op);
            prop_assert_eq!(
                graph.free_vertex_slots() + graph.vertex_count(),
                VERTEX_CAPACITY
            );
            prop_assert_eq!(graph.free_edge_slots() + graph.edge_count(), EDGE_CAPACITY);
        }

        let report = verify(&graph);
        prop_assert!(report.success, "{:?}", report.findings);
    }

    #[test]
    fn prop_lookup_ignores_case(label in "[a-zA-Z_]{1,16}") {
        let mut graph = Graph::with_capacity(2, 1).unwrap();
        let id = graph.create_vertex(&label).unwrap();
        prop_assert_eq!(graph.find_vertex(&label.to_ascii_lowercase()), Some(id));
        prop_assert_eq!(graph.find_vertex(&label.to_ascii_uppercase()), Some(id));
        prop_assert!(graph.create_vertex(&label.to_ascii_lowercase()).is_err());
        prop_assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn prop_compaction_is_dense_and_unique(deletes in prop::collection::vec(any::<bool>(), 8)) {
        let mut graph = Graph::with_capacity(8, 1).unwrap();
        let labels = ["A", "B", "C", "D", "E", "F", "G", "H"];
        for label in labels {
            graph.create_vertex(label).unwrap();
        }
        for (label, delete) in labels.iter().zip(&deletes) {
            if *delete {
                graph.delete_vertex_by_label(label).unwrap();
            }
        }
        let compact = graph.compact_vertices();
        let unique: BTreeSet<_> = compact.iter().copied().collect();
        prop_assert_eq!(unique.len(), compact.len());
        prop_assert_eq!(compact.len(), graph.vertex_count());
        prop_assert!(compact.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
