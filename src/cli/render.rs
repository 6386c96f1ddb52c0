//! Text views built on the compaction and adjacency primitives.
//!
//! Every view lists vertices in compaction (pool) order.

use crate::storage::Graph;
use crate::types::VertexId;

const NO_EDGE: &str = ".";

/// Renders the weight matrix: rows are origins, columns are endpoints.
pub fn render_matrix(graph: &Graph) -> String {
    let vertices = graph.compact_vertices();
    if vertices.is_empty() {
        return "(no vertices)".to_string();
    }
    let index = graph.dense_index();
    let n = vertices.len();
    let mut cells = vec![vec![None; n]; n];
    for edge_id in graph.compact_edges() {
        let edge = graph.edge(edge_id);
        cells[index[&edge.origin]][index[&edge.endpoint]] = Some(edge.weight);
    }

    let labels: Vec<&str> = vertices.iter().map(|id| graph.label(*id).as_str()).collect();
    let row_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let col_width = cells
        .iter()
        .flatten()
        .flatten()
        .map(|w| w.to_string().len())
        .chain(labels.iter().map(|l| l.len()))
        .max()
        .unwrap_or(1);

    let header: String = labels
        .iter()
        .map(|label| format!(" {label:>col_width$}"))
        .collect();
    let rows = cells.iter().zip(&labels).map(|(row, label)| {
        let weights: String = row
            .iter()
            .map(|cell| match cell {
                Some(weight) => format!(" {weight:>col_width$}"),
                None => format!(" {NO_EDGE:>col_width$}"),
            })
            .collect();
        format!("{label:<row_width$}{weights}")
    });
    std::iter::once(format!("{:row_width$}{header}", ""))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `LABEL -> TARGET[weight], ...` for every vertex.
pub fn render_adjacency(graph: &Graph) -> String {
    let vertices = graph.compact_vertices();
    if vertices.is_empty() {
        return "(no vertices)".to_string();
    }
    vertices
        .into_iter()
        .map(|id| adjacency_line(graph, id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the outgoing adjacency line of a single vertex.
pub fn render_adjacency_of(graph: &Graph, vertex: VertexId) -> String {
    adjacency_line(graph, vertex)
}

fn adjacency_line(graph: &Graph, vertex: VertexId) -> String {
    let targets: Vec<String> = graph
        .adjacency_out(vertex)
        .into_iter()
        .map(|edge_id| {
            let edge = graph.edge(edge_id);
            format!("{}[{}]", graph.label(edge.endpoint), edge.weight)
        })
        .collect();
    if targets.is_empty() {
        graph.label(vertex).to_string()
    } else {
        format!("{} -> {}", graph.label(vertex), targets.join(", "))
    }
}

/// Renders one `ORIGIN -> ENDPOINT [weight]` line per edge.
pub fn render_edge_list(graph: &Graph) -> String {
    let edges = graph.compact_edges();
    if edges.is_empty() {
        return "(no edges)".to_string();
    }
    edges
        .into_iter()
        .map(|id| {
            let edge = graph.edge(id);
            format!(
                "{} -> {} [{}]",
                graph.label(edge.origin),
                graph.label(edge.endpoint),
                edge.weight
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
