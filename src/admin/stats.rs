use serde::Serialize;

use crate::storage::{Graph, MetricsSnapshot};

/// Occupancy of both pools plus operation counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Vertex pool usage.
    pub vertices: PoolStats,
    /// Edge pool usage.
    pub edges: PoolStats,
    /// Counters, when the graph was built with a counting metrics sink.
    pub metrics: Option<MetricsSnapshot>,
}

/// Slot usage of one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Fixed number of slots.
    pub capacity: usize,
    /// Occupied slots.
    pub occupied: usize,
    /// Free slots.
    pub free: usize,
}

/// Collects pool usage for `graph`.
pub fn stats(graph: &Graph) -> StatsReport {
    let vertices = graph.vertices();
    let edges = graph.edges();
    StatsReport {
        vertices: PoolStats {
            capacity: vertices.capacity(),
            occupied: vertices.len(),
            free: vertices.free_slot_count(),
        },
        edges: PoolStats {
            capacity: edges.capacity(),
            occupied: edges.len(),
            free: edges.free_slot_count(),
        },
        metrics: graph.metrics(),
    }
}
