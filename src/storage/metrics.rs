use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Trait for tracking storage operations on a [`super::Graph`].
///
/// Implementations observe successful mutations, adjacency scans and
/// rejected requests. The graph never reads anything back from the sink.
pub trait StorageMetrics: Send + Sync {
    /// Records the creation of a vertex.
    fn vertex_created(&self);

    /// Records the deletion of a vertex.
    fn vertex_deleted(&self);

    /// Records the creation of an edge.
    fn edge_created(&self);

    /// Records the deletion of an edge, including cascaded deletions.
    fn edge_deleted(&self);

    /// Records an adjacency scan.
    ///
    /// # Parameters
    /// * `direction` - `"out"` for outgoing edges, `"in"` for incoming edges.
    fn adjacency_scan(&self, direction: &'static str);

    /// Records a rejected mutation, keyed by [`crate::types::GraphError::kind`].
    fn rejected(&self, kind: &'static str);

    /// Returns a point-in-time copy of the counters, if this sink keeps any.
    fn snapshot(&self) -> Option<MetricsSnapshot> {
        None
    }
}

/// A no-op implementation of [`StorageMetrics`] that discards all recorded metrics.
#[derive(Default)]
pub struct NoopMetrics;

impl StorageMetrics for NoopMetrics {
    fn vertex_created(&self) {}
    fn vertex_deleted(&self) {}
    fn edge_created(&self) {}
    fn edge_deleted(&self) {}
    fn adjacency_scan(&self, _direction: &'static str) {}
    fn rejected(&self, _kind: &'static str) {}
}

/// Counter-based implementation of [`StorageMetrics`].
#[derive(Default)]
pub struct CounterMetrics {
    /// Number of vertices created.
    pub vertices_created: AtomicU64,

    /// Number of vertices deleted.
    pub vertices_deleted: AtomicU64,

    /// Number of edges created.
    pub edges_created: AtomicU64,

    /// Number of edges deleted.
    pub edges_deleted: AtomicU64,

    /// Number of outgoing adjacency scans performed.
    pub adjacency_scans_out: AtomicU64,

    /// Number of incoming adjacency scans performed.
    pub adjacency_scans_in: AtomicU64,

    /// Number of mutations rejected for any reason.
    pub rejected: AtomicU64,

    /// Number of mutations rejected because a pool was full.
    pub rejected_exhausted: AtomicU64,
}

impl StorageMetrics for CounterMetrics {
    fn vertex_created(&self) {
        self.vertices_created.fetch_add(1, Ordering::Relaxed);
    }

    fn vertex_deleted(&self) {
        self.vertices_deleted.fetch_add(1, Ordering::Relaxed);
    }

    fn edge_created(&self) {
        self.edges_created.fetch_add(1, Ordering::Relaxed);
    }

    fn edge_deleted(&self) {
        self.edges_deleted.fetch_add(1, Ordering::Relaxed);
    }

    fn adjacency_scan(&self, direction: &'static str) {
        match direction {
            "out" => {
                self.adjacency_scans_out.fetch_add(1, Ordering::Relaxed);
            }
            "in" => {
                self.adjacency_scans_in.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn rejected(&self, kind: &'static str) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
        if kind == "pool_exhausted" {
            self.rejected_exhausted.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> Option<MetricsSnapshot> {
        Some(MetricsSnapshot {
            vertices_created: self.vertices_created.load(Ordering::Relaxed),
            vertices_deleted: self.vertices_deleted.load(Ordering::Relaxed),
            edges_created: self.edges_created.load(Ordering::Relaxed),
            edges_deleted: self.edges_deleted.load(Ordering::Relaxed),
            adjacency_scans_out: self.adjacency_scans_out.load(Ordering::Relaxed),
            adjacency_scans_in: self.adjacency_scans_in.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            rejected_exhausted: self.rejected_exhausted.load(Ordering::Relaxed),
        })
    }
}

/// Plain copy of [`CounterMetrics`] suitable for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Number of vertices created.
    pub vertices_created: u64,
    /// Number of vertices deleted.
    pub vertices_deleted: u64,
    /// Number of edges created.
    pub edges_created: u64,
    /// Number of edges deleted.
    pub edges_deleted: u64,
    /// Number of outgoing adjacency scans.
    pub adjacency_scans_out: u64,
    /// Number of incoming adjacency scans.
    pub adjacency_scans_in: u64,
    /// Number of rejected mutations.
    pub rejected: u64,
    /// Number of mutations rejected because a pool was full.
    pub rejected_exhausted: u64,
}

/// Returns the default metrics implementation wrapped in an [`Arc`].
///
/// The default implementation is [`NoopMetrics`].
pub fn default_metrics() -> Arc<dyn StorageMetrics> {
    Arc::new(NoopMetrics)
}
