use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::edge::{Edge, EdgeStore};
use super::label::Label;
use super::metrics::{default_metrics, MetricsSnapshot, StorageMetrics};
use super::options::GraphOptions;
use super::vertex::{Vertex, VertexStore};
use crate::types::{EdgeId, GraphError, Result, VertexId};

/// In-memory directed, weighted graph over two fixed-capacity pools.
///
/// Every occupied edge references two occupied vertices at all times:
/// deleting a vertex first deletes every edge touching it.
pub struct Graph {
    vertices: VertexStore,
    edges: EdgeStore,
    metrics: Arc<dyn StorageMetrics>,
}

/// Outcome of a cascading vertex deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexRemoval {
    /// Handle the vertex occupied before deletion.
    pub vertex: VertexId,
    /// Label of the removed vertex.
    pub label: Label,
    /// Edges removed along with the vertex, in pool order.
    pub edges: Vec<(EdgeId, Edge)>,
}

impl Graph {
    /// Builds an empty graph with the capacities in `opts`.
    pub fn new(opts: GraphOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            vertices: VertexStore::with_capacity(opts.vertex_capacity),
            edges: EdgeStore::with_capacity(opts.edge_capacity),
            metrics: opts.metrics.unwrap_or_else(default_metrics),
        })
    }

    /// Shorthand for [`Graph::new`] with explicit capacities and no metrics.
    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Result<Self> {
        Self::new(
            GraphOptions::new()
                .vertex_capacity(vertex_capacity)
                .edge_capacity(edge_capacity),
        )
    }

    /// Read access to the vertex pool.
    pub fn vertices(&self) -> &VertexStore {
        &self.vertices
    }

    /// Read access to the edge pool.
    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    /// Current counters from the installed metrics sink, if it keeps any.
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.snapshot()
    }

    // ----- vertices -----

    /// Creates a vertex; see [`VertexStore::create`].
    pub fn create_vertex(&mut self, raw_label: &str) -> Result<VertexId> {
        let result = self.vertices.create(raw_label);
        if result.is_ok() {
            self.metrics.vertex_created();
        }
        self.track(result)
    }

    /// Deletes a vertex together with every edge that references it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied vertex.
    pub fn delete_vertex(&mut self, id: VertexId) -> VertexRemoval {
        assert!(
            self.vertices.contains(id),
            "vertex handle {id} does not reference an occupied slot"
        );
        let edges: Vec<(EdgeId, Edge)> = self
            .edges
            .references(id)
            .into_iter()
            .map(|edge_id| (edge_id, self.edges.delete(edge_id)))
            .collect();
        for _ in &edges {
            self.metrics.edge_deleted();
        }
        let vertex = self.vertices.delete(id);
        self.metrics.vertex_deleted();
        if !edges.is_empty() {
            debug!(vertex = %id, cascaded = edges.len(), "graph.vertex.cascade");
        }
        VertexRemoval {
            vertex: id,
            label: vertex.label,
            edges,
        }
    }

    /// Resolves `raw_label` and deletes that vertex with its edges.
    pub fn delete_vertex_by_label(&mut self, raw_label: &str) -> Result<VertexRemoval> {
        let id = self.resolve(raw_label)?;
        Ok(self.delete_vertex(id))
    }

    /// Looks a vertex up by label in any letter case.
    pub fn find_vertex(&self, raw_label: &str) -> Option<VertexId> {
        self.vertices.find(raw_label)
    }

    /// Like [`Graph::find_vertex`] but reports a miss as [`GraphError::NotFound`].
    pub fn resolve(&self, raw_label: &str) -> Result<VertexId> {
        self.vertices
            .find(raw_label)
            .ok_or_else(|| GraphError::not_found("vertex", raw_label))
    }

    /// Returns the vertex behind an occupied handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied vertex.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        match self.vertices.get(id) {
            Some(vertex) => vertex,
            None => panic!("vertex handle {id} does not reference an occupied slot"),
        }
    }

    /// Label of an occupied vertex.
    pub fn label(&self, id: VertexId) -> &Label {
        self.vertices.label(id)
    }

    // ----- edges -----

    /// Creates the directed edge `origin -> endpoint`.
    ///
    /// # Panics
    ///
    /// Panics if either handle does not reference an occupied vertex.
    pub fn create_edge(
        &mut self,
        weight: i32,
        origin: VertexId,
        endpoint: VertexId,
    ) -> Result<EdgeId> {
        assert!(
            self.vertices.contains(origin),
            "origin handle {origin} does not reference an occupied vertex"
        );
        assert!(
            self.vertices.contains(endpoint),
            "endpoint handle {endpoint} does not reference an occupied vertex"
        );
        let result = self.edges.create(weight, origin, endpoint);
        if result.is_ok() {
            self.metrics.edge_created();
        }
        self.track(result)
    }

    /// Resolves both labels, then creates the edge.
    ///
    /// Unknown labels are rejected before the edge pool is touched.
    pub fn create_edge_by_labels(
        &mut self,
        weight: i32,
        origin_label: &str,
        endpoint_label: &str,
    ) -> Result<EdgeId> {
        let origin = self.resolve(origin_label)?;
        let endpoint = self.resolve(endpoint_label)?;
        self.create_edge(weight, origin, endpoint)
    }

    /// Deletes an edge and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied edge.
    pub fn delete_edge(&mut self, id: EdgeId) -> Edge {
        let edge = self.edges.delete(id);
        self.metrics.edge_deleted();
        edge
    }

    /// Resolves both labels and deletes the edge between them.
    pub fn delete_edge_by_labels(
        &mut self,
        origin_label: &str,
        endpoint_label: &str,
    ) -> Result<Edge> {
        let id = self
            .find_edge_by_labels(origin_label, endpoint_label)
            .ok_or_else(|| {
                GraphError::not_found("edge", format!("{origin_label} -> {endpoint_label}"))
            })?;
        Ok(self.delete_edge(id))
    }

    /// Exact ordered-pair lookup.
    pub fn find_edge_by_vertices(&self, origin: VertexId, endpoint: VertexId) -> Option<EdgeId> {
        self.edges.find_by_vertices(origin, endpoint)
    }

    /// Ordered-pair lookup by labels; `None` if either label does not resolve.
    pub fn find_edge_by_labels(&self, origin_label: &str, endpoint_label: &str) -> Option<EdgeId> {
        self.edges
            .find_by_labels(&self.vertices, origin_label, endpoint_label)
    }

    /// Returns the edge behind an occupied handle.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.edges.edge(id)
    }

    // ----- queries -----

    /// Edges leaving `vertex`, in pool order.
    pub fn adjacency_out(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.adjacency(vertex, "out", |edge| edge.origin == vertex)
    }

    /// Edges arriving at `vertex`, in pool order.
    pub fn adjacency_in(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.adjacency(vertex, "in", |edge| edge.endpoint == vertex)
    }

    fn adjacency<F>(&self, vertex: VertexId, direction: &'static str, keep: F) -> Vec<EdgeId>
    where
        F: Fn(&Edge) -> bool,
    {
        assert!(
            self.vertices.contains(vertex),
            "vertex handle {vertex} does not reference an occupied slot"
        );
        self.metrics.adjacency_scan(direction);
        self.edges
            .iter()
            .filter(|(_, edge)| keep(edge))
            .map(|(id, _)| id)
            .collect()
    }

    /// Occupied vertex handles in pool order.
    pub fn compact_vertices(&self) -> Vec<VertexId> {
        self.vertices.compact()
    }

    /// Occupied edge handles in pool order.
    pub fn compact_edges(&self) -> Vec<EdgeId> {
        self.edges.compact()
    }

    /// Maps each occupied vertex to its position in [`Graph::compact_vertices`].
    pub fn dense_index(&self) -> BTreeMap<VertexId, usize> {
        self.vertices
            .compact()
            .into_iter()
            .enumerate()
            .map(|(pos, id)| (id, pos))
            .collect()
    }

    /// Unoccupied vertex slots.
    pub fn free_vertex_slots(&self) -> usize {
        self.vertices.free_slot_count()
    }

    /// Unoccupied edge slots.
    pub fn free_edge_slots(&self) -> usize {
        self.edges.free_slot_count()
    }

    /// Occupied vertex slots.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Occupied edge slots.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Frees every slot in both pools.
    pub fn reset(&mut self) {
        debug!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            "graph.reset"
        );
        self.edges.reset();
        self.vertices.reset();
    }

    fn track<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.metrics.rejected(err.kind());
            match err {
                GraphError::PoolExhausted { .. } => warn!(error = %err, "graph.pool.exhausted"),
                _ => debug!(error = %err, "graph.rejected"),
            }
        }
        result
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            vertices: VertexStore::with_capacity(super::options::DEFAULT_VERTEX_CAPACITY),
            edges: EdgeStore::with_capacity(super::options::DEFAULT_EDGE_CAPACITY),
            metrics: default_metrics(),
        }
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices.len())
            .field("vertex_capacity", &self.vertices.capacity())
            .field("edges", &self.edges.len())
            .field("edge_capacity", &self.edges.capacity())
            .finish()
    }
}
