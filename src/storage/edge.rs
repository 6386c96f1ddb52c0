use serde::Serialize;
use tracing::debug;

use super::pool::SlotPool;
use super::vertex::VertexStore;
use crate::types::{EdgeId, GraphError, PoolKind, Result, VertexId};

/// Contents of an occupied edge slot: a directed, weighted link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Source vertex.
    pub origin: VertexId,
    /// Target vertex.
    pub endpoint: VertexId,
    /// Signed weight.
    pub weight: i32,
}

impl Edge {
    /// Returns `true` if `vertex` sits at either end of this edge.
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.origin == vertex || self.endpoint == vertex
    }
}

/// Fixed-capacity pool of directed edges, unique per ordered pair.
#[derive(Debug, Clone)]
pub struct EdgeStore {
    pool: SlotPool<Edge>,
}

impl EdgeStore {
    /// Creates a store with `capacity` free slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: SlotPool::with_capacity(capacity),
        }
    }

    /// Creates the edge `origin -> endpoint` with `weight`.
    ///
    /// Both handles must reference occupied vertices; that is checked by
    /// [`super::Graph::create_edge`], not here. An existing edge for the same
    /// ordered pair is never overwritten.
    pub fn create(
        &mut self,
        weight: i32,
        origin: VertexId,
        endpoint: VertexId,
    ) -> Result<EdgeId> {
        if let Some(existing) = self.find_by_vertices(origin, endpoint) {
            return Err(GraphError::DuplicatePair {
                edge: existing,
                weight: self.edge(existing).weight,
            });
        }
        let idx = self
            .pool
            .allocate(Edge {
                origin,
                endpoint,
                weight,
            })
            .ok_or(GraphError::PoolExhausted {
                pool: PoolKind::Edge,
                capacity: self.pool.capacity(),
            })?;
        let id = EdgeId(idx as u32);
        debug!(edge = %id, %origin, %endpoint, weight, "graph.edge.created");
        Ok(id)
    }

    /// Frees the slot behind `id` and returns the removed edge.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied slot.
    pub fn delete(&mut self, id: EdgeId) -> Edge {
        let edge = self.pool.release(id.index());
        debug!(
            edge = %id,
            origin = %edge.origin,
            endpoint = %edge.endpoint,
            "graph.edge.deleted"
        );
        edge
    }

    /// Finds the edge for the exact ordered pair `origin -> endpoint`.
    pub fn find_by_vertices(&self, origin: VertexId, endpoint: VertexId) -> Option<EdgeId> {
        self.iter()
            .find(|(_, edge)| edge.origin == origin && edge.endpoint == endpoint)
            .map(|(id, _)| id)
    }

    /// Resolves both labels through `vertices`, then looks up the ordered pair.
    pub fn find_by_labels(
        &self,
        vertices: &VertexStore,
        origin_label: &str,
        endpoint_label: &str,
    ) -> Option<EdgeId> {
        let origin = vertices.find(origin_label)?;
        let endpoint = vertices.find(endpoint_label)?;
        self.find_by_vertices(origin, endpoint)
    }

    /// Handles of every edge with `vertex` at either end, in pool order.
    pub fn references(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.iter()
            .filter(|(_, edge)| edge.touches(vertex))
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the edge behind `id` if the slot is occupied.
    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.pool.get(id.index())
    }

    /// Returns the edge behind an occupied slot.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied slot.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        match self.get(id) {
            Some(edge) => edge,
            None => panic!("edge handle {id} does not reference an occupied slot"),
        }
    }

    /// Number of unoccupied slots.
    pub fn free_slot_count(&self) -> usize {
        self.pool.free_slots()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.pool.occupied_count()
    }

    /// Returns `true` when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks every slot free.
    pub fn reset(&mut self) {
        self.pool.clear();
    }

    /// All occupied handles in pool order.
    pub fn compact(&self) -> Vec<EdgeId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Iterates occupied edges in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.pool
            .occupied()
            .map(|(idx, edge)| (EdgeId(idx as u32), edge))
    }
}
