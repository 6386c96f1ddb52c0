use serde::Serialize;
use tracing::debug;

use super::label::{normalize_label, Label};
use super::pool::SlotPool;
use crate::types::{GraphError, PoolKind, Result, VertexId};

/// Contents of an occupied vertex slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vertex {
    /// Normalized label, unique among occupied vertices.
    pub label: Label,
}

/// Fixed-capacity pool of vertices keyed by normalized label.
#[derive(Debug, Clone)]
pub struct VertexStore {
    pool: SlotPool<Vertex>,
}

impl VertexStore {
    /// Creates a store with `capacity` free slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: SlotPool::with_capacity(capacity),
        }
    }

    /// Creates a vertex labelled with the normalized form of `raw_label`.
    ///
    /// Nothing is mutated when this returns an error.
    pub fn create(&mut self, raw_label: &str) -> Result<VertexId> {
        let label = normalize_label(raw_label).map_err(|source| GraphError::InvalidLabel {
            label: raw_label.to_string(),
            source,
        })?;
        if self.find_normalized(&label).is_some() {
            return Err(GraphError::DuplicateLabel {
                label: label.to_string(),
            });
        }
        let idx = self
            .pool
            .allocate(Vertex {
                label: label.clone(),
            })
            .ok_or(GraphError::PoolExhausted {
                pool: PoolKind::Vertex,
                capacity: self.pool.capacity(),
            })?;
        let id = VertexId(idx as u32);
        debug!(vertex = %id, label = %label, "graph.vertex.created");
        Ok(id)
    }

    /// Frees the slot behind `id`.
    ///
    /// Callers must remove edges referencing the vertex first; see
    /// [`super::Graph::delete_vertex`].
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied slot.
    pub(crate) fn delete(&mut self, id: VertexId) -> Vertex {
        let vertex = self.pool.release(id.index());
        debug!(vertex = %id, label = %vertex.label, "graph.vertex.deleted");
        vertex
    }

    /// Resolves `raw_label` to an occupied vertex.
    ///
    /// A label that fails normalization can never match and yields `None`.
    pub fn find(&self, raw_label: &str) -> Option<VertexId> {
        let label = normalize_label(raw_label).ok()?;
        self.find_normalized(&label)
    }

    fn find_normalized(&self, label: &str) -> Option<VertexId> {
        self.pool
            .occupied()
            .find(|(_, vertex)| vertex.label.as_str() == label)
            .map(|(idx, _)| VertexId(idx as u32))
    }

    /// Returns the vertex behind `id` if the slot is occupied.
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.pool.get(id.index())
    }

    /// Returns the label of an occupied vertex.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not reference an occupied slot.
    pub fn label(&self, id: VertexId) -> &Label {
        match self.get(id) {
            Some(vertex) => &vertex.label,
            None => panic!("vertex handle {id} does not reference an occupied slot"),
        }
    }

    /// Returns `true` if `id` references an occupied slot.
    pub fn contains(&self, id: VertexId) -> bool {
        self.pool.is_occupied(id.index())
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
    pub fn compact(&self) -> Vec<VertexId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Iterates occupied vertices in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.pool
            .occupied()
            .map(|(idx, vertex)| (VertexId(idx as u32), vertex))
    }
}
