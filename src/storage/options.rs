use std::fmt;
use std::sync::Arc;

use super::metrics::StorageMetrics;
use crate::types::{GraphError, Result};

/// Default number of vertex slots.
pub const DEFAULT_VERTEX_CAPACITY: usize = 128;
/// Default number of edge slots.
pub const DEFAULT_EDGE_CAPACITY: usize = 1024;
/// Largest slot count accepted for either pool.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Configuration options supplied when constructing a [`super::Graph`].
///
/// Capacities are fixed for the lifetime of the graph.
#[derive(Clone)]
pub struct GraphOptions {
    /// Number of vertex slots.
    pub vertex_capacity: usize,
    /// Number of edge slots.
    pub edge_capacity: usize,
    /// Optional metrics collection implementation
    pub metrics: Option<Arc<dyn StorageMetrics>>,
}

impl GraphOptions {
    /// Creates options with the default capacities and no metrics.
    pub fn new() -> Self {
        Self {
            vertex_capacity: DEFAULT_VERTEX_CAPACITY,
            edge_capacity: DEFAULT_EDGE_CAPACITY,
            metrics: None,
        }
    }

    /// Sets the number of vertex slots.
    pub fn vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    /// Sets the number of edge slots.
    pub fn edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }

    /// Sets the metrics collection implementation.
    pub fn metrics(mut self, metrics: Arc<dyn StorageMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_capacity("vertex", self.vertex_capacity)?;
        check_capacity("edge", self.edge_capacity)
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphOptions")
            .field("vertex_capacity", &self.vertex_capacity)
            .field("edge_capacity", &self.edge_capacity)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

fn check_capacity(pool: &str, capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(GraphError::InvalidArgument(format!(
            "{pool} capacity must be at least 1"
        )));
    }
    if capacity > MAX_CAPACITY {
        return Err(GraphError::InvalidArgument(format!(
            "{pool} capacity {capacity} exceeds {MAX_CAPACITY}"
        )));
    }
    Ok(())
}
