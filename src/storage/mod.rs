//! Graph storage engine.
//!
//! Two fixed-capacity slot pools (vertices and edges) with free-slot reuse,
//! label normalization, and the lookup/compaction primitives built on them.
//! Handles are pool indices; every occupied edge references two occupied
//! vertices.

mod edge;
mod graph;
mod label;
mod metrics;
mod options;
mod pool;
mod vertex;


/// Edge pool and its slot contents.
pub use edge::{Edge, EdgeStore};

/// Facade owning both pools.
pub use graph::{Graph, VertexRemoval};

/// Label validation and normalization.
pub use label::{is_normalized, normalize_label, Label, LabelError, MAX_LABEL_LEN};

/// Operation counters.
pub use metrics::{default_metrics, CounterMetrics, MetricsSnapshot, NoopMetrics, StorageMetrics};

/// Construction options.
pub use options::{GraphOptions, DEFAULT_EDGE_CAPACITY, DEFAULT_VERTEX_CAPACITY, MAX_CAPACITY};

pub use pool::SlotPool;

/// Vertex pool and its slot contents.
pub use vertex::{Vertex, VertexStore};
