#![forbid(unsafe_code)]

//! Shared handle types and the crate-wide error enum.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::storage::LabelError;

/// Stable handle to a vertex slot.
///
/// A handle is the slot position in the vertex pool and remains valid only
/// while that slot stays occupied.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct VertexId(pub u32);

/// Stable handle to an edge slot.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct EdgeId(pub u32);

impl VertexId {
    /// Slot position in the vertex pool.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    /// Slot position in the edge pool.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Identifies which fixed-capacity pool an error refers to.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// The vertex pool.
    Vertex,
    /// The edge pool.
    Edge,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::Vertex => f.write_str("vertex"),
            PoolKind::Edge => f.write_str("edge"),
        }
    }
}

/// Recoverable failures reported by the storage engine.
///
/// Handle precondition violations are not represented here; they panic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The raw label failed normalization.
    #[error("invalid label \"{label}\": {source}")]
    InvalidLabel {
        /// Label as supplied by the caller.
        label: String,
        /// Why validation rejected it.
        source: LabelError,
    },
    /// An occupied vertex already carries this normalized label.
    #[error("vertex {label} already exists")]
    DuplicateLabel {
        /// Normalized label.
        label: String,
    },
    /// An occupied edge already connects this ordered pair.
    #[error("edge already exists ({edge}) with weight {weight}")]
    DuplicatePair {
        /// Handle of the existing edge.
        edge: EdgeId,
        /// Weight of the existing edge.
        weight: i32,
    },
    /// No free slot is left in the pool.
    #[error("{pool} pool exhausted ({capacity} slots in use)")]
    PoolExhausted {
        /// Pool that ran out of slots.
        pool: PoolKind,
        /// Fixed capacity of that pool.
        capacity: usize,
    },
    /// Lookup found no occupied match.
    #[error("{what} not found: {key}")]
    NotFound {
        /// Kind of entity that was looked up.
        what: &'static str,
        /// Lookup key as supplied.
        key: String,
    },
    /// Invalid configuration or argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Acknowledged but unimplemented feature.
    #[error("unsupported feature: {0}")]
    Unsupported(&'static str),
}

impl GraphError {
    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        GraphError::NotFound {
            what,
            key: key.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GraphError::InvalidLabel { .. } => "invalid_label",
            GraphError::DuplicateLabel { .. } => "duplicate_label",
            GraphError::DuplicatePair { .. } => "duplicate_pair",
            GraphError::PoolExhausted { .. } => "pool_exhausted",
            GraphError::NotFound { .. } => "not_found",
            GraphError::InvalidArgument(_) => "invalid_argument",
            GraphError::Unsupported(_) => "unsupported",
        }
    }
}

/// Result alias used throughout the storage engine.
pub type Result<T> = std::result::Result<T, GraphError>;
