//! Fixed-capacity directed graph engine with an interactive command front end.
//!
//! The [`storage`] module holds the engine: vertex and edge slot pools with
//! free-slot reuse, label normalization, and lookup/compaction primitives.
//! [`cli`] turns command lines into engine calls, and [`admin`] reports on
//! pool usage and integrity.

#![warn(missing_docs)]

pub mod admin;
pub mod cli;
pub mod storage;
pub mod types;

pub use storage::{Graph, GraphOptions};
pub use types::{EdgeId, GraphError, PoolKind, Result, VertexId};
