#![forbid(unsafe_code)]

//! Reporting utilities over an in-memory [`crate::storage::Graph`].
//!
//! This module provides occupancy statistics and an integrity scan that
//! re-checks the storage invariants from the outside.

mod stats;
mod verify;

/// Capacity and occupancy reporting.
///
/// Summarizes both pools and, when a counting metrics sink is installed,
/// the operation counters.
pub use stats::{stats, PoolStats, StatsReport};

/// Graph integrity verification.
///
/// Verifies label, uniqueness and referential invariants and reports any
/// issues found.
pub use verify::{verify, VerifyCounts, VerifyFinding, VerifyReport, VerifySeverity};
