use std::collections::HashMap;

use serde::Serialize;

use crate::storage::{is_normalized, Graph};
use crate::types::{EdgeId, VertexId};

const MAX_FINDINGS: usize = 32;

/// Indicates the severity level of a verification finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifySeverity {
    /// Informational message about the verification process.
    Info,
    /// Critical issue indicating a broken invariant.
    Error,
}

/// Represents a single issue discovered during verification.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyFinding {
    /// The severity level of this finding.
    pub severity: VerifySeverity,
    /// Human-readable description of the issue.
    pub message: String,
}

impl VerifyFinding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: VerifySeverity::Error,
            message: message.into(),
        }
    }
}

/// Statistics collected during the verification process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VerifyCounts {
    /// Occupied vertex slots scanned.
    pub vertices_found: u64,
    /// Occupied edge slots scanned.
    pub edges_found: u64,
    /// Edge ends pointing at a free or out-of-range vertex slot.
    pub dangling_references: u64,
    /// Occupied vertices sharing a label with an earlier vertex.
    pub duplicate_labels: u64,
    /// Occupied edges repeating an earlier ordered pair.
    pub duplicate_pairs: u64,
    /// Stored labels that are not in normalized form.
    pub invalid_labels: u64,
}

/// Complete report of a verification pass.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    /// Whether verification passed without finding any issues.
    pub success: bool,
    /// List of issues discovered during verification, capped at 32 entries.
    pub findings: Vec<VerifyFinding>,
    /// Statistics about the pools examined.
    pub counts: VerifyCounts,
}

/// Verifies the storage invariants of `graph`.
///
/// Checks, in pool order:
///
/// - every stored label is normalized;
/// - no two occupied vertices share a label;
/// - no two occupied edges share an ordered pair;
/// - every occupied edge references two occupied vertices.
pub fn verify(graph: &Graph) -> VerifyReport {
    let mut findings = Findings::default();
    let mut counts = VerifyCounts::default();

    let mut labels: HashMap<&str, VertexId> = HashMap::new();
    for (id, vertex) in graph.vertices().iter() {
        counts.vertices_found += 1;
        if !is_normalized(&vertex.label) {
            counts.invalid_labels += 1;
            findings.error(format!(
                "vertex {id} has non-normalized label {:?}",
                vertex.label.as_str()
            ));
        }
        if let Some(first) = labels.insert(vertex.label.as_str(), id) {
            counts.duplicate_labels += 1;
            findings.error(format!(
                "vertices {first} and {id} share label {}",
                vertex.label
            ));
        }
    }

    let mut pairs: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();
    for (id, edge) in graph.edges().iter() {
        counts.edges_found += 1;
        for (end, vertex) in [("origin", edge.origin), ("endpoint", edge.endpoint)] {
            if !graph.vertices().contains(vertex) {
                counts.dangling_references += 1;
                findings.error(format!(
                    "edge {id} {end} {vertex} references a free vertex slot"
                ));
            }
        }
        if let Some(first) = pairs.insert((edge.origin, edge.endpoint), id) {
            counts.duplicate_pairs += 1;
            findings.error(format!(
                "edges {first} and {id} both connect {} -> {}",
                edge.origin, edge.endpoint
            ));
        }
    }

    let Findings { mut list, dropped } = findings;
    if dropped > 0 {
        list.push(VerifyFinding {
            severity: VerifySeverity::Info,
            message: format!("{dropped} more findings omitted"),
        });
    }

    let success = !list
        .iter()
        .any(|finding| finding.severity == VerifySeverity::Error);
    VerifyReport {
        success,
        findings: list,
        counts,
    }
}

#[derive(Default)]
struct Findings {
    list: Vec<VerifyFinding>,
    dropped: usize,
}

impl Findings {
    fn error(&mut self, message: impl Into<String>) {
        if self.list.len() < MAX_FINDINGS {
            self.list.push(VerifyFinding::error(message));
        } else {
            self.dropped += 1;
        }
    }
}
