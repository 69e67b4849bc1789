//! Error types for artnet analyses.

use thiserror::Error;

/// Errors surfaced by structural preconditions of the analyses.
///
/// Per-record and per-pair problems (an implausible year record, a missing
/// attribute) are not errors: they show up as [`RepairOutcome`] variants or
/// `None` scores so batch work can skip them and continue. Everything here is
/// fatal to the call that produced it.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// without breaking changes.
///
/// [`RepairOutcome`]: crate::similarity::years::RepairOutcome
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The graph kind is not supported by the algorithm (e.g. a multigraph).
    #[error("unsupported graph kind: {0}")]
    UnsupportedGraphKind(String),

    /// Two partitions being compared do not cover the same node set.
    #[error("partition mismatch: {0}")]
    PartitionMismatch(String),

    /// A partition lists a node in more than one community.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// A ratio would divide by zero (or by a non-positive scale) and has no
    /// meaningful fallback.
    #[error("undefined ratio: {0}")]
    UndefinedRatio(String),

    /// Rejected graph mutation (unknown node, self loop, non-finite weight).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}
