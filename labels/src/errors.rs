//! Label error types
//!
//! Validation failures surfaced to callers. Unresolvable taxonomy tags are
//! not errors: the aggregator drops them.

use thiserror::Error;

/// Validation error raised by the label components
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("invalid verdict {value}: expected -1, 0 or 1")]
    InvalidVerdict { value: i64 },

    #[error("unknown HCD space: {name}")]
    UnknownSpace { name: String },

    #[error("unknown HCD subspace: {name}")]
    UnknownSubspace { name: String },

    #[error("subspace {subspace} does not belong to space {space}")]
    SubspaceOutsideSpace { space: String, subspace: String },

    #[error("activity group {activity:?} has no annotations")]
    EmptyGroup { activity: String },

    #[error("activity group {activity:?} declares {declared} annotations but carries {actual}")]
    GroupCountMismatch {
        activity: String,
        declared: usize,
        actual: usize,
    },
}

/// Result type for label operations
pub type Result<T> = std::result::Result<T, LabelError>;
