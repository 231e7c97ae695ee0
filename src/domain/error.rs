//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree's structural rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Child operations were requested on a leaf. Informational: callers
    /// report it and carry on.
    #[error("{name} has no sub-units, operation not supported")]
    NotComposite { name: String },

    #[error("cycle detected: {child} is {parent} or one of its ancestors")]
    CycleDetected { parent: String, child: String },

    #[error("node does not belong to this tree")]
    UnknownNode,
}

impl DomainError {
    /// True for conditions that are reported rather than escalated.
    pub fn is_informational(&self) -> bool {
        matches!(self, DomainError::NotComposite { .. })
    }
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
