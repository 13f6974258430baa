//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of tree invariants.
/// These are independent of CLI and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot add child: parent already has max_degree={max_degree} children")]
    DegreeExceeded { max_degree: usize },

    #[error("corrupt tree: {0}")]
    CorruptTree(String),

    #[error("heap conversion requires a binary tree, got max_degree={max_degree}")]
    NotBinary { max_degree: usize },

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
