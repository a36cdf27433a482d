//! Error types for the tree crate

use thiserror::Error;

/// Errors that can occur while constructing or validating a node tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// The input used a kind tag this engine does not know
    #[error("unknown node kind: {0}")]
    UnknownKind(String),

    /// A node's children violate its arity contract
    #[error("wrong number of children for {kind}: expected {expected}, found {found}")]
    WrongArity {
        kind: &'static str,
        expected: String,
        found: usize,
    },

    /// A structural constraint was violated (wrong child kind, misplaced flag, ...)
    #[error("structural error: {0}")]
    Structure(String),
}

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;
