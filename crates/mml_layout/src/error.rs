//! Error types for the layout crate

use thiserror::Error;

/// Errors that can occur during bounding-box computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A wrapper required a child slot the tree does not provide.
    /// Trees built by the tree builder cannot trigger this; hand-built
    /// trees can.
    #[error("{kind} is missing required child {index}")]
    MissingChild { kind: &'static str, index: usize },
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
