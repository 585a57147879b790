use crate::error::TreeError;

/// Result of a tree-level check or traversal
pub type TreeResult<T> = Result<T, TreeError>;
