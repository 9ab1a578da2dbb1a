//! Error types for the merge pipeline.

use fieldpatch_types::PathParseError;
use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while applying a dirty-field set.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A dirty-field entry is not valid path notation.
    #[error("invalid field path '{path}': {source}")]
    InvalidPath {
        path: String,
        source: PathParseError,
    },

    /// The path names a field the entity does not have, or traverses
    /// through a value that is not a container.
    #[error("the field '{path}' does not apply to this resource")]
    FieldNotApplicable { path: String },

    /// The path addresses a collection element past the end.
    #[error("index {index} is out of bounds for '{path}' (length {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// The merged state could not be carried back into the entity type.
    #[error("failed to rebuild entity from merged state: {0}")]
    Rebuild(#[from] serde_json::Error),
}
