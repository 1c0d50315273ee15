//! Error taxonomy for hashing runs.
//!
//! Only [`HashError::UnsupportedAlgorithm`] is fatal (it is raised before the walk starts).
//! Every other variant is attached to a single path in a [`FileResult`](crate::FileResult)
//! and the run keeps going.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Identifier is not in the registry.
    #[error("unsupported hash type: {0}")]
    UnsupportedAlgorithm(String),

    /// The walk could not read a directory or entry. The kind tells a permission denial
    /// (`PermissionDenied`) from a missing path (`NotFound`); a link loop comes back as `Other`
    /// wrapping the `walkdir::Error`.
    #[error("traversal error: {0}")]
    Traversal(#[source] io::Error),

    #[error("could not open file: {0}")]
    Open(#[source] io::Error),

    #[error("could not read file: {0}")]
    Read(#[source] io::Error),

    /// Rename target already occupied; the original file was left in place.
    #[error("could not rename to {}: file already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("could not rename to {}: {source}", .target.display())]
    Rename {
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Job was dropped (or its read abandoned) after a cancel request.
    #[error("cancelled")]
    Cancelled,

    #[error("worker panicked while hashing: {0}")]
    WorkerPanic(String),
}

impl HashError {
    /// True for errors that stop the run before any traversal happens.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HashError::UnsupportedAlgorithm(_))
    }
}
