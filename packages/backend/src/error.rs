//! Error types for the backend layer.
//!
//! Errors here are transport and storage focused. Semantic errors (invalid
//! paths, type mismatches) belong to the store layer.

use std::path::PathBuf;

/// Errors from a persistence backend.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    /// Generic I/O failure while reading or writing a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage root passed to a disk backend is unusable.
    #[error("invalid storage root '{path}': {message}")]
    InvalidRoot { path: PathBuf, message: String },

    /// The document id cannot be mapped to a storage location.
    #[error("invalid document id '{id}': {message}")]
    InvalidDocumentId { id: String, message: String },

    /// An in-process lock was poisoned by a panicking writer.
    #[error("backend lock poisoned")]
    LockPoisoned,
}
