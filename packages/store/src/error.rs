//! Error types for store operations.

use nestdb_backend::BackendError;
use nestdb_core::PathError;

/// Errors surfaced by [`crate::DocumentStore`] operations.
///
/// Validation-level failures (`InvalidArgument`, `NotFound`, `TypeMismatch`)
/// are recoverable: the operation had no effect and the store remains
/// usable. The remaining kinds are fatal for the call that produced them.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid or missing options at construction or connect time.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The backend connection attempt failed.
    #[error("failed to connect to the backend: {source}")]
    Connection {
        #[source]
        source: BackendError,
    },

    /// An operation was invoked before a connection was established.
    #[error("the database is not connected")]
    NotConnected,

    /// A required key or value argument was missing or malformed.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The addressed document does not exist.
    #[error("the document '{name}' does not exist")]
    NotFound { name: String },

    /// The stored value at a path is incompatible with the operation.
    #[error("the value at '{path}' is not {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },

    /// Transport or storage failure from the backend.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl Error {
    /// Validation-level failures: the call was rejected but the store and
    /// the stored data are untouched.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument { .. } | Error::NotFound { .. } | Error::TypeMismatch { .. }
        )
    }
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Error::InvalidArgument {
            message: err.to_string(),
        }
    }
}
