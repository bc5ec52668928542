//! nestdb: path-addressable key-value storage over a document backend.
//!
//! Each logical database is a single persisted document holding an
//! arbitrarily nested map. Callers address values inside it with slash-,
//! colon-, or dot-separated keys (`"a/b:c"` → `a.b.c`); the store normalizes
//! the key, loads a snapshot of the document, applies the structural
//! operation in memory, and persists the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use nestdb_store::{Config, DocumentStore};
//! use serde_json::json;
//!
//! let store = DocumentStore::open(Config::new("mem://")).await?;
//!
//! store.set("users/alice:age", json!(30)).await?;
//! store.update("users.alice", json!({"city": "NYC"})).await?;
//!
//! assert_eq!(store.get("users.alice.age").await?, Some(json!(30)));
//! assert!(store.has("users.alice.city").await?);
//! ```

mod config;
mod connect;
mod error;
mod store;

pub use config::Config;
pub use error::Error;
pub use store::{Doc, DocumentStore, DEFAULT_DOCUMENT};

// Re-export the layers below for convenience
pub use nestdb_backend::{Backend, BackendError, Document, JsonFileBackend, MemoryBackend};
pub use nestdb_core::{Map, Path, PathError, Value};
