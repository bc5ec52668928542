//! The backend trait: everything the store layer needs from persistence.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{BackendError, Document};

/// A persistence backend for named documents.
///
/// The store layer depends on exactly four operations: fetch a document by
/// id, find-or-create one, replace a document's data map, and measure a
/// round trip. Everything else (connection pooling, transport, on-disk
/// layout) is an implementation concern.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Fetch the document with the given id.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No document with this id exists (not an error).
    /// * `Ok(Some(doc))` - The stored document.
    /// * `Err(BackendError)` - A transport or storage error occurred.
    async fn fetch(&self, id: &str) -> Result<Option<Document>, BackendError>;

    /// Find-or-create: return the existing document with this id, or create
    /// an empty one and return it. Idempotent.
    async fn create(&self, id: &str) -> Result<Document, BackendError>;

    /// Replace the data map of the document with the given id.
    ///
    /// Creates the document if it does not exist. The whole map is written;
    /// partial updates are composed by the store layer before calling this.
    async fn put(&self, id: &str, data: Map<String, Value>) -> Result<(), BackendError>;

    /// Round-trip latency of a minimal backend operation.
    async fn ping(&self) -> Result<Duration, BackendError>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Box<T> {
    async fn fetch(&self, id: &str) -> Result<Option<Document>, BackendError> {
        self.as_ref().fetch(id).await
    }

    async fn create(&self, id: &str) -> Result<Document, BackendError> {
        self.as_ref().create(id).await
    }

    async fn put(&self, id: &str, data: Map<String, Value>) -> Result<(), BackendError> {
        self.as_ref().put(id, data).await
    }

    async fn ping(&self) -> Result<Duration, BackendError> {
        self.as_ref().ping().await
    }
}
