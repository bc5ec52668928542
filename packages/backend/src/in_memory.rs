//! In-memory backend: documents live in a process-local map.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{Backend, BackendError, Document};

/// An in-memory [`Backend`].
///
/// Useful for tests and ephemeral databases; nothing survives the process.
/// Document maps are cloned on fetch, so callers always see a snapshot.
#[derive(Debug)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, Map<String, Value>>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Map<String, Value>>>, BackendError> {
        self.documents.lock().map_err(|_| BackendError::LockPoisoned)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch(&self, id: &str) -> Result<Option<Document>, BackendError> {
        let documents = self.lock()?;
        Ok(documents.get(id).map(|data| Document {
            id: id.to_string(),
            data: data.clone(),
        }))
    }

    async fn create(&self, id: &str) -> Result<Document, BackendError> {
        let mut documents = self.lock()?;
        let data = documents.entry(id.to_string()).or_default();
        Ok(Document {
            id: id.to_string(),
            data: data.clone(),
        })
    }

    async fn put(&self, id: &str, data: Map<String, Value>) -> Result<(), BackendError> {
        let mut documents = self.lock()?;
        documents.insert(id.to_string(), data);
        Ok(())
    }

    async fn ping(&self) -> Result<Duration, BackendError> {
        let start = Instant::now();
        let documents = self.lock()?;
        let _ = documents.len();
        Ok(start.elapsed())
    }
}
