//! Disk-backed backend: one JSON file per document under a root directory.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Backend, BackendError, Document};

/// A [`Backend`] storing each document as `<root>/<id>.json`.
///
/// The file holds the serialized [`Document`] (`_id` plus `data`), written
/// whole on every put. Document ids become file names, so ids containing
/// path separators or `..` are rejected.
#[derive(Debug)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    /// Open an existing root directory.
    ///
    /// The root must exist, be a directory, and be writable.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let root = root.into();

        let attr = std::fs::metadata(&root).map_err(|error| BackendError::InvalidRoot {
            path: root.clone(),
            message: error.to_string(),
        })?;

        if !attr.is_dir() {
            return Err(BackendError::InvalidRoot {
                path: root,
                message: "root path must be a directory".to_string(),
            });
        }

        if attr.permissions().readonly() {
            return Err(BackendError::InvalidRoot {
                path: root,
                message: "root directory must be writable".to_string(),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(JsonFileBackend { root }),
            Err(error) => Err(BackendError::InvalidRoot {
                path: root,
                message: error.to_string(),
            }),
        }
    }

    /// Like [`JsonFileBackend::open`], but creates the root directory (and
    /// parents) if it is missing.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|error| BackendError::InvalidRoot {
            path: root.clone(),
            message: error.to_string(),
        })?;
        Self::open(root)
    }

    /// The canonicalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, id: &str) -> Result<PathBuf, BackendError> {
        if id.is_empty() {
            return Err(BackendError::InvalidDocumentId {
                id: id.to_string(),
                message: "id must not be empty".to_string(),
            });
        }
        if id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(BackendError::InvalidDocumentId {
                id: id.to_string(),
                message: "id must not contain path separators".to_string(),
            });
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl Backend for JsonFileBackend {
    async fn fetch(&self, id: &str) -> Result<Option<Document>, BackendError> {
        let file_path = self.document_path(id)?;
        debug!(path = %file_path.display(), "reading document file");

        let bytes = match tokio::fs::read(&file_path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let doc: Document = serde_json::from_slice(&bytes)?;
        Ok(Some(doc))
    }

    async fn create(&self, id: &str) -> Result<Document, BackendError> {
        if let Some(doc) = self.fetch(id).await? {
            return Ok(doc);
        }
        let doc = Document::new(id);
        let file_path = self.document_path(id)?;
        debug!(path = %file_path.display(), "creating document file");
        tokio::fs::write(&file_path, serde_json::to_vec_pretty(&doc)?).await?;
        Ok(doc)
    }

    async fn put(&self, id: &str, data: Map<String, Value>) -> Result<(), BackendError> {
        let file_path = self.document_path(id)?;
        debug!(path = %file_path.display(), "writing document file");
        let doc = Document {
            id: id.to_string(),
            data,
        };
        tokio::fs::write(&file_path, serde_json::to_vec_pretty(&doc)?).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<Duration, BackendError> {
        let start = Instant::now();
        tokio::fs::metadata(&self.root).await?;
        Ok(start.elapsed())
    }
}
