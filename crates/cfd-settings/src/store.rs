//! Persistence seam for the configuration document.
//!
//! The adapter performs no locking of its own beyond serializing
//! in-process writers; cross-process serialization over the document
//! file belongs to the deployment (a single daemon owns the file).

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::document::ConfigDocument;

/// Errors from reading or writing the configuration document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the document.
    #[error("Failed to read config document '{path}': {source}")]
    Read {
        /// Document path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the document.
    #[error("Failed to write config document '{path}': {source}")]
    Write {
        /// Document path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The document does not parse.
    #[error("Config document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Handle to the persisted configuration document.
///
/// Passed explicitly into every adapter (no ambient global state).
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Reads the whole document.
    async fn load(&self) -> Result<ConfigDocument, StoreError>;

    /// Writes the whole document (write-through, no batching).
    async fn save(&self, doc: &ConfigDocument) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    async fn load(&self) -> Result<ConfigDocument, StoreError> {
        (**self).load().await
    }

    async fn save(&self, doc: &ConfigDocument) -> Result<(), StoreError> {
        (**self).save(doc).await
    }
}

/// JSON document on disk, written atomically (temp file + rename).
///
/// A missing file loads as the default document; the first successful
/// mutation creates it.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store over the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl ConfigStore for FileStore {
    async fn load(&self) -> Result<ConfigDocument, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path_string(), "Config document absent, using defaults");
                return Ok(ConfigDocument::default());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path_string(),
                    source: e,
                })
            }
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, doc: &ConfigDocument) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("tmp");

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::Write {
                path: self.path_string(),
                source: e,
            })?;

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Write {
                path: self.path_string(),
                source: e,
            })?;

        tracing::debug!(path = %self.path_string(), "Config document persisted");
        Ok(())
    }
}

/// In-memory document store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    doc: RwLock<ConfigDocument>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a document.
    pub fn with_document(doc: ConfigDocument) -> Self {
        Self {
            doc: RwLock::new(doc),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self) -> Result<ConfigDocument, StoreError> {
        Ok(self.doc.read().await.clone())
    }

    async fn save(&self, doc: &ConfigDocument) -> Result<(), StoreError> {
        *self.doc.write().await = doc.clone();
        Ok(())
    }
}
