//! Backing file access with a single-slot cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};

/// Owns the backing JSON file and the last parsed copy of it.
///
/// The cache is filled on the first successful read and replaced on every
/// successful write. A failed read leaves it empty, so a corrupt file keeps
/// failing until it is fixed or overwritten through `write`.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    cache: RwLock<Option<Arc<Value>>>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocumentStore {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached document, reading and parsing the file on a miss.
    pub async fn get(&self) -> StoreResult<Arc<Value>> {
        if let Some(doc) = self.cache.read().await.as_ref() {
            tracing::debug!("Document cache hit");
            return Ok(Arc::clone(doc));
        }

        let mut cache = self.cache.write().await;
        // Another request may have filled it while we waited for the lock
        if let Some(doc) = cache.as_ref() {
            return Ok(Arc::clone(doc));
        }

        tracing::debug!(path = %self.path.display(), "Document cache miss, reading file");
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(StoreError::Read)?;
        let doc = Arc::new(serde_json::from_str::<Value>(&content)?);

        *cache = Some(Arc::clone(&doc));
        Ok(doc)
    }

    /// Overwrite the backing file with `doc` and make it the cached document.
    pub async fn write(&self, doc: Value) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&doc)
            .map_err(|e| StoreError::Write(std::io::Error::other(e)))?;

        let mut cache = self.cache.write().await;

        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(StoreError::Write)?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::Write(e));
        }

        *cache = Some(Arc::new(doc));
        tracing::info!(path = %self.path.display(), "Document updated");
        Ok(())
    }

    /// Drop the cached document so the next `get` reads the file again.
    pub async fn invalidate(&self) {
        self.cache.write().await.take();
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
