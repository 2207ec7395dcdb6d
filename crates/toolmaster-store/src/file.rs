//! File-backed store that survives process restarts.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{KvStore, StoreError};

/// Store that keeps every key in a single JSON document on disk.
///
/// This plays the role of the browser's per-origin storage for native
/// sessions: each CLI invocation is a "page load" over the same file.
/// Every write re-reads the document, so two processes sharing a file race
/// with last-write-wins semantics, as two browser tabs would.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    /// Read the document for a write. A corrupt document is replaced rather
    /// than blocking all future writes.
    fn read_document_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_document() {
            Err(StoreError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "discarding corrupt store file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_document(&self, doc: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_document()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut doc = self.read_document_for_write()?;
        doc.insert(key.to_string(), value.to_string());
        self.write_document(&doc)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut doc = self.read_document_for_write()?;
        if doc.remove(key).is_some() {
            self.write_document(&doc)?;
        }
        Ok(())
    }
}
