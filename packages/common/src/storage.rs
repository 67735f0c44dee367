use crate::{StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Persistence mirror for a single named blob.
///
/// A save either replaces the whole blob or leaves the previous one in place.
pub trait Storage: Send {
    /// Read the blob, `None` if nothing has been saved yet
    fn load(&self) -> StorageResult<Option<String>>;

    /// Replace the blob
    fn save(&self, blob: &str) -> StorageResult<()>;
}

/// Deserialize the stored blob
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage) -> StorageResult<Option<T>> {
    match storage.load()? {
        Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
        None => Ok(None),
    }
}

/// Serialize and store a value
pub fn save_json<T: Serialize>(storage: &dyn Storage, value: &T) -> StorageResult<()> {
    let blob = serde_json::to_string(value)?;
    storage.save(&blob)
}

/// Blob stored in a file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, blob: &str) -> StorageResult<()> {
        // Write next to the target, then rename over it
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, blob).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), bytes = blob.len(), "Persisted state");
        Ok(())
    }
}

/// In-memory blob for tests and embedding.
///
/// Clones share the same blob, so a test can keep a handle while the store
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(blob.into()))),
        }
    }

    /// Current blob contents
    pub fn contents(&self) -> Option<String> {
        self.blob.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, blob: &str) -> StorageResult<()> {
        *self.blob.lock().unwrap_or_else(|e| e.into_inner()) = Some(blob.to_string());
        Ok(())
    }
}
