use crate::domain::ports::KeyValueStore;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::validate_store_key;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::NamedTempFile;

/// Stores each key as `<base_path>/<key>.json`.
///
/// Writes go to a uniquely named temp file in the same directory and are
/// renamed into place, so a reader sees either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_store_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.path_for(key)?;
        match fs::read(&full_path) {
            // Non-UTF-8 bytes are passed on lossily and rejected by the decoder.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key)?;
        fs::create_dir_all(&self.base_path)?;

        // Each write gets its own temp file so concurrent writers never publish
        // each other's half-written bytes.
        let mut temp_file = NamedTempFile::new_in(&self.base_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&full_path).map_err(|e| e.error)?;
        tracing::debug!("Wrote {} bytes to {}", value.len(), full_path.display());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let full_path = self.path_for(key)?;
        match fs::remove_file(&full_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|e| CartError::StoreError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock(key)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}
