//! JSON-file storage backend.
//!
//! The whole store is one JSON object of string values. Every mutation
//! rewrites the file through a sibling temp file and a rename, so a crash
//! mid-write leaves either the old or the new document on disk.
//!
//! The write lock is per instance. Two `FileStorage` values opened on the
//! same path do not coordinate, so share one instance per file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Storage, StorageError};

type Document = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles made through this instance only.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Sibling of the store file with `.tmp` appended to the full file name,
    /// so it never equals the store path.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn save(&self, doc: &Document) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(doc).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate(&self, apply: impl FnOnce(&mut Document)) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut doc = self.load()?;
        apply(&mut doc);
        self.save(&doc)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|doc| {
            doc.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|doc| {
            doc.remove(key);
        })
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
