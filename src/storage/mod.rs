//! Durable key-value storage for client-held session artifacts.
//!
//! ARCHITECTURE
//! ============
//! `Storage` is the seam between the token store and whatever keeps the
//! bytes: an in-process map for tests and short-lived clients, or a JSON file
//! on disk standing in for browser local storage. Failure semantics belong to
//! the backend; `TokenStore` passes its errors through untouched.

pub mod file;
pub mod memory;
pub mod token;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use token::TokenStore;

/// Errors produced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted contents are not a valid key-value document.
    #[error("storage contents corrupt: {0}")]
    Corrupt(String),

    /// The backend's lock was poisoned by a panicking writer.
    #[error("storage unavailable: lock poisoned")]
    Poisoned,
}

/// String-keyed get/set/remove, mirroring the browser storage API.
pub trait Storage: Send + Sync {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
