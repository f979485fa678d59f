//! Access token persistence under the configured auth key.

use super::{Storage, StorageError};
use crate::config::SessionConfig;

/// Keeps a single opaque token in a [`Storage`] backend. The token is never
/// inspected; storage errors propagate unchanged.
#[derive(Debug)]
pub struct TokenStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> TokenStore<S> {
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// Build a store keyed by `config.auth_key_name`.
    #[must_use]
    pub fn from_config(storage: S, config: &SessionConfig) -> Self {
        Self::new(storage, config.auth_key_name.clone())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, token)
    }

    /// Read the current token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn get_token(&self) -> Result<Option<String>, StorageError> {
        self.storage.get_item(&self.key)
    }

    /// Forget the token. A store with no token is left as is.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn remove_token(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
