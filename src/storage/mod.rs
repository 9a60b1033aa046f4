//! Persistent Store Adapter
//!
//! Whole-collection JSON blobs kept under a named key in a local key-value store. Reads
//! that fail for any reason fall back to a caller-supplied default, and failed writes are
//! logged and dropped: the stored copy is a cache of in-memory state, never the authority.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend or by (de)serialization of a stored value.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read from or written to.
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value was not valid JSON for the requested type.
    #[error("invalid stored value: {0}")]
    Json(#[from] serde_json::Error),

    /// The key cannot be used with this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A string key-value store, the shape of browser local storage.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// JSON load/save on top of a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct JsonStore<S> {
    backend: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    /// Wrap a backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consume the adapter, returning the backend.
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Load and parse the value under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails or the stored JSON does not parse.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        self.backend
            .get(key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if serialization or the backend write fails.
    pub fn try_save<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;

        self.backend.set(key, raw)
    }

    /// Load the value under `key`, or `default` if it is absent or unreadable.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "nothing stored, using default");
                default
            }
            Err(error) => {
                warn!(key, %error, "discarding unreadable stored value");
                default
            }
        }
    }

    /// Load the value under `key`, or `T::default()`.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load_or(key, T::default())
    }

    /// Store `value` under `key`, logging instead of failing.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(error) = self.try_save(key, value) {
            warn!(key, %error, "failed to persist value");
        }
    }
}
