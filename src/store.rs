//! Post persistence over a synchronous key-value slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whole post list lives as one JSON array under one key. There is no
//! in-memory copy: every handler loads, mutates and saves the full sequence,
//! so memory and storage cannot drift within a tab. Nothing guards against a
//! second tab writing the same key; the last write wins.
//!
//! `load` never fails. Text that is not a JSON array is reported on the log
//! and treated as an empty list, which silently drops the stored posts on the
//! next save. Malformed entries inside a valid array are kept as blank posts.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::post::Post;

/// Errors raised by a storage backend or while encoding posts for it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("post encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal synchronous string key-value store, shaped after `window.localStorage`.
pub trait KeyValueStorage {
    /// Read the value at `key`, `Ok(None)` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value at `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local storage backend for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage` backend.
#[cfg(feature = "hydrate")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "hydrate")]
impl LocalStorage {
    /// Bind to the current window's local storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when there is no window or the
    /// browser denies storage access (private mode, disabled cookies).
    pub fn from_window() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) | Err(_) => Err(StoreError::Unavailable),
        }
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|err| StoreError::Read(format!("{err:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|err| StoreError::Write(format!("{err:?}")))
    }
}

/// The post list persisted as JSON under a single key.
pub struct PostStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStorage> PostStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the stored posts, newest first.
    ///
    /// An absent or empty value yields an empty list. A value that is not a
    /// JSON array is logged and also yields an empty list. Inside a valid
    /// array each entry is decoded on its own; see [`Post::from_json`].
    pub fn load(&self) -> Vec<Post> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::error!("failed to read stored posts at {:?}: {err}", self.key);
                return Vec::new();
            }
        };
        if raw.is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(entries) => entries.into_iter().map(Post::from_json).collect(),
            Err(err) => {
                log::error!("failed to parse stored posts at {:?}: {err}", self.key);
                Vec::new()
            }
        }
    }

    /// Serialize `posts` and replace the stored value.
    ///
    /// # Errors
    ///
    /// Returns the backend's write error (e.g. quota exceeded) or an encoding error.
    pub fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(posts)?;
        self.backend.set_item(&self.key, &raw)
    }

    /// The stored JSON text, if any.
    ///
    /// # Errors
    ///
    /// Returns the backend's read error.
    pub fn raw(&self) -> Result<Option<String>, StoreError> {
        self.backend.get_item(&self.key)
    }
}
