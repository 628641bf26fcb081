//! Scoped Store — flat, durable key/value string storage.
//!
//! Access is synchronous and every call is atomic. The caller owns encoding;
//! see `records` for the typed, versioned codec layered on top.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

mod file;
pub mod keys;
pub mod records;

pub use file::{FileStore, StoreError};

pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Removes every key the application owns.
    fn clear(&self) {
        for key in keys::ALL {
            self.remove(key);
        }
    }
}

/// In-process store. Lives as long as the session that owns it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}
