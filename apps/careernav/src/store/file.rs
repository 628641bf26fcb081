use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use super::Store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable store backed by one JSON file holding the whole key/value map.
///
/// All operations degrade gracefully: a missing or corrupt file opens as an
/// empty store, and a failed write is logged while the in-memory view keeps
/// the new value.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load(&path) {
            Ok(entries) => {
                debug!(path = %path.display(), keys = entries.len(), "store opened");
                entries
            }
            Err(e) => {
                warn!(error = %e, "starting with an empty store");
                HashMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutates the map and rewrites the file while holding the lock, so no
    /// reader ever observes a half-applied write.
    fn mutate(&self, apply: impl FnOnce(&mut HashMap<String, String>)) {
        let mut entries = self.entries();
        apply(&mut entries);
        if let Err(e) = persist(&self.path, &entries) {
            warn!(error = %e, "store write failed; keeping in-memory value");
        }
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.mutate(|m| {
            m.insert(key.to_string(), value.to_string());
        });
    }

    fn remove(&self, key: &str) {
        self.mutate(|m| {
            m.remove(key);
        });
    }
}

fn load(path: &Path) -> Result<HashMap<String, String>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(serde_json::from_str(&text)?)
}

/// Writes to a sibling temp file and renames it over the target.
fn persist(path: &Path, entries: &HashMap<String, String>) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
