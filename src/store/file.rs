//! JSON-file store: one file per namespace under a data directory.
//!
//! TRADE-OFFS
//! ==========
//! The whole namespace is rewritten on every edit (temp file, then rename).
//! Session state is a handful of keys, so this buys crash-safe batches at a
//! negligible cost. A corrupt file is logged and treated as empty rather than
//! blocking startup.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use super::{Edit, KeyValueStore, StoreError, StoredValue};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, StoredValue>>,
}

impl FileStore {
    /// Open (or create) `<dir>/<namespace>.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file exists
    /// but cannot be read.
    pub fn open(dir: impl AsRef<Path>, namespace: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{namespace}.json"));
        let entries = load_entries(&path)?;
        debug!(path = %path.display(), keys = entries.len(), "store opened");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn apply(&self, edit: Edit) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        edit.apply_to(&mut next);
        write_entries(&self.path, &next)?;
        *entries = next;
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, StoredValue>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
                Ok(BTreeMap::new())
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, StoredValue>) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, raw)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
