//! Durable key-value persistence for session scalars.
//!
//! DESIGN
//! ======
//! Behaves like a platform preferences file: string / bool / long values by
//! key, mutated through batched [`Edit`]s. Each `apply` is atomic for its
//! batch; separate batches are not transactional, so a crash between two
//! edits can leave a partially updated session.

pub mod file;
pub mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use file::FileStore;
pub use memory::MemoryStore;

// =============================================================================
// VALUES
// =============================================================================

/// A scalar held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Str(String),
    Bool(bool),
    Long(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// EDIT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditOp {
    Put(String, StoredValue),
    Remove(String),
}

/// A batch of mutations applied as one unit.
///
/// When `clear` is set the store is emptied before the puts and removes run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edit {
    clear: bool,
    ops: Vec<EditOp>,
}

impl Edit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn put_string(mut self, key: &str, value: impl Into<String>) -> Self {
        self.ops.push(EditOp::Put(key.to_owned(), StoredValue::Str(value.into())));
        self
    }

    #[must_use]
    pub fn put_bool(mut self, key: &str, value: bool) -> Self {
        self.ops.push(EditOp::Put(key.to_owned(), StoredValue::Bool(value)));
        self
    }

    #[must_use]
    pub fn put_long(mut self, key: &str, value: i64) -> Self {
        self.ops.push(EditOp::Put(key.to_owned(), StoredValue::Long(value)));
        self
    }

    #[must_use]
    pub fn remove(mut self, key: &str) -> Self {
        self.ops.push(EditOp::Remove(key.to_owned()));
        self
    }

    #[must_use]
    pub fn clear(mut self) -> Self {
        self.clear = true;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.clear && self.ops.is_empty()
    }

    pub(crate) fn apply_to(&self, entries: &mut BTreeMap<String, StoredValue>) {
        if self.clear {
            entries.clear();
        }
        for op in &self.ops {
            match op {
                EditOp::Put(key, value) => {
                    entries.insert(key.clone(), value.clone());
                }
                EditOp::Remove(key) => {
                    entries.remove(key);
                }
            }
        }
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Durable scalar storage keyed by string.
///
/// Typed getters return `None` both for a missing key and for a value of a
/// different type.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<StoredValue>;

    /// Apply a batch of mutations.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the batch could not be made durable; the
    /// store is left unchanged in that case.
    fn apply(&self, edit: Edit) -> Result<(), StoreError>;

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(StoredValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(StoredValue::Bool(value)) => Some(value),
            _ => None,
        }
    }

    fn get_long(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(StoredValue::Long(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
