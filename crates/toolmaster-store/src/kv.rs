//! The key-value string store abstraction and its in-memory backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::StoreError;

/// A durable, per-origin key-value string store.
///
/// Mirrors the browser `localStorage` contract: values are opaque strings,
/// writes overwrite unconditionally and there is no versioning. Methods take
/// `&self` because the store is shared by every consumer on a page (cart,
/// order history) the way a single origin's storage is.
pub trait KvStore {
    /// Read the value stored under `key`, or `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key` (last write wins).
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Rc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process store, used by tests and by sessions without persistence.
///
/// Can be switched off to behave like disabled storage, made read-only to
/// behave like storage that rejects writes, and given a byte quota to behave
/// like a full one.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    available: Cell<bool>,
    read_only: Cell<bool>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, available store with no quota.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            available: Cell::new(true),
            read_only: Cell::new(false),
            quota: None,
        }
    }

    /// Limit the total size in bytes of all stored values.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Enable or disable the store. A disabled store fails every operation.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Reject saves and removes while still serving loads.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("storage is disabled".to_string()))
        }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        self.check_available()?;
        if self.read_only.get() {
            Err(StoreError::Unavailable("storage is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;

        if let Some(quota) = self.quota {
            let others: usize = self
                .entries
                .borrow()
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
