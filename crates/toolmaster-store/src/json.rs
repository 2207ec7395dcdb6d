//! Typed JSON access on top of a [`KvStore`].

use serde::{de::DeserializeOwned, Serialize};

use crate::{KvStore, StoreError};

/// Type-safe wrapper that serializes values to JSON strings.
///
/// # Example
///
/// ```rust
/// use toolmaster_store::{JsonStore, MemoryStore};
///
/// let store = JsonStore::new(MemoryStore::new());
/// store.set("greeting", &vec!["hello".to_string()]).unwrap();
/// let value: Option<Vec<String>> = store.get("greeting").unwrap();
/// assert_eq!(value, Some(vec!["hello".to_string()]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonStore<S> {
    inner: S,
}

impl<S: KvStore> JsonStore<S> {
    /// Wrap a raw string store.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Get a value.
    ///
    /// Returns `Ok(None)` if the key was never written and
    /// [`StoreError::Malformed`] if the stored text is not a valid `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.inner.load(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.inner.save(key, &raw)
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }

    /// Access the underlying string store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        count: i64,
    }

    #[test]
    fn test_typed_set_get() {
        let store = JsonStore::new(MemoryStore::new());
        let entry = Entry {
            id: "P1".to_string(),
            count: 2,
        };
        store.set("entry", &entry).unwrap();
        assert_eq!(store.get::<Entry>("entry").unwrap(), Some(entry));
        assert_eq!(
            store.inner().load("entry").unwrap().as_deref(),
            Some(r#"{"id":"P1","count":2}"#)
        );
    }

    #[test]
    fn test_malformed_is_distinct_from_absent() {
        let store = JsonStore::new(MemoryStore::new());
        store.inner().save("entry", "{broken").unwrap();

        let err = store.get::<Entry>("entry").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { ref key, .. } if key == "entry"));
        assert!(!err.is_storage_failure());

        assert_eq!(store.get::<Entry>("other").unwrap(), None);
    }
}
