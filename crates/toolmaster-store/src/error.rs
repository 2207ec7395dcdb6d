//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to the key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage is disabled or cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store quota.
    #[error("Quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// Underlying file operation failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid store document.
    #[error("Store file is corrupt: {0}")]
    Corrupt(String),

    /// A stored value could not be decoded into the requested type.
    #[error("Malformed value under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the error means the store itself could not be used, as opposed
    /// to a single value being unreadable.
    pub fn is_storage_failure(&self) -> bool {
        !matches!(self, StoreError::Malformed { .. } | StoreError::Serialize(_))
    }
}
