use thiserror::Error;

use super::keys::{StateKey, StateValue};

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("integrity check failed: {0}")]
    Integrity(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub(crate) fn type_mismatch(key: &StateKey, found: &StateValue) -> Self {
        Self::Integrity(format!(
            "key {:?} holds a {} value",
            key,
            found.kind_name()
        ))
    }
}
