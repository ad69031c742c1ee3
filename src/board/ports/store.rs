//! Store port for loading and saving whole board documents.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Persistence contract for the board exchange document.
///
/// Stores deal in untrusted JSON values: whatever `load` returns is
/// validated before it replaces a live board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Loads the last saved document.
    ///
    /// Returns `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the document cannot be read or
    /// decoded.
    async fn load(&self) -> BoardStoreResult<Option<Value>>;

    /// Replaces the saved document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the document cannot be encoded or
    /// written.
    async fn save(&self, document: &Value) -> BoardStoreResult<()>;
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// The stored bytes are not a JSON document, or encoding failed.
    #[error("document encoding error: {0}")]
    Encoding(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<serde_json::Error> for BoardStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(Arc::new(err))
    }
}
