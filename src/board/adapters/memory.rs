//! In-memory board store for tests and single-process embedding.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::board::ports::{BoardStore, BoardStoreError, BoardStoreResult};

/// Thread-safe in-memory holder of the last saved document.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    document: Arc<RwLock<Option<Value>>>,
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `document`.
    #[must_use]
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document))),
        }
    }
}

fn poisoned(err: &impl std::fmt::Display) -> BoardStoreError {
    BoardStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<Value>> {
        let document = self.document.read().map_err(|err| poisoned(&err))?;
        Ok(document.clone())
    }

    async fn save(&self, document: &Value) -> BoardStoreResult<()> {
        let mut slot = self.document.write().map_err(|err| poisoned(&err))?;
        *slot = Some(document.clone());
        Ok(())
    }
}
