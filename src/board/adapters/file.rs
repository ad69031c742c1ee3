//! JSON file board store scoped to a capability directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::Value;
use std::{io, sync::Arc};
use uuid::Uuid;

use crate::board::ports::{BoardStore, BoardStoreError, BoardStoreResult};

/// Hex digits of a v4 UUID used to tell concurrent staging files apart.
const STAGING_TOKEN_LEN: usize = 8;

/// Board store that keeps the document in a single JSON file.
///
/// All access goes through a [`Dir`] handle, so the store can only touch
/// files inside the directory it was opened with. File operations run on
/// the blocking thread pool. Saves write a uniquely named staging file and
/// rename it over the document.
#[derive(Debug, Clone)]
pub struct JsonFileBoardStore {
    dir: Arc<Dir>,
    file_name: Utf8PathBuf,
}

impl JsonFileBoardStore {
    /// Creates a store for `file_name` inside `dir`.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
        }
    }

    /// Opens the parent directory of `path` with ambient authority.
    ///
    /// A bare file name resolves against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] when `path` has no file name
    /// or its directory cannot be opened.
    pub fn open_ambient(path: &Utf8Path) -> BoardStoreResult<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            BoardStoreError::persistence(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{path}' does not name a file"),
            ))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(BoardStoreError::persistence)?;
        Ok(Self::new(dir, file_name))
    }

    /// Returns the document file name relative to the store directory.
    #[must_use]
    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardStoreResult<T>
    where
        F: FnOnce(&Dir, &Utf8Path) -> BoardStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || f(&dir, &file_name))
            .await
            .map_err(BoardStoreError::persistence)?
    }
}

/// Returns a staging name unique to one save, e.g. `board.json.1f3a9c2e.tmp`.
fn staging_name(file_name: &Utf8Path) -> Utf8PathBuf {
    let token = Uuid::new_v4().simple().to_string();
    let short = token.get(..STAGING_TOKEN_LEN).unwrap_or(&token);
    Utf8PathBuf::from(format!("{file_name}.{short}.tmp"))
}

fn write_atomically(dir: &Dir, file_name: &Utf8Path, text: &str) -> BoardStoreResult<()> {
    let staging = staging_name(file_name);
    dir.write(&staging, text)
        .map_err(BoardStoreError::persistence)?;
    dir.rename(&staging, dir, file_name).map_err(|err| {
        // The rename error takes precedence over a failed cleanup.
        let _cleanup = dir.remove_file(&staging);
        BoardStoreError::persistence(err)
    })
}

#[async_trait]
impl BoardStore for JsonFileBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<Value>> {
        self.run_blocking(|dir, file_name| match dir.read_to_string(file_name) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BoardStoreError::persistence(err)),
        })
        .await
    }

    async fn save(&self, document: &Value) -> BoardStoreResult<()> {
        let text = serde_json::to_string_pretty(document)?;
        self.run_blocking(move |dir, file_name| write_atomically(dir, file_name, &text))
            .await
    }
}
