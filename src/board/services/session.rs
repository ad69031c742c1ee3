//! Service owning the live board and serialising access to it.

use crate::board::{
    document::{BoardDocument, parse_and_build, validate_and_build},
    domain::{
        Board, BoardError, ColumnDisposition, ColumnId, IdGenerator, NewTask, Task, TaskId,
        TaskPatch,
    },
    ports::{BoardStore, BoardStoreError},
};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The board rejected the operation; the live board is unchanged.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The document store failed.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
    /// The live board could not be encoded as a document.
    #[error("failed to encode board document: {0}")]
    Encoding(#[from] serde_json::Error),
    /// A previous caller panicked while holding the board lock.
    #[error("board state lock is poisoned")]
    StatePoisoned,
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Owner of the live board.
///
/// Every mutation takes the write lock for its whole duration, so callers
/// observe mutations one at a time. Imports are validated before the lock
/// is taken and then swap the board in a single assignment.
pub struct BoardService<S, G>
where
    S: BoardStore,
    G: IdGenerator,
{
    board: RwLock<Board>,
    store: Arc<S>,
    ids: Arc<G>,
}

impl<S, G> BoardService<S, G>
where
    S: BoardStore,
    G: IdGenerator,
{
    /// Creates a service around an initial board.
    #[must_use]
    pub const fn new(board: Board, store: Arc<S>, ids: Arc<G>) -> Self {
        Self {
            board: RwLock::new(board),
            store,
            ids,
        }
    }

    /// Returns a copy of the live board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] when the lock is poisoned.
    pub fn snapshot(&self) -> BoardServiceResult<Board> {
        self.read(Board::clone)
    }

    /// Runs a read-only query against the live board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] when the lock is poisoned.
    pub fn read<T>(&self, query: impl FnOnce(&Board) -> T) -> BoardServiceResult<T> {
        let board = self
            .board
            .read()
            .map_err(|_| BoardServiceError::StatePoisoned)?;
        Ok(query(&*board))
    }

    /// Adds a task at the end of a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] when the board rejects the task.
    #[instrument(skip(self, request), fields(column = %column_id))]
    pub fn add_task(&self, column_id: &ColumnId, request: NewTask) -> BoardServiceResult<TaskId> {
        let task_id = self.mutate(|board| board.add_task(column_id, request, &*self.ids))?;
        debug!(task = %task_id, "task added");
        Ok(task_id)
    }

    /// Applies a patch to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] when the task is unknown or the
    /// patch is invalid.
    #[instrument(skip(self, patch), fields(task = %task_id))]
    pub fn edit_task(&self, task_id: &TaskId, patch: &TaskPatch) -> BoardServiceResult<()> {
        self.mutate(|board| board.edit_task(task_id, patch))?;
        debug!("task edited");
        Ok(())
    }

    /// Deletes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] when the task is unknown.
    #[instrument(skip(self), fields(task = %task_id))]
    pub fn delete_task(&self, task_id: &TaskId) -> BoardServiceResult<Task> {
        let task = self.mutate(|board| board.delete_task(task_id))?;
        debug!("task deleted");
        Ok(task)
    }

    /// Moves a task to an exact position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] for unknown ids or an index past
    /// the end of the target column.
    #[instrument(skip(self), fields(task = %task_id, column = %target_column_id))]
    pub fn move_task(
        &self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> BoardServiceResult<()> {
        self.mutate(|board| board.move_task(task_id, target_column_id, target_index))?;
        debug!(index = target_index, "task moved");
        Ok(())
    }

    /// Moves a task, clamping the index to the end of the target column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] for unknown ids.
    #[instrument(skip(self), fields(task = %task_id, column = %target_column_id))]
    pub fn move_task_clamped(
        &self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> BoardServiceResult<()> {
        self.mutate(|board| board.move_task_clamped(task_id, target_column_id, target_index))?;
        debug!(index = target_index, "task moved");
        Ok(())
    }

    /// Appends a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] when the name is blank.
    #[instrument(skip(self))]
    pub fn add_column(&self, name: &str) -> BoardServiceResult<ColumnId> {
        let column_id = self.mutate(|board| board.add_column(name, &*self.ids))?;
        debug!(column = %column_id, "column added");
        Ok(column_id)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] for an unknown column or a blank
    /// name.
    #[instrument(skip(self), fields(column = %column_id))]
    pub fn rename_column(&self, column_id: &ColumnId, name: &str) -> BoardServiceResult<()> {
        self.mutate(|board| board.rename_column(column_id, name))?;
        debug!("column renamed");
        Ok(())
    }

    /// Deletes a column after applying `disposition` to its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] when the column or the
    /// disposition target is unknown.
    #[instrument(skip(self), fields(column = %column_id))]
    pub fn delete_column(
        &self,
        column_id: &ColumnId,
        disposition: &ColumnDisposition,
    ) -> BoardServiceResult<()> {
        self.mutate(|board| board.delete_column(column_id, disposition))?;
        debug!(?disposition, "column deleted");
        Ok(())
    }

    /// Exports the live board as a document.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] when the lock is poisoned.
    pub fn export_document(&self) -> BoardServiceResult<BoardDocument> {
        self.read(|board| BoardDocument::from(board))
    }

    /// Exports the live board as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Encoding`] if encoding fails and
    /// [`BoardServiceError::StatePoisoned`] when the lock is poisoned.
    pub fn export_json(&self) -> BoardServiceResult<String> {
        Ok(self.export_document()?.to_json_pretty()?)
    }

    /// Validates `document` and replaces the live board with it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] with the first validation
    /// failure; the live board is unchanged.
    #[instrument(skip_all)]
    pub fn import_document(&self, document: &Value) -> BoardServiceResult<()> {
        let board = validate_and_build(document).inspect_err(|err| {
            warn!(error = %err, "board import rejected");
        })?;
        self.replace(board)
    }

    /// Parses JSON text and imports it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Board`] when the text is not JSON or the
    /// document is invalid; the live board is unchanged.
    #[instrument(skip_all)]
    pub fn import_json(&self, text: &str) -> BoardServiceResult<()> {
        let board = parse_and_build(text).inspect_err(|err| {
            warn!(error = %err, "board import rejected");
        })?;
        self.replace(board)
    }

    /// Saves the live board through the store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Encoding`] if encoding fails and
    /// [`BoardServiceError::Store`] when the store fails.
    #[instrument(skip_all)]
    pub async fn save(&self) -> BoardServiceResult<()> {
        let document = self.export_document()?.to_value()?;
        self.store.save(&document).await?;
        info!("board saved");
        Ok(())
    }

    /// Loads the stored document and makes it the live board.
    ///
    /// Returns `false`, leaving the board as is, when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the store fails and
    /// [`BoardServiceError::Board`] when the stored document is invalid.
    #[instrument(skip_all)]
    pub async fn load(&self) -> BoardServiceResult<bool> {
        let Some(document) = self.store.load().await? else {
            info!("board store is empty");
            return Ok(false);
        };
        self.import_document(&document)?;
        Ok(true)
    }

    fn replace(&self, board: Board) -> BoardServiceResult<()> {
        let columns = board.columns().len();
        let tasks = board.tasks().len();
        let mut live = self
            .board
            .write()
            .map_err(|_| BoardServiceError::StatePoisoned)?;
        *live = board;
        info!(columns, tasks, "board replaced");
        Ok(())
    }

    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Board) -> Result<T, BoardError>,
    ) -> BoardServiceResult<T> {
        let mut board = self
            .board
            .write()
            .map_err(|_| BoardServiceError::StatePoisoned)?;
        Ok(op(&mut *board)?)
    }
}
