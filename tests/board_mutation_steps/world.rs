//! Shared world state for board mutation BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use kanban::board::{
    adapters::{InMemoryBoardStore, SequentialIdGenerator},
    domain::{Board, TaskId},
    services::{BoardService, BoardServiceError},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryBoardStore, SequentialIdGenerator>;

/// Scenario world for board mutation behaviour tests.
pub struct BoardWorld {
    pub store: Arc<InMemoryBoardStore>,
    pub service: TestBoardService,
    pub task_ids: HashMap<String, TaskId>,
    pub board_before: Option<Board>,
    pub last_result: Option<Result<(), BoardServiceError>>,
}

impl BoardWorld {
    /// Creates a world around an empty board.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBoardStore::new());
        let service = new_service(Board::empty(), Arc::clone(&store));

        Self {
            store,
            service,
            task_ids: HashMap::new(),
            board_before: None,
            last_result: None,
        }
    }

    /// Replaces the live board with `board`.
    pub fn reset(&mut self, board: Board) {
        self.service = new_service(board, Arc::clone(&self.store));
        self.task_ids.clear();
    }

    /// Resolves a task title used in the scenario to its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no task with `title` was created.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' in scenario world"))
    }

    /// Records the board before a step runs and the step's outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the live board cannot be read.
    pub fn record(
        &mut self,
        step: impl FnOnce(&TestBoardService) -> Result<(), BoardServiceError>,
    ) -> Result<(), eyre::Report> {
        self.board_before = Some(self.service.snapshot()?);
        self.last_result = Some(step(&self.service));
        Ok(())
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn new_service(board: Board, store: Arc<InMemoryBoardStore>) -> TestBoardService {
    BoardService::new(board, store, Arc::new(SequentialIdGenerator::new()))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
