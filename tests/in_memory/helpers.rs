//! Shared test helpers for in-memory board service integration tests.

use std::sync::Arc;

use kanban::board::{
    adapters::{InMemoryBoardStore, SequentialIdGenerator},
    config::BoardConfig,
    domain::{Board, ColumnId, TaskId},
    services::BoardService,
};
use rstest::fixture;

/// Service type backed by the in-memory store.
pub type TestService = BoardService<InMemoryBoardStore, SequentialIdGenerator>;

/// Provides a shared in-memory store.
#[fixture]
pub fn store() -> Arc<InMemoryBoardStore> {
    Arc::new(InMemoryBoardStore::new())
}

/// Provides a service over the default `todo`, `inprog`, `done` board.
#[fixture]
pub fn service(store: Arc<InMemoryBoardStore>) -> TestService {
    BoardService::new(seeded_board(), store, Arc::new(SequentialIdGenerator::new()))
}

/// Builds the default seeded board.
pub fn seeded_board() -> Board {
    BoardConfig::default()
        .seed_board()
        .expect("default configuration seeds a valid board")
}

/// Parses a column identifier used by a test.
pub fn column(value: &str) -> ColumnId {
    ColumnId::new(value).expect("valid column id")
}

/// Returns the task ids of `column_id` as strings.
pub fn ids_in(service: &TestService, column_id: &str) -> Vec<String> {
    service
        .read(|board| {
            board
                .column(&column(column_id))
                .map(|found| found.task_ids().iter().map(TaskId::to_string).collect())
                .unwrap_or_default()
        })
        .expect("read board")
}
