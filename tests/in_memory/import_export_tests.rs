//! In-memory integration tests for document export, import and saving.

use std::sync::Arc;

use super::helpers::{TestService, column, ids_in, seeded_board, service, store};
use kanban::board::{
    adapters::{InMemoryBoardStore, SequentialIdGenerator},
    domain::{BoardErrorKind, NewTask, Priority},
    ports::BoardStore,
    services::{BoardService, BoardServiceError},
};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn import_replaces_the_whole_board(service: TestService) {
    service
        .add_task(&column("todo"), NewTask::new("Old work"))
        .expect("add task");

    service
        .import_json(
            r#"{
                "columns": [
                    { "id": "backlog", "name": "Backlog", "task_ids": ["a", "b"] },
                    { "id": "shipped", "name": "Shipped" }
                ],
                "tasks": {
                    "a": { "title": "Design", "priority": "Low", "tags": ["ux"] },
                    "b": { "title": "Build", "due": "2025-09-30", "done": false }
                }
            }"#,
        )
        .expect("import");

    let snapshot = service.snapshot().expect("snapshot");
    let column_ids: Vec<&str> = snapshot.columns().iter().map(|c| c.id().as_str()).collect();
    assert_eq!(column_ids, vec!["backlog", "shipped"]);
    assert_eq!(ids_in(&service, "backlog"), vec!["a", "b"]);
    assert_eq!(snapshot.tasks().len(), 2);
}

#[rstest]
fn rejected_import_keeps_live_board(service: TestService) {
    service
        .add_task(&column("todo"), NewTask::new("Keep me"))
        .expect("add task");
    let before = service.snapshot().expect("snapshot");

    let err = service
        .import_document(&json!({
            "columns": [{ "id": "todo", "name": "To do", "task_ids": ["t1"] }],
            "tasks": { "t1": { "title": "Bad", "due": "2025-02-30" } }
        }))
        .expect_err("invalid due date");

    assert!(matches!(
        &err,
        BoardServiceError::Board(board_err) if board_err.kind() == BoardErrorKind::InvalidInput
    ));
    assert_eq!(service.snapshot().expect("snapshot"), before);
}

#[rstest]
fn exported_document_uses_exchange_format(service: TestService) {
    let task_id = service
        .add_task(
            &column("inprog"),
            NewTask::new("Benchmark").with_priority(Priority::Low),
        )
        .expect("add task");

    let document = service
        .export_document()
        .expect("export")
        .to_value()
        .expect("serialise");

    assert_eq!(
        document["columns"][1],
        json!({ "id": "inprog", "name": "In progress", "task_ids": [task_id.as_str()] })
    );
    assert_eq!(
        document["tasks"][task_id.as_str()],
        json!({
            "title": "Benchmark",
            "desc": "",
            "priority": "Low",
            "due": "",
            "tags": [],
            "done": false
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_board_is_shared_through_store(store: Arc<InMemoryBoardStore>) {
    let writer = BoardService::new(
        seeded_board(),
        Arc::clone(&store),
        Arc::new(SequentialIdGenerator::new()),
    );
    writer
        .add_task(&column("done"), NewTask::new("Released"))
        .expect("add task");
    writer.save().await.expect("save");

    let stored = store.load().await.expect("load").expect("document saved");
    assert_eq!(stored["columns"][2]["task_ids"], json!(["t1"]));

    let reader = BoardService::new(
        seeded_board(),
        store,
        Arc::new(SequentialIdGenerator::new()),
    );
    assert!(reader.load().await.expect("load"));
    assert_eq!(ids_in(&reader, "done"), vec!["t1"]);
}
