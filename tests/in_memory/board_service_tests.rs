//! In-memory integration tests for board mutations through the service.

use super::helpers::{TestService, column, ids_in, service};
use kanban::board::{
    domain::{
        BoardError, BoardErrorKind, ColumnDisposition, NewTask, Priority, TaskFilter, TaskPatch,
        filter_tasks,
    },
    services::BoardServiceError,
};
use rstest::rstest;

fn kind_of(err: &BoardServiceError) -> Option<BoardErrorKind> {
    match err {
        BoardServiceError::Board(board_err) => Some(board_err.kind()),
        _ => None,
    }
}

#[rstest]
fn task_travels_across_the_board(service: TestService) {
    let task_id = service
        .add_task(&column("todo"), NewTask::new("Write spec").with_priority(Priority::High))
        .expect("add task");
    service
        .move_task(&task_id, &column("inprog"), 0)
        .expect("start work");
    service
        .edit_task(&task_id, &TaskPatch::new().with_done(true))
        .expect("mark done");
    service
        .move_task_clamped(&task_id, &column("done"), 10)
        .expect("finish work");

    assert_eq!(ids_in(&service, "todo"), Vec::<String>::new());
    assert_eq!(ids_in(&service, "inprog"), Vec::<String>::new());
    assert_eq!(ids_in(&service, "done"), vec![task_id.to_string()]);
    let done = service
        .read(|board| board.task(&task_id).map(|task| task.is_done()))
        .expect("read board");
    assert_eq!(done, Some(true));
}

#[rstest]
fn column_lifecycle_keeps_tasks_consistent(service: TestService) {
    let review = service.add_column("  Review ").expect("add column");
    let first = service
        .add_task(&review, NewTask::new("Check diff"))
        .expect("add task");
    let second = service
        .add_task(&column("done"), NewTask::new("Merged"))
        .expect("add task");
    service
        .rename_column(&review, "Code review")
        .expect("rename column");
    service
        .delete_column(&review, &ColumnDisposition::MoveTasksTo(column("done")))
        .expect("delete column");

    let snapshot = service.snapshot().expect("snapshot");
    assert!(snapshot.column(&review).is_none());
    assert_eq!(
        ids_in(&service, "done"),
        vec![second.to_string(), first.to_string()]
    );
    assert!(snapshot.check_invariants().is_ok());
}

#[rstest]
fn cascade_delete_removes_column_tasks(service: TestService) {
    let doomed = service
        .add_task(&column("inprog"), NewTask::new("Abandoned spike"))
        .expect("add task");
    let kept = service
        .add_task(&column("todo"), NewTask::new("Keep going"))
        .expect("add task");

    service
        .delete_column(&column("inprog"), &ColumnDisposition::CascadeDeleteTasks)
        .expect("delete column");

    let snapshot = service.snapshot().expect("snapshot");
    assert!(snapshot.task(&doomed).is_none());
    assert!(snapshot.task(&kept).is_some());
    assert_eq!(snapshot.columns().len(), 2);
}

#[rstest]
#[case::blank_title(NewTask::new("   "), BoardErrorKind::InvalidInput)]
#[case::bad_due(NewTask::new("Plan").with_due("31/12/2025"), BoardErrorKind::InvalidInput)]
fn rejected_additions_change_nothing(
    service: TestService,
    #[case] request: NewTask,
    #[case] expected: BoardErrorKind,
) {
    let before = service.snapshot().expect("snapshot");

    let err = service
        .add_task(&column("todo"), request)
        .expect_err("invalid task");

    assert_eq!(kind_of(&err), Some(expected));
    assert_eq!(service.snapshot().expect("snapshot"), before);
}

#[rstest]
fn move_past_end_reports_length_after_removal(service: TestService) {
    let task_id = service
        .add_task(&column("todo"), NewTask::new("Only task"))
        .expect("add task");

    let err = service
        .move_task(&task_id, &column("todo"), 1)
        .expect_err("index past end");

    assert!(matches!(
        err,
        BoardServiceError::Board(BoardError::IndexOutOfRange {
            index: 1,
            len: 0
        })
    ));
}

#[rstest]
fn filtered_view_reflects_live_board(service: TestService) {
    for (title, tags) in [
        ("Release notes", vec!["docs"]),
        ("Fix crash", vec!["bug", "urgent"]),
        ("Update README", vec!["docs"]),
    ] {
        service
            .add_task(
                &column("todo"),
                NewTask::new(title).with_tags(tags.into_iter().map(str::to_owned)),
            )
            .expect("add task");
    }
    let filter = TaskFilter::new().with_tags(vec!["docs".to_owned()]);

    let titles = service
        .read(|board| {
            filter_tasks(board, &filter)
                .iter()
                .flat_map(|column| column.tasks().iter().map(|(_, task)| task.title().to_string()))
                .collect::<Vec<_>>()
        })
        .expect("read board");
    let tags = service
        .read(|board| board.all_tags().into_iter().map(str::to_owned).collect::<Vec<_>>())
        .expect("read board");

    assert_eq!(titles, vec!["Release notes", "Update README"]);
    assert_eq!(tags, vec!["bug", "docs", "urgent"]);
}
