//! Schema and invariant validation for imported board documents.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. document shape: a `columns` array and a `tasks` object whose entries
//!    are objects;
//! 2. columns: string ids (unique), string names, string task references;
//! 3. tasks: required fields with the right kinds and valid values;
//! 4. board invariants across columns and tasks.
//!
//! Nothing is repaired: an invalid document produces an error naming the
//! offending path and no board.

use crate::board::domain::{
    Board, BoardError, BoardResult, Column, ColumnId, DueDate, Priority, Task, TaskId, TaskTitle,
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

type Object = Map<String, Value>;

/// Parses JSON text and validates it as a board document.
///
/// # Errors
///
/// Returns [`BoardError::SchemaViolation`] when the text is not JSON, and
/// otherwise the errors of [`validate_and_build`].
pub fn parse_and_build(text: &str) -> BoardResult<Board> {
    let document: Value = serde_json::from_str(text)
        .map_err(|err| BoardError::schema("$", format!("document is not valid JSON: {err}")))?;
    validate_and_build(&document)
}

/// Validates a board document and builds the board it describes.
///
/// # Errors
///
/// Returns [`BoardError::SchemaViolation`] for a malformed shape or wrongly
/// typed value, [`BoardError::InvalidInput`] for a rejected value (blank
/// title or id, unknown priority, malformed due date) and
/// [`BoardError::InvariantViolation`] when columns and tasks disagree.
pub fn validate_and_build(document: &Value) -> BoardResult<Board> {
    let root = as_object(document, "$")?;
    let column_values = as_array(required(root, "$", "columns")?, "columns")?;
    let task_values = as_object(required(root, "$", "tasks")?, "tasks")?;

    for (index, value) in column_values.iter().enumerate() {
        as_object(value, &format!("columns[{index}]"))?;
    }
    for (key, value) in task_values {
        as_object(value, &format!("tasks.{key}"))?;
    }

    let mut seen_columns = HashSet::with_capacity(column_values.len());
    let columns = column_values
        .iter()
        .enumerate()
        .map(|(index, value)| column_from_value(index, value, &mut seen_columns))
        .collect::<BoardResult<Vec<_>>>()?;

    let tasks = task_values
        .iter()
        .map(|(key, value)| task_from_value(key, value))
        .collect::<BoardResult<BTreeMap<_, _>>>()?;

    Board::from_parts(columns, tasks)
}

fn column_from_value(
    index: usize,
    value: &Value,
    seen: &mut HashSet<ColumnId>,
) -> BoardResult<Column> {
    let path = format!("columns[{index}]");
    let object = as_object(value, &path)?;

    let id_path = format!("{path}.id");
    let id = ColumnId::new(as_str(required(object, &path, "id")?, &id_path)?)
        .map_err(|_| BoardError::invalid_input(&id_path, "column id must not be empty"))?;
    if !seen.insert(id.clone()) {
        return Err(BoardError::invariant(
            id_path,
            format!("duplicate column id '{id}'"),
        ));
    }

    let name = as_str(required(object, &path, "name")?, &format!("{path}.name"))?;

    let task_ids = match object.get("task_ids") {
        None => Vec::new(),
        Some(raw) => {
            let list_path = format!("{path}.task_ids");
            as_array(raw, &list_path)?
                .iter()
                .enumerate()
                .map(|(slot, entry)| {
                    let entry_path = format!("{list_path}[{slot}]");
                    TaskId::new(as_str(entry, &entry_path)?).map_err(|_| {
                        BoardError::invalid_input(&entry_path, "task id must not be empty")
                    })
                })
                .collect::<BoardResult<Vec<_>>>()?
        }
    };

    Ok(Column::with_task_ids(id, name, task_ids))
}

fn task_from_value(key: &str, value: &Value) -> BoardResult<(TaskId, Task)> {
    let path = format!("tasks.{key}");
    let object = as_object(value, &path)?;
    let task_id = TaskId::new(key)
        .map_err(|_| BoardError::invalid_input(&path, "task id must not be empty"))?;

    let title_path = format!("{path}.title");
    let title = TaskTitle::new(as_str(required(object, &path, "title")?, &title_path)?)
        .map_err(|_| BoardError::invalid_input(&title_path, "title must not be empty"))?;

    let desc = optional(object, "desc")
        .map(|raw| as_str(raw, &format!("{path}.desc")))
        .transpose()?
        .unwrap_or_default();

    let priority = optional(object, "priority")
        .map(|raw| priority_from_value(raw, &format!("{path}.priority")))
        .transpose()?
        .unwrap_or_default();

    let due = optional(object, "due")
        .map(|raw| due_from_value(raw, &format!("{path}.due")))
        .transpose()?
        .flatten();

    let tags = match optional(object, "tags") {
        None => Vec::new(),
        Some(raw) => {
            let tags_path = format!("{path}.tags");
            as_array(raw, &tags_path)?
                .iter()
                .enumerate()
                .map(|(slot, entry)| {
                    as_str(entry, &format!("{tags_path}[{slot}]")).map(str::to_owned)
                })
                .collect::<BoardResult<Vec<_>>>()?
        }
    };

    let done = optional(object, "done")
        .map(|raw| {
            raw.as_bool()
                .ok_or_else(|| mismatch(&format!("{path}.done"), "a boolean", raw))
        })
        .transpose()?
        .unwrap_or(false);

    let task = Task::new(title)
        .with_desc(desc)
        .with_priority(priority)
        .with_due(due)
        .with_tags(tags.into_iter().collect())
        .with_done(done);
    Ok((task_id, task))
}

fn priority_from_value(value: &Value, path: &str) -> BoardResult<Priority> {
    as_str(value, path)?
        .parse::<Priority>()
        .map_err(|err| BoardError::invalid_input(path, err.to_string()))
}

fn due_from_value(value: &Value, path: &str) -> BoardResult<Option<DueDate>> {
    if value.is_null() {
        return Ok(None);
    }
    DueDate::parse_optional(as_str(value, path)?).map_err(|err| match err {
        BoardError::InvalidInput { reason, .. } => BoardError::invalid_input(path, reason),
        other => other,
    })
}

/// Returns a present, non-null field.
fn optional<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn required<'a>(object: &'a Object, path: &str, key: &str) -> BoardResult<&'a Value> {
    object.get(key).ok_or_else(|| {
        let field_path = if path == "$" {
            key.to_owned()
        } else {
            format!("{path}.{key}")
        };
        BoardError::schema(field_path, "required field is missing")
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> BoardResult<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| mismatch(path, "an object", value))
}

fn as_array<'a>(value: &'a Value, path: &str) -> BoardResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| mismatch(path, "an array", value))
}

fn as_str<'a>(value: &'a Value, path: &str) -> BoardResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| mismatch(path, "a string", value))
}

fn mismatch(path: &str, expected: &str, found: &Value) -> BoardError {
    BoardError::schema(path, format!("expected {expected}, found {}", kind_of(found)))
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
