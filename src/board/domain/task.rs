//! Task record and its validated field types.

use super::{BoardError, BoardResult, ParsePriorityError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Canonical textual date layout for due dates.
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task priority, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    #[serde(alias = "Med")]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the document representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Low" => Ok(Self::Low),
            "Medium" | "Med" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar due date in ISO `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses a strict ISO calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] when the text is not a zero-padded
    /// `YYYY-MM-DD` date, carries surrounding whitespace or names a day that
    /// does not exist.
    pub fn parse(text: &str) -> BoardResult<Self> {
        let bytes = text.as_bytes();
        let has_iso_shape = bytes.len() == 10
            && bytes.get(4) == Some(&b'-')
            && bytes.get(7) == Some(&b'-')
            && bytes
                .iter()
                .enumerate()
                .all(|(pos, byte)| pos == 4 || pos == 7 || byte.is_ascii_digit());
        if !has_iso_shape {
            return Err(BoardError::invalid_input(
                "due",
                format!("'{text}' is not a YYYY-MM-DD date"),
            ));
        }

        NaiveDate::parse_from_str(text, DUE_DATE_FORMAT)
            .map(Self)
            .map_err(|err| BoardError::invalid_input("due", format!("'{text}': {err}")))
    }

    /// Parses optional due-date text where blank means "no due date".
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] for non-blank text that is not a
    /// valid date.
    pub fn parse_optional(text: &str) -> BoardResult<Option<Self>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(text).map(Some)
    }

    /// Wraps an already valid calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}

/// Non-empty task title, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] when the title is blank.
    pub fn new(value: impl Into<String>) -> BoardResult<Self> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardError::invalid_input("title", "title must not be empty"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unordered set of tag labels.
///
/// Labels are trimmed and blank labels are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Builds tags from comma-separated text such as `"ops, ui, backend"`.
    #[must_use]
    pub fn parse_list(text: &str) -> Self {
        text.split(',').map(str::to_owned).collect()
    }

    /// Returns `true` when the set holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when `label` is present.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Returns `true` when at least one label of `other` is present.
    #[must_use]
    pub fn intersects(&self, other: &BTreeSet<String>) -> bool {
        other.iter().any(|label| self.0.contains(label))
    }

    /// Iterates over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Tags {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter_map(|label| {
                    let trimmed = label.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_owned())
                })
                .collect(),
        )
    }
}

/// A unit of work on the board.
///
/// The task identifier is the key under which the board stores the task;
/// it is not repeated inside the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    title: TaskTitle,
    desc: String,
    priority: Priority,
    due: Option<DueDate>,
    tags: Tags,
    done: bool,
}

impl Task {
    /// Creates an open, medium-priority task with no description, due date
    /// or tags.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            desc: String::new(),
            priority: Priority::default(),
            due: None,
            tags: Tags::new(),
            done: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due(mut self, due: Option<DueDate>) -> Self {
        self.due = due;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due(&self) -> Option<DueDate> {
        self.due
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Returns `true` when the task is complete.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Builds a task from raw creation input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] for a blank title or malformed
    /// due date.
    pub fn from_new(request: NewTask) -> BoardResult<Self> {
        let title = TaskTitle::new(request.title)?;
        let due = DueDate::parse_optional(&request.due)?;
        Ok(Self::new(title)
            .with_desc(request.desc)
            .with_priority(request.priority)
            .with_due(due)
            .with_tags(request.tags.into_iter().collect()))
    }

    /// Returns a copy of this task with the patch applied.
    ///
    /// Every field in the patch is validated before any is applied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] for a blank title or malformed
    /// due date.
    pub fn patched(&self, patch: &TaskPatch) -> BoardResult<Self> {
        let title = patch.title.as_deref().map(TaskTitle::new).transpose()?;
        let due = patch
            .due
            .as_deref()
            .map(DueDate::parse_optional)
            .transpose()?;

        let mut updated = self.clone();
        if let Some(new_title) = title {
            updated.title = new_title;
        }
        if let Some(new_desc) = patch.desc.as_ref() {
            updated.desc.clone_from(new_desc);
        }
        if let Some(new_priority) = patch.priority {
            updated.priority = new_priority;
        }
        if let Some(new_due) = due {
            updated.due = new_due;
        }
        if let Some(new_tags) = patch.tags.as_ref() {
            updated.tags = new_tags.iter().cloned().collect();
        }
        if let Some(new_done) = patch.done {
            updated.done = new_done;
        }
        Ok(updated)
    }
}

/// Request payload for adding a task.
///
/// Fields hold raw caller input; validation happens when the board accepts
/// the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    desc: String,
    priority: Priority,
    due: String,
    tags: Vec<String>,
}

impl NewTask {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            desc: String::new(),
            priority: Priority::default(),
            due: String::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date text; blank text means no due date.
    #[must_use]
    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = due.into();
        self
    }

    /// Sets the tag labels.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Partial update for an existing task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    desc: Option<String>,
    priority: Option<Priority>,
    due: Option<String>,
    tags: Option<Vec<String>>,
    done: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date; blank text clears it.
    #[must_use]
    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Replaces the completion flag.
    #[must_use]
    pub const fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
