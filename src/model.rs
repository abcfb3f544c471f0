//! Work item model: tasks, epics, and subtasks.
//!
//! All three kinds share the base [`Task`] shape. [`Epic`] and [`Subtask`]
//! compose it with their variant-specific fields instead of inheriting:
//! an epic carries the ordered ids of its subtasks plus an explicit derived
//! end time, a subtask carries the id of its owning epic. The [`WorkItem`]
//! trait gives uniform access to the shared fields, and [`Item`] is the
//! closed any-kind value used by history and priority listings.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::timefmt;

/// Progress state of a work item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    New,
    InProgress,
    Done,
}

impl Status {
    pub fn as_tag(self) -> &'static str {
        match self {
            Status::New => "NEW",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }

    /// Parse a status tag, tolerating case differences.
    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NEW" => Some(Status::New),
            "IN_PROGRESS" => Some(Status::InProgress),
            "DONE" => Some(Status::Done),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// The three work item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Task,
    Epic,
    Subtask,
}

impl Kind {
    pub fn as_tag(self) -> &'static str {
        match self {
            Kind::Task => "TASK",
            Kind::Epic => "EPIC",
            Kind::Subtask => "SUBTASK",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TASK" => Some(Kind::Task),
            "EPIC" => Some(Kind::Epic),
            "SUBTASK" => Some(Kind::Subtask),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Base shape shared by all item kinds.
///
/// `id` is 0 on a draft and assigned by the store on create; it never
/// changes afterwards. Durations serialize as whole minutes, timestamps
/// as `dd.MM.yyyy HH:mm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(
        default,
        with = "timefmt::minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Duration>,
    #[serde(
        default,
        with = "timefmt::stamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveDateTime>,
}

impl Task {
    /// Create an unscheduled draft (id 0, no time window).
    pub fn new(name: impl Into<String>, description: impl Into<String>, status: Status) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            status,
            duration: None,
            start_time: None,
        }
    }

    /// Set the time window on a draft.
    pub fn scheduled(mut self, start_time: NaiveDateTime, duration: Duration) -> Self {
        self.start_time = Some(start_time);
        self.duration = Some(duration);
        self
    }
}

/// Container of subtasks. Status and the time window are derived from the
/// owned subtasks, never set by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub subtask_ids: Vec<u32>,
    #[serde(
        default,
        with = "timefmt::stamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveDateTime>,
}

impl Epic {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task: Task::new(name, description, Status::New),
            subtask_ids: Vec::new(),
            end_time: None,
        }
    }

    /// Register an owned subtask id. Duplicates and the epic's own id are
    /// ignored.
    pub fn add_subtask_id(&mut self, id: u32) {
        if id != self.task.id && !self.subtask_ids.contains(&id) {
            self.subtask_ids.push(id);
        }
    }

    pub fn remove_subtask_id(&mut self, id: u32) {
        self.subtask_ids.retain(|&existing| existing != id);
    }
}

/// A task owned by exactly one epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    #[serde(flatten)]
    pub task: Task,
    pub epic_id: u32,
}

impl Subtask {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: Status,
        epic_id: u32,
    ) -> Self {
        Self {
            task: Task::new(name, description, status),
            epic_id,
        }
    }
}

/// Uniform access to the fields every item kind carries.
pub trait WorkItem {
    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn status(&self) -> Status;
    fn duration(&self) -> Option<Duration>;
    fn start_time(&self) -> Option<NaiveDateTime>;

    /// End of the item's interval; absent unless both start and duration
    /// are present.
    fn end_time(&self) -> Option<NaiveDateTime> {
        match (self.start_time(), self.duration()) {
            (Some(start), Some(duration)) => Some(start + duration),
            _ => None,
        }
    }
}

impl WorkItem for Task {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }
}

impl WorkItem for Subtask {
    fn id(&self) -> u32 {
        self.task.id
    }

    fn name(&self) -> &str {
        &self.task.name
    }

    fn status(&self) -> Status {
        self.task.status
    }

    fn duration(&self) -> Option<Duration> {
        self.task.duration
    }

    fn start_time(&self) -> Option<NaiveDateTime> {
        self.task.start_time
    }
}

impl WorkItem for Epic {
    fn id(&self) -> u32 {
        self.task.id
    }

    fn name(&self) -> &str {
        &self.task.name
    }

    fn status(&self) -> Status {
        self.task.status
    }

    fn duration(&self) -> Option<Duration> {
        self.task.duration
    }

    fn start_time(&self) -> Option<NaiveDateTime> {
        self.task.start_time
    }

    // The epic window ends at the latest subtask end, which is not
    // start + duration when subtasks leave gaps.
    fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }
}

/// An item of any kind, as returned by history and priority listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Item {
    Task(Task),
    Epic(Epic),
    Subtask(Subtask),
}

impl Item {
    pub fn kind(&self) -> Kind {
        match self {
            Item::Task(_) => Kind::Task,
            Item::Epic(_) => Kind::Epic,
            Item::Subtask(_) => Kind::Subtask,
        }
    }
}

impl WorkItem for Item {
    fn id(&self) -> u32 {
        match self {
            Item::Task(task) => task.id(),
            Item::Epic(epic) => epic.id(),
            Item::Subtask(subtask) => subtask.id(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Item::Task(task) => task.name(),
            Item::Epic(epic) => epic.name(),
            Item::Subtask(subtask) => subtask.name(),
        }
    }

    fn status(&self) -> Status {
        match self {
            Item::Task(task) => task.status(),
            Item::Epic(epic) => epic.status(),
            Item::Subtask(subtask) => subtask.status(),
        }
    }

    fn duration(&self) -> Option<Duration> {
        match self {
            Item::Task(task) => task.duration(),
            Item::Epic(epic) => epic.duration(),
            Item::Subtask(subtask) => subtask.duration(),
        }
    }

    fn start_time(&self) -> Option<NaiveDateTime> {
        match self {
            Item::Task(task) => task.start_time(),
            Item::Epic(epic) => epic.start_time(),
            Item::Subtask(subtask) => subtask.start_time(),
        }
    }

    fn end_time(&self) -> Option<NaiveDateTime> {
        match self {
            Item::Task(task) => task.end_time(),
            Item::Epic(epic) => epic.end_time(),
            Item::Subtask(subtask) => subtask.end_time(),
        }
    }
}
