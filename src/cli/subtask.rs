//! trk subtask command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{item_line, open_tracker, parse_duration, parse_start, parse_status};
use crate::error::{Error, Result};
use crate::model::Subtask;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AddOptions {
    pub name: String,
    pub epic: u32,
    pub description: String,
    pub status: String,
    pub duration: Option<i64>,
    pub start: Option<String>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct LsOptions {
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: u32,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: u32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub duration: Option<i64>,
    pub start: Option<String>,
    pub epic: Option<u32>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: u32,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ClearOptions {
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct SubtaskReport {
    subtask: Subtask,
}

#[derive(Serialize)]
struct SubtaskListReport {
    count: usize,
    subtasks: Vec<Subtask>,
}

#[derive(Serialize)]
struct RemovedReport {
    id: u32,
}

#[derive(Serialize)]
struct ClearedReport {
    removed: usize,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let status = parse_status(&opts.status)?;
    let mut draft = Subtask::new(opts.name, opts.description, status, opts.epic);
    draft.task.duration = parse_duration(opts.duration)?;
    draft.task.start_time = parse_start(opts.start.as_deref())?;

    let mut tracker = open_tracker(&opts.root)?;
    let id = tracker
        .create_subtask(draft)?
        .ok_or_else(|| Error::InvalidArgument(format!("epic not found: {}", opts.epic)))?;
    let subtask = tracker
        .all_subtasks()
        .into_iter()
        .find(|subtask| subtask.task.id == id)
        .ok_or_else(|| Error::OperationFailed(format!("created subtask {id} vanished")))?;

    let mut human = HumanOutput::new(format!("trk subtask add: created subtask #{id}"));
    human.push_summary("name", subtask.task.name.clone());
    human.push_summary("epic", subtask.epic_id.to_string());
    human.push_summary("status", subtask.task.status.to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "subtask add",
        &SubtaskReport { subtask },
        Some(&human),
    )
}

pub fn run_ls(opts: LsOptions) -> Result<()> {
    let tracker = open_tracker(&opts.root)?;
    let subtasks = tracker.all_subtasks();

    let mut human = HumanOutput::new(format!("trk subtask ls: {} subtask(s)", subtasks.len()));
    for subtask in &subtasks {
        human.push_detail(format!(
            "{} (epic #{})",
            item_line(subtask, "SUBTASK"),
            subtask.epic_id
        ));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "subtask ls",
        &SubtaskListReport {
            count: subtasks.len(),
            subtasks,
        },
        Some(&human),
    )
}

pub fn run_show(opts: ShowOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let subtask = tracker
        .get_subtask(opts.id)?
        .ok_or_else(|| Error::InvalidArgument(format!("subtask not found: {}", opts.id)))?;

    let mut human = HumanOutput::new(item_line(&subtask, "SUBTASK"));
    human.push_summary("epic", subtask.epic_id.to_string());
    if !subtask.task.description.is_empty() {
        human.push_detail(subtask.task.description.clone());
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "subtask show",
        &SubtaskReport { subtask },
        Some(&human),
    )
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let mut subtask = tracker
        .all_subtasks()
        .into_iter()
        .find(|subtask| subtask.task.id == opts.id)
        .ok_or_else(|| Error::InvalidArgument(format!("subtask not found: {}", opts.id)))?;

    if let Some(name) = opts.name {
        subtask.task.name = name;
    }
    if let Some(description) = opts.description {
        subtask.task.description = description;
    }
    if let Some(status) = opts.status.as_deref() {
        subtask.task.status = parse_status(status)?;
    }
    if let Some(duration) = parse_duration(opts.duration)? {
        subtask.task.duration = Some(duration);
    }
    if let Some(start) = parse_start(opts.start.as_deref())? {
        subtask.task.start_time = Some(start);
    }
    if let Some(epic) = opts.epic {
        subtask.epic_id = epic;
    }

    if !tracker.update_subtask(subtask.clone())? {
        return Err(Error::InvalidArgument(format!(
            "epic not found: {}",
            subtask.epic_id
        )));
    }

    let human = HumanOutput::new(format!(
        "trk subtask edit: updated {}",
        item_line(&subtask, "SUBTASK")
    ));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "subtask edit",
        &SubtaskReport { subtask },
        Some(&human),
    )
}

pub fn run_rm(opts: RmOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    tracker.delete_subtask(opts.id)?;

    let human = HumanOutput::new(format!("trk subtask rm: removed subtask #{}", opts.id));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "subtask rm",
        &RemovedReport { id: opts.id },
        Some(&human),
    )
}

pub fn run_clear(opts: ClearOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let removed = tracker.all_subtasks().len();
    tracker.delete_all_subtasks()?;

    let human = HumanOutput::new(format!("trk subtask clear: removed {removed} subtask(s)"));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "subtask clear",
        &ClearedReport { removed },
        Some(&human),
    )
}
