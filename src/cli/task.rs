//! trk task command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{item_line, open_tracker, parse_duration, parse_start, parse_status};
use crate::error::{Error, Result};
use crate::model::Task;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AddOptions {
    pub name: String,
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
struct TaskReport {
    task: Task,
}

#[derive(Serialize)]
struct TaskListReport {
    count: usize,
    tasks: Vec<Task>,
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
    let mut draft = Task::new(opts.name, opts.description, status);
    draft.duration = parse_duration(opts.duration)?;
    draft.start_time = parse_start(opts.start.as_deref())?;

    let mut tracker = open_tracker(&opts.root)?;
    let id = tracker
        .create_task(draft)?
        .ok_or_else(|| Error::InvalidArgument("task was not created".to_string()))?;
    let task = tracker
        .all_tasks()
        .into_iter()
        .find(|task| task.id == id)
        .ok_or_else(|| Error::OperationFailed(format!("created task {id} vanished")))?;

    let mut human = HumanOutput::new(format!("trk task add: created task #{id}"));
    human.push_summary("name", task.name.clone());
    human.push_summary("status", task.status.to_string());
    if let Some(start) = task.start_time {
        human.push_summary("start", crate::timefmt::format_stamp(start));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task add",
        &TaskReport { task },
        Some(&human),
    )
}

pub fn run_ls(opts: LsOptions) -> Result<()> {
    let tracker = open_tracker(&opts.root)?;
    let tasks = tracker.all_tasks();

    let mut human = HumanOutput::new(format!("trk task ls: {} task(s)", tasks.len()));
    for task in &tasks {
        human.push_detail(item_line(task, "TASK"));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task ls",
        &TaskListReport {
            count: tasks.len(),
            tasks,
        },
        Some(&human),
    )
}

pub fn run_show(opts: ShowOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let task = tracker
        .get_task(opts.id)?
        .ok_or_else(|| Error::InvalidArgument(format!("task not found: {}", opts.id)))?;

    let mut human = HumanOutput::new(item_line(&task, "TASK"));
    if !task.description.is_empty() {
        human.push_detail(task.description.clone());
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task show",
        &TaskReport { task },
        Some(&human),
    )
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let mut task = tracker
        .all_tasks()
        .into_iter()
        .find(|task| task.id == opts.id)
        .ok_or_else(|| Error::InvalidArgument(format!("task not found: {}", opts.id)))?;

    if let Some(name) = opts.name {
        task.name = name;
    }
    if let Some(description) = opts.description {
        task.description = description;
    }
    if let Some(status) = opts.status.as_deref() {
        task.status = parse_status(status)?;
    }
    if let Some(duration) = parse_duration(opts.duration)? {
        task.duration = Some(duration);
    }
    if let Some(start) = parse_start(opts.start.as_deref())? {
        task.start_time = Some(start);
    }

    if !tracker.update_task(task.clone())? {
        return Err(Error::InvalidArgument(format!(
            "task not found: {}",
            opts.id
        )));
    }

    let human = HumanOutput::new(format!("trk task edit: updated {}", item_line(&task, "TASK")));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task edit",
        &TaskReport { task },
        Some(&human),
    )
}

pub fn run_rm(opts: RmOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    tracker.delete_task(opts.id)?;

    let human = HumanOutput::new(format!("trk task rm: removed task #{}", opts.id));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task rm",
        &RemovedReport { id: opts.id },
        Some(&human),
    )
}

pub fn run_clear(opts: ClearOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let removed = tracker.all_tasks().len();
    tracker.delete_all_tasks()?;

    let human = HumanOutput::new(format!("trk task clear: removed {removed} task(s)"));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task clear",
        &ClearedReport { removed },
        Some(&human),
    )
}
