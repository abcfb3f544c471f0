//! trk epic command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{item_line, open_tracker};
use crate::error::{Error, Result};
use crate::model::{Epic, Subtask};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AddOptions {
    pub name: String,
    pub description: String,
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

pub struct SubtasksOptions {
    pub id: u32,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct EpicReport {
    epic: Epic,
}

#[derive(Serialize)]
struct EpicListReport {
    count: usize,
    epics: Vec<Epic>,
}

#[derive(Serialize)]
struct SubtaskListReport {
    epic_id: u32,
    count: usize,
    subtasks: Vec<Subtask>,
}

#[derive(Serialize)]
struct RemovedReport {
    id: u32,
}

#[derive(Serialize)]
struct ClearedReport {
    removed_epics: usize,
    removed_subtasks: usize,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let id = tracker
        .create_epic(Epic::new(opts.name, opts.description))?
        .ok_or_else(|| Error::InvalidArgument("epic was not created".to_string()))?;
    let epic = tracker
        .all_epics()
        .into_iter()
        .find(|epic| epic.task.id == id)
        .ok_or_else(|| Error::OperationFailed(format!("created epic {id} vanished")))?;

    let mut human = HumanOutput::new(format!("trk epic add: created epic #{id}"));
    human.push_summary("name", epic.task.name.clone());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic add",
        &EpicReport { epic },
        Some(&human),
    )
}

pub fn run_ls(opts: LsOptions) -> Result<()> {
    let tracker = open_tracker(&opts.root)?;
    let epics = tracker.all_epics();

    let mut human = HumanOutput::new(format!("trk epic ls: {} epic(s)", epics.len()));
    for epic in &epics {
        human.push_detail(format!(
            "{} ({} subtask(s))",
            item_line(epic, "EPIC"),
            epic.subtask_ids.len()
        ));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic ls",
        &EpicListReport {
            count: epics.len(),
            epics,
        },
        Some(&human),
    )
}

pub fn run_show(opts: ShowOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let epic = tracker
        .get_epic(opts.id)?
        .ok_or_else(|| Error::InvalidArgument(format!("epic not found: {}", opts.id)))?;

    let mut human = HumanOutput::new(item_line(&epic, "EPIC"));
    if !epic.task.description.is_empty() {
        human.push_detail(epic.task.description.clone());
    }
    let subtask_ids: Vec<String> = epic.subtask_ids.iter().map(u32::to_string).collect();
    human.push_summary(
        "subtasks",
        if subtask_ids.is_empty() {
            "none".to_string()
        } else {
            subtask_ids.join(", ")
        },
    );

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic show",
        &EpicReport { epic },
        Some(&human),
    )
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let mut epic = tracker
        .all_epics()
        .into_iter()
        .find(|epic| epic.task.id == opts.id)
        .ok_or_else(|| Error::InvalidArgument(format!("epic not found: {}", opts.id)))?;

    if let Some(name) = opts.name {
        epic.task.name = name;
    }
    if let Some(description) = opts.description {
        epic.task.description = description;
    }

    if !tracker.update_epic(epic.clone())? {
        return Err(Error::InvalidArgument(format!(
            "epic not found: {}",
            opts.id
        )));
    }

    let human = HumanOutput::new(format!("trk epic edit: updated {}", item_line(&epic, "EPIC")));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic edit",
        &EpicReport { epic },
        Some(&human),
    )
}

pub fn run_rm(opts: RmOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    tracker.delete_epic(opts.id)?;

    let human = HumanOutput::new(format!(
        "trk epic rm: removed epic #{} and its subtasks",
        opts.id
    ));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic rm",
        &RemovedReport { id: opts.id },
        Some(&human),
    )
}

pub fn run_clear(opts: ClearOptions) -> Result<()> {
    let mut tracker = open_tracker(&opts.root)?;
    let removed_epics = tracker.all_epics().len();
    let removed_subtasks = tracker.all_subtasks().len();
    tracker.delete_all_epics()?;

    let human = HumanOutput::new(format!(
        "trk epic clear: removed {removed_epics} epic(s) and {removed_subtasks} subtask(s)"
    ));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic clear",
        &ClearedReport {
            removed_epics,
            removed_subtasks,
        },
        Some(&human),
    )
}

pub fn run_subtasks(opts: SubtasksOptions) -> Result<()> {
    let tracker = open_tracker(&opts.root)?;
    if !tracker
        .all_epics()
        .iter()
        .any(|epic| epic.task.id == opts.id)
    {
        return Err(Error::InvalidArgument(format!(
            "epic not found: {}",
            opts.id
        )));
    }
    let subtasks = tracker.subtasks_of_epic(opts.id);

    let mut human = HumanOutput::new(format!(
        "trk epic subtasks: {} subtask(s) in epic #{}",
        subtasks.len(),
        opts.id
    ));
    for subtask in &subtasks {
        human.push_detail(item_line(subtask, "SUBTASK"));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "epic subtasks",
        &SubtaskListReport {
            epic_id: opts.id,
            count: subtasks.len(),
            subtasks,
        },
        Some(&human),
    )
}
