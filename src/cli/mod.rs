//! Command-line interface for trk
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand family is implemented in its own submodule.

use std::path::PathBuf;

use chrono::{Duration, NaiveDateTime};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Status, WorkItem};
use crate::store::FileBackedManager;
use crate::timefmt;

mod epic;
mod init;
mod listing;
mod subtask;
mod task;

/// trk - task tracker
///
/// A file-backed tracker for plain tasks, epics, and subtasks. Epic status
/// and time windows are derived from subtasks, and scheduled items are kept
/// free of time overlaps.
#[derive(Parser, Debug)]
#[command(name = "trk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the tracker root (defaults to current directory)
    #[arg(long, global = true, env = "TRK_ROOT")]
    pub root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a tracker in the root directory
    Init,

    /// Plain task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Epic management (containers of subtasks)
    #[command(subcommand)]
    Epic(EpicCommands),

    /// Subtask management
    #[command(subcommand)]
    Subtask(SubtaskCommands),

    /// Show all scheduled items ordered by start time
    Prioritized,

    /// Show recently viewed items
    History,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task name
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Status: NEW, IN_PROGRESS, DONE
        #[arg(long, default_value = "NEW")]
        status: String,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<i64>,

        /// Start time, e.g. "02.06.2025 10:00"
        #[arg(long)]
        start: Option<String>,
    },

    /// List all tasks
    Ls,

    /// Show one task (records a view in history)
    Show {
        /// Task id
        id: u32,
    },

    /// Update fields of a task
    Edit {
        /// Task id
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Status: NEW, IN_PROGRESS, DONE
        #[arg(long)]
        status: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<i64>,

        /// Start time, e.g. "02.06.2025 10:00"
        #[arg(long)]
        start: Option<String>,
    },

    /// Delete one task
    Rm {
        /// Task id
        id: u32,
    },

    /// Delete all tasks
    Clear,
}

/// Epic subcommands
#[derive(Subcommand, Debug)]
pub enum EpicCommands {
    /// Create an epic (status and schedule are derived from subtasks)
    Add {
        /// Epic name
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// List all epics
    Ls,

    /// Show one epic (records a view in history)
    Show {
        /// Epic id
        id: u32,
    },

    /// Rename an epic or change its description
    Edit {
        /// Epic id
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete one epic and all of its subtasks
    Rm {
        /// Epic id
        id: u32,
    },

    /// Delete all epics and subtasks
    Clear,

    /// List the subtasks of one epic
    Subtasks {
        /// Epic id
        id: u32,
    },
}

/// Subtask subcommands
#[derive(Subcommand, Debug)]
pub enum SubtaskCommands {
    /// Create a subtask under an epic
    Add {
        /// Subtask name
        name: String,

        /// Owning epic id
        #[arg(long)]
        epic: u32,

        #[arg(long, default_value = "")]
        description: String,

        /// Status: NEW, IN_PROGRESS, DONE
        #[arg(long, default_value = "NEW")]
        status: String,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<i64>,

        /// Start time, e.g. "02.06.2025 10:00"
        #[arg(long)]
        start: Option<String>,
    },

    /// List all subtasks
    Ls,

    /// Show one subtask (records a view in history)
    Show {
        /// Subtask id
        id: u32,
    },

    /// Update fields of a subtask; --epic moves it to another epic
    Edit {
        /// Subtask id
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Status: NEW, IN_PROGRESS, DONE
        #[arg(long)]
        status: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<i64>,

        /// Start time, e.g. "02.06.2025 10:00"
        #[arg(long)]
        start: Option<String>,

        /// Move to this epic
        #[arg(long)]
        epic: Option<u32>,
    },

    /// Delete one subtask
    Rm {
        /// Subtask id
        id: u32,
    },

    /// Delete all subtasks
    Clear,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => init::run(self.root, self.json, self.quiet),
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    name,
                    description,
                    status,
                    duration,
                    start,
                } => task::run_add(task::AddOptions {
                    name,
                    description,
                    status,
                    duration,
                    start,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Ls => task::run_ls(task::LsOptions {
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Show { id } => task::run_show(task::ShowOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    id,
                    name,
                    description,
                    status,
                    duration,
                    start,
                } => task::run_edit(task::EditOptions {
                    id,
                    name,
                    description,
                    status,
                    duration,
                    start,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Clear => task::run_clear(task::ClearOptions {
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Epic(cmd) => match cmd {
                EpicCommands::Add { name, description } => epic::run_add(epic::AddOptions {
                    name,
                    description,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                EpicCommands::Ls => epic::run_ls(epic::LsOptions {
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                EpicCommands::Show { id } => epic::run_show(epic::ShowOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                EpicCommands::Edit {
                    id,
                    name,
                    description,
                } => epic::run_edit(epic::EditOptions {
                    id,
                    name,
                    description,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                EpicCommands::Rm { id } => epic::run_rm(epic::RmOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                EpicCommands::Clear => epic::run_clear(epic::ClearOptions {
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                EpicCommands::Subtasks { id } => epic::run_subtasks(epic::SubtasksOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Subtask(cmd) => match cmd {
                SubtaskCommands::Add {
                    name,
                    epic,
                    description,
                    status,
                    duration,
                    start,
                } => subtask::run_add(subtask::AddOptions {
                    name,
                    epic,
                    description,
                    status,
                    duration,
                    start,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SubtaskCommands::Ls => subtask::run_ls(subtask::LsOptions {
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SubtaskCommands::Show { id } => subtask::run_show(subtask::ShowOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SubtaskCommands::Edit {
                    id,
                    name,
                    description,
                    status,
                    duration,
                    start,
                    epic,
                } => subtask::run_edit(subtask::EditOptions {
                    id,
                    name,
                    description,
                    status,
                    duration,
                    start,
                    epic,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SubtaskCommands::Rm { id } => subtask::run_rm(subtask::RmOptions {
                    id,
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SubtaskCommands::Clear => subtask::run_clear(subtask::ClearOptions {
                    root: self.root,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Prioritized => listing::run_prioritized(listing::ListingOptions {
                root: self.root,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::History => listing::run_history(listing::ListingOptions {
                root: self.root,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}

// =============================================================================
// Shared helpers for command modules
// =============================================================================

pub(crate) fn resolve_root(root: &Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Open the tracker backing file configured for the given root.
pub(crate) fn open_tracker(root: &Option<PathBuf>) -> Result<FileBackedManager> {
    let root = resolve_root(root)?;
    let config = Config::load_from_root(&root);
    config.validate()?;
    FileBackedManager::open(config.data_file(&root))
}

pub(crate) fn parse_status(value: &str) -> Result<Status> {
    Status::from_tag(value)
        .ok_or_else(|| Error::InvalidArgument(format!("unknown status '{value}'")))
}

pub(crate) fn parse_duration(minutes: Option<i64>) -> Result<Option<Duration>> {
    match minutes {
        Some(minutes) => Duration::try_minutes(minutes)
            .map(Some)
            .ok_or_else(|| Error::InvalidArgument(format!("duration out of range: {minutes}"))),
        None => Ok(None),
    }
}

pub(crate) fn parse_start(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value {
        Some(raw) => timefmt::parse_stamp(raw).map(Some).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "invalid start time {raw:?}, expected \"dd.mm.yyyy HH:MM\""
            ))
        }),
        None => Ok(None),
    }
}

/// One-line human rendering for listings.
pub(crate) fn item_line(item: &impl WorkItem, kind: &str) -> String {
    let window = match (item.start_time(), item.duration()) {
        (Some(start), Some(duration)) => format!(
            " [{} +{}m]",
            timefmt::format_stamp(start),
            duration.num_minutes()
        ),
        (Some(start), None) => format!(" [{}]", timefmt::format_stamp(start)),
        _ => String::new(),
    };
    format!("#{} {} {} ({}){}", item.id(), kind, item.name(), item.status(), window)
}
