//! Text codec for the full tracker state.
//!
//! One document holds the whole store plus the view history:
//!
//! ```text
//! id,type,name,status,description,duration,start,epic
//! 1,TASK,Call team,NEW,weekly sync,30,02.06.2025 10:00
//! 2,EPIC,Release,IN_PROGRESS,ship 1.0,45,02.06.2025 12:00
//! 3,SUBTASK,Write notes,IN_PROGRESS,changelog,45,02.06.2025 12:00,2
//!
//! 3,1
//! ```
//!
//! Tasks come first, then epics, then subtasks; only subtask rows carry the
//! trailing epic id. Durations are whole minutes, timestamps use
//! `dd.MM.yyyy HH:mm`, absent values are empty fields. After a blank
//! separator the last line lists history ids oldest first, omitted when the
//! history is empty.
//!
//! Values are stored verbatim, so a name or description containing the
//! delimiter or a newline cannot be encoded; `encode` rejects it rather
//! than writing a document that would not round-trip.

use crate::error::{Error, Result};
use crate::manager::TaskManager;
use crate::model::{Epic, Item, Kind, Status, Subtask, Task};
use crate::timefmt;

/// Column header, written as the first line of every document.
pub const HEADER: &str = "id,type,name,status,description,duration,start,epic";

const DELIMITER: char = ',';

/// Serialize the full store and history into one document.
pub fn encode(manager: &TaskManager) -> Result<String> {
    let mut lines = Vec::new();
    lines.push(HEADER.to_string());

    for task in manager.all_tasks() {
        lines.push(entity_row(&task, Kind::Task, None)?);
    }
    for epic in manager.all_epics() {
        lines.push(entity_row(&epic.task, Kind::Epic, None)?);
    }
    for subtask in manager.all_subtasks() {
        lines.push(entity_row(&subtask.task, Kind::Subtask, Some(subtask.epic_id))?);
    }

    lines.push(String::new());

    let history = manager.history_ids();
    if !history.is_empty() {
        let joined: Vec<String> = history.iter().map(u32::to_string).collect();
        lines.push(joined.join(","));
    }

    let mut document = lines.join("\n");
    document.push('\n');
    Ok(document)
}

/// Parse a document back into a store.
///
/// Fails on an empty document, an unknown kind tag, a wrong field count,
/// an unparseable number or timestamp, or a subtask referencing a missing
/// epic. Nothing partial is ever returned.
pub fn decode(input: &str) -> Result<TaskManager> {
    let lines: Vec<&str> = input.lines().collect();
    if lines.iter().all(|line| line.trim().is_empty()) {
        return Err(Error::Corrupt("document is empty".to_string()));
    }

    let mut tasks = Vec::new();
    let mut epics = Vec::new();
    let mut subtasks = Vec::new();

    let mut index = 1; // skip the header
    while index < lines.len() && !lines[index].trim().is_empty() {
        match parse_row(lines[index], index + 1)? {
            Item::Task(task) => tasks.push(task),
            Item::Epic(epic) => epics.push(epic),
            Item::Subtask(subtask) => subtasks.push(subtask),
        }
        index += 1;
    }

    while index < lines.len() && lines[index].trim().is_empty() {
        index += 1;
    }

    let mut history = Vec::new();
    if index < lines.len() {
        for raw in lines[index].split(DELIMITER) {
            let id: u32 = raw.trim().parse().map_err(|_| {
                corrupt(index + 1, format!("invalid history id {:?}", raw.trim()))
            })?;
            history.push(id);
        }
    }

    TaskManager::from_parts(tasks, epics, subtasks, history)
}

fn entity_row(task: &Task, kind: Kind, epic_id: Option<u32>) -> Result<String> {
    let name = checked_field(&task.name)?;
    let description = checked_field(&task.description)?;
    let duration = task
        .duration
        .map(timefmt::format_minutes)
        .unwrap_or_default();
    let start = task
        .start_time
        .map(timefmt::format_stamp)
        .unwrap_or_default();

    let mut row = format!(
        "{},{},{},{},{},{},{}",
        task.id,
        kind.as_tag(),
        name,
        task.status.as_tag(),
        description,
        duration,
        start
    );
    if let Some(epic_id) = epic_id {
        row.push(DELIMITER);
        row.push_str(&epic_id.to_string());
    }
    Ok(row)
}

fn checked_field(value: &str) -> Result<&str> {
    if value.contains(DELIMITER) || value.contains('\n') || value.contains('\r') {
        return Err(Error::Corrupt(format!(
            "value cannot contain the field delimiter or line breaks: {value:?}"
        )));
    }
    Ok(value)
}

fn parse_row(line: &str, line_no: usize) -> Result<Item> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() < 7 {
        return Err(corrupt(line_no, "expected at least 7 fields"));
    }

    let id: u32 = fields[0]
        .trim()
        .parse()
        .map_err(|_| corrupt(line_no, format!("invalid id {:?}", fields[0])))?;
    let kind = Kind::from_tag(fields[1])
        .ok_or_else(|| corrupt(line_no, format!("unknown kind tag {:?}", fields[1])))?;
    let status = Status::from_tag(fields[3])
        .ok_or_else(|| corrupt(line_no, format!("unknown status {:?}", fields[3])))?;

    let duration = match fields[5].trim() {
        "" => None,
        raw => Some(
            timefmt::parse_minutes(raw)
                .ok_or_else(|| corrupt(line_no, format!("invalid duration {raw:?}")))?,
        ),
    };
    let start_time = match fields[6].trim() {
        "" => None,
        raw => Some(
            timefmt::parse_stamp(raw)
                .ok_or_else(|| corrupt(line_no, format!("invalid start time {raw:?}")))?,
        ),
    };

    let task = Task {
        id,
        name: fields[2].to_string(),
        description: fields[4].to_string(),
        status,
        duration,
        start_time,
    };

    match kind {
        Kind::Task => {
            expect_fields(&fields, 7, line_no)?;
            Ok(Item::Task(task))
        }
        Kind::Epic => {
            expect_fields(&fields, 7, line_no)?;
            Ok(Item::Epic(Epic {
                task,
                subtask_ids: Vec::new(),
                end_time: None,
            }))
        }
        Kind::Subtask => {
            expect_fields(&fields, 8, line_no)?;
            let epic_id: u32 = fields[7]
                .trim()
                .parse()
                .map_err(|_| corrupt(line_no, format!("invalid epic id {:?}", fields[7])))?;
            Ok(Item::Subtask(Subtask { task, epic_id }))
        }
    }
}

fn expect_fields(fields: &[&str], count: usize, line_no: usize) -> Result<()> {
    if fields.len() != count {
        return Err(corrupt(
            line_no,
            format!("expected {count} fields, found {}", fields.len()),
        ));
    }
    Ok(())
}

fn corrupt(line_no: usize, message: impl Into<String>) -> Error {
    Error::Corrupt(format!("line {line_no}: {}", message.into()))
}
