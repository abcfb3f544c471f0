//! Epic aggregation.
//!
//! An epic's status and time window are derived from its live subtasks and
//! never accepted from callers. The computation here is pure; the store
//! re-runs it after every subtask mutation.

use chrono::{Duration, NaiveDateTime};

use crate::model::{Epic, Status, Subtask, WorkItem};

/// Derived epic state: status plus the aggregate time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollup {
    pub status: Status,
    pub start_time: Option<NaiveDateTime>,
    pub duration: Duration,
    pub end_time: Option<NaiveDateTime>,
}

impl Rollup {
    /// The state of an epic with no subtasks.
    pub fn empty() -> Self {
        Self {
            status: Status::New,
            start_time: None,
            duration: Duration::zero(),
            end_time: None,
        }
    }

    /// Write the derived state into an epic.
    pub fn apply(&self, epic: &mut Epic) {
        epic.task.status = self.status;
        epic.task.start_time = self.start_time;
        epic.task.duration = Some(self.duration);
        epic.end_time = self.end_time;
    }
}

/// Aggregate the given subtasks.
///
/// Status: NEW when the set is empty or all subtasks are NEW, DONE when
/// non-empty and all are DONE, IN_PROGRESS otherwise. Start is the earliest
/// subtask start, duration the sum of subtask durations, end the latest
/// subtask end.
pub fn rollup(subtasks: &[&Subtask]) -> Rollup {
    if subtasks.is_empty() {
        return Rollup::empty();
    }

    let mut all_new = true;
    let mut all_done = true;
    let mut start_time: Option<NaiveDateTime> = None;
    let mut end_time: Option<NaiveDateTime> = None;
    let mut duration = Duration::zero();

    for subtask in subtasks {
        match subtask.task.status {
            Status::New => all_done = false,
            Status::Done => all_new = false,
            Status::InProgress => {
                all_new = false;
                all_done = false;
            }
        }

        if let Some(start) = subtask.task.start_time {
            start_time = Some(start_time.map_or(start, |current| current.min(start)));
        }
        if let Some(step) = subtask.task.duration {
            duration = duration + step;
        }
        if let Some(end) = subtask.end_time() {
            end_time = Some(end_time.map_or(end, |current| current.max(end)));
        }
    }

    let status = if all_new {
        Status::New
    } else if all_done {
        Status::Done
    } else {
        Status::InProgress
    };

    Rollup {
        status,
        start_time,
        duration,
        end_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subtask;
    use chrono::NaiveDate;

    fn stamp(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn subtask(status: Status) -> Subtask {
        Subtask::new("step", "", status, 1)
    }

    #[test]
    fn empty_set_is_new_with_zero_duration() {
        let derived = rollup(&[]);
        assert_eq!(derived.status, Status::New);
        assert_eq!(derived.duration, Duration::zero());
        assert_eq!(derived.start_time, None);
        assert_eq!(derived.end_time, None);
    }

    #[test]
    fn all_new_is_new() {
        let a = subtask(Status::New);
        let b = subtask(Status::New);
        assert_eq!(rollup(&[&a, &b]).status, Status::New);
    }

    #[test]
    fn all_done_is_done() {
        let a = subtask(Status::Done);
        let b = subtask(Status::Done);
        assert_eq!(rollup(&[&a, &b]).status, Status::Done);
    }

    #[test]
    fn mixed_is_in_progress() {
        let a = subtask(Status::New);
        let b = subtask(Status::Done);
        assert_eq!(rollup(&[&a, &b]).status, Status::InProgress);

        let c = subtask(Status::InProgress);
        assert_eq!(rollup(&[&c]).status, Status::InProgress);
    }

    #[test]
    fn window_spans_earliest_start_to_latest_end() {
        let mut early = subtask(Status::New);
        early.task = early.task.scheduled(stamp(9, 0), Duration::minutes(30));

        let mut late = subtask(Status::New);
        late.task = late.task.scheduled(stamp(12, 0), Duration::minutes(60));

        let derived = rollup(&[&late, &early]);
        assert_eq!(derived.start_time, Some(stamp(9, 0)));
        assert_eq!(derived.duration, Duration::minutes(90));
        assert_eq!(derived.end_time, Some(stamp(13, 0)));
    }

    #[test]
    fn undated_subtasks_contribute_status_only() {
        let mut dated = subtask(Status::Done);
        dated.task = dated.task.scheduled(stamp(10, 0), Duration::minutes(15));
        let undated = subtask(Status::Done);

        let derived = rollup(&[&dated, &undated]);
        assert_eq!(derived.status, Status::Done);
        assert_eq!(derived.start_time, Some(stamp(10, 0)));
        assert_eq!(derived.duration, Duration::minutes(15));
        assert_eq!(derived.end_time, Some(stamp(10, 15)));
    }

    #[test]
    fn apply_writes_derived_fields() {
        let mut epic = Epic::new("release", "");
        let mut step = subtask(Status::InProgress);
        step.task = step.task.scheduled(stamp(10, 0), Duration::minutes(45));

        rollup(&[&step]).apply(&mut epic);
        assert_eq!(epic.task.status, Status::InProgress);
        assert_eq!(epic.task.start_time, Some(stamp(10, 0)));
        assert_eq!(epic.task.duration, Some(Duration::minutes(45)));
        assert_eq!(epic.end_time, Some(stamp(10, 45)));
    }
}
