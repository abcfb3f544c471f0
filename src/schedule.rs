//! Priority and overlap index.
//!
//! Tracks every live task and subtask (epics are never indexed) and answers
//! two questions: the start-time ordering of all items, and whether a
//! candidate time window would collide with an already scheduled one.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::model::Kind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    kind: Kind,
    start: Option<NaiveDateTime>,
    // Present only when both start and duration are; an item without a
    // full window never participates in conflict checks.
    end: Option<NaiveDateTime>,
}

/// Index over scheduled items, keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    slots: HashMap<u32, Slot>,
}

impl Schedule {
    /// Insert or replace an item's slot.
    pub fn upsert(
        &mut self,
        id: u32,
        kind: Kind,
        start: Option<NaiveDateTime>,
        duration: Option<Duration>,
    ) {
        let end = match (start, duration) {
            (Some(start), Some(duration)) => Some(start + duration),
            _ => None,
        };
        self.slots.insert(id, Slot { kind, start, end });
    }

    pub fn remove(&mut self, id: u32) {
        self.slots.remove(&id);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check a candidate window against every indexed item except `exclude`.
    ///
    /// A candidate without both start and duration never conflicts. Returns
    /// the lowest conflicting item id, if any.
    pub fn conflict(
        &self,
        start: Option<NaiveDateTime>,
        duration: Option<Duration>,
        exclude: Option<u32>,
    ) -> Option<u32> {
        let (start, duration) = match (start, duration) {
            (Some(start), Some(duration)) => (start, duration),
            _ => return None,
        };
        let end = start + duration;

        self.slots
            .iter()
            .filter(|(id, _)| Some(**id) != exclude)
            .filter_map(|(id, slot)| match (slot.start, slot.end) {
                (Some(other_start), Some(other_end))
                    if overlaps(start, end, other_start, other_end) =>
                {
                    Some(*id)
                }
                _ => None,
            })
            .min()
    }

    /// All item ids ordered by ascending start time; items without a start
    /// come after every item with one, ties break by id.
    pub fn ordered(&self) -> Vec<(u32, Kind)> {
        let mut entries: Vec<(u32, Kind, Option<NaiveDateTime>)> = self
            .slots
            .iter()
            .map(|(id, slot)| (*id, slot.kind, slot.start))
            .collect();

        entries.sort_by(|left, right| match (left.2, right.2) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| left.0.cmp(&right.0)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => left.0.cmp(&right.0),
        });

        entries
            .into_iter()
            .map(|(id, kind, _)| (id, kind))
            .collect()
    }
}

/// Half-open interval intersection: `[a_start, a_end)` vs `[b_start, b_end)`.
fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    !(a_end <= b_start || b_end <= a_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn minutes(count: i64) -> Duration {
        Duration::minutes(count)
    }

    #[test]
    fn detects_overlapping_windows() {
        let mut schedule = Schedule::default();
        schedule.upsert(1, Kind::Task, Some(stamp(10, 0)), Some(minutes(60)));

        assert_eq!(
            schedule.conflict(Some(stamp(10, 30)), Some(minutes(60)), None),
            Some(1)
        );
        assert_eq!(
            schedule.conflict(Some(stamp(9, 0)), Some(minutes(90)), None),
            Some(1)
        );
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let mut schedule = Schedule::default();
        schedule.upsert(1, Kind::Task, Some(stamp(10, 0)), Some(minutes(60)));

        assert_eq!(
            schedule.conflict(Some(stamp(11, 0)), Some(minutes(60)), None),
            None
        );
        assert_eq!(
            schedule.conflict(Some(stamp(9, 0)), Some(minutes(60)), None),
            None
        );
    }

    #[test]
    fn partial_windows_never_conflict() {
        let mut schedule = Schedule::default();
        schedule.upsert(1, Kind::Task, Some(stamp(10, 0)), Some(minutes(60)));

        assert_eq!(schedule.conflict(None, Some(minutes(60)), None), None);
        assert_eq!(schedule.conflict(Some(stamp(10, 0)), None, None), None);

        // Indexed items without a full window are transparent too.
        schedule.upsert(2, Kind::Subtask, Some(stamp(10, 0)), None);
        assert_eq!(
            schedule.conflict(Some(stamp(10, 0)), Some(minutes(30)), Some(1)),
            None
        );
    }

    #[test]
    fn exclude_skips_the_items_own_slot() {
        let mut schedule = Schedule::default();
        schedule.upsert(1, Kind::Task, Some(stamp(10, 0)), Some(minutes(60)));

        // Re-scheduling item 1 inside its own window is fine.
        assert_eq!(
            schedule.conflict(Some(stamp(10, 15)), Some(minutes(30)), Some(1)),
            None
        );
        assert_eq!(
            schedule.conflict(Some(stamp(10, 15)), Some(minutes(30)), None),
            Some(1)
        );
    }

    #[test]
    fn ordered_puts_undated_items_last() {
        let mut schedule = Schedule::default();
        schedule.upsert(3, Kind::Task, None, None);
        schedule.upsert(1, Kind::Task, Some(stamp(11, 0)), Some(minutes(30)));
        schedule.upsert(2, Kind::Subtask, Some(stamp(9, 0)), Some(minutes(30)));
        schedule.upsert(4, Kind::Task, None, Some(minutes(15)));

        let ids: Vec<u32> = schedule.ordered().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn remove_clears_the_slot() {
        let mut schedule = Schedule::default();
        schedule.upsert(1, Kind::Task, Some(stamp(10, 0)), Some(minutes(60)));
        schedule.remove(1);

        assert!(!schedule.contains(1));
        assert_eq!(
            schedule.conflict(Some(stamp(10, 0)), Some(minutes(60)), None),
            None
        );
    }
}
