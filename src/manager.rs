//! In-memory task store.
//!
//! `TaskManager` owns the three entity maps and the id allocator, and keeps
//! the schedule index, epic aggregates, and view history consistent within
//! each call. Every rejection path runs before any state is touched, so a
//! failed call leaves the whole store unchanged.
//!
//! Return conventions: create returns `Ok(None)` when the draft is not
//! created (duplicate id, missing epic), update returns `Ok(false)` when
//! the id is unknown. Overlaps surface as `Error::ScheduleConflict`.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::history::History;
use crate::model::{Epic, Item, Kind, Subtask, Task};
use crate::rollup;
use crate::schedule::Schedule;

#[derive(Debug, Clone, Default)]
pub struct TaskManager {
    tasks: HashMap<u32, Task>,
    epics: HashMap<u32, Epic>,
    subtasks: HashMap<u32, Subtask>,
    next_id: u32,
    schedule: Schedule,
    history: History,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Store a new task under a freshly allocated id.
    ///
    /// `Ok(None)` when a task with the draft's id already exists.
    pub fn create_task(&mut self, mut task: Task) -> Result<Option<u32>> {
        if self.tasks.contains_key(&task.id) {
            return Ok(None);
        }
        if let Some(other) = self.schedule.conflict(task.start_time, task.duration, None) {
            return Err(Error::ScheduleConflict { other });
        }

        let id = self.allocate_id();
        task.id = id;
        self.schedule
            .upsert(id, Kind::Task, task.start_time, task.duration);
        self.tasks.insert(id, task);
        Ok(Some(id))
    }

    /// Replace a stored task. `Ok(false)` when the id is unknown.
    pub fn update_task(&mut self, task: Task) -> Result<bool> {
        if !self.tasks.contains_key(&task.id) {
            return Ok(false);
        }
        if let Some(other) = self
            .schedule
            .conflict(task.start_time, task.duration, Some(task.id))
        {
            return Err(Error::ScheduleConflict { other });
        }

        self.schedule
            .upsert(task.id, Kind::Task, task.start_time, task.duration);
        self.tasks.insert(task.id, task);
        Ok(true)
    }

    /// Fetch a task and record the view in history.
    pub fn get_task(&mut self, id: u32) -> Option<Task> {
        let task = self.tasks.get(&id).cloned();
        if task.is_some() {
            self.history.record(id);
        }
        task
    }

    pub fn all_tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| task.id);
        tasks
    }

    pub fn delete_task(&mut self, id: u32) {
        if self.tasks.remove(&id).is_some() {
            self.schedule.remove(id);
            self.history.remove(id);
        }
    }

    pub fn delete_all_tasks(&mut self) {
        let ids: Vec<u32> = self.tasks.keys().copied().collect();
        for id in ids {
            self.schedule.remove(id);
            self.history.remove(id);
        }
        self.tasks.clear();
    }

    // =========================================================================
    // Epics
    // =========================================================================

    /// Store a new epic. Derived fields on the draft are discarded and
    /// reset to the empty aggregate. `None` when the draft's id exists.
    pub fn create_epic(&mut self, mut epic: Epic) -> Option<u32> {
        if self.epics.contains_key(&epic.task.id) {
            return None;
        }

        let id = self.allocate_id();
        epic.task.id = id;
        epic.subtask_ids.clear();
        rollup::Rollup::empty().apply(&mut epic);
        self.epics.insert(id, epic);
        Some(id)
    }

    /// Update an epic's caller-settable fields (name and description).
    /// Status, time window, and the subtask list are derived and preserved.
    pub fn update_epic(&mut self, epic: Epic) -> bool {
        match self.epics.get_mut(&epic.task.id) {
            Some(stored) => {
                stored.task.name = epic.task.name;
                stored.task.description = epic.task.description;
                true
            }
            None => false,
        }
    }

    /// Fetch an epic and record the view in history.
    pub fn get_epic(&mut self, id: u32) -> Option<Epic> {
        let epic = self.epics.get(&id).cloned();
        if epic.is_some() {
            self.history.record(id);
        }
        epic
    }

    pub fn all_epics(&self) -> Vec<Epic> {
        let mut epics: Vec<Epic> = self.epics.values().cloned().collect();
        epics.sort_by_key(|epic| epic.task.id);
        epics
    }

    /// Delete an epic and cascade to every owned subtask.
    pub fn delete_epic(&mut self, id: u32) {
        if let Some(epic) = self.epics.remove(&id) {
            self.history.remove(id);
            for subtask_id in epic.subtask_ids {
                self.subtasks.remove(&subtask_id);
                self.schedule.remove(subtask_id);
                self.history.remove(subtask_id);
            }
        }
    }

    /// Delete every epic, cascading to every subtask.
    pub fn delete_all_epics(&mut self) {
        let epic_ids: Vec<u32> = self.epics.keys().copied().collect();
        for id in epic_ids {
            self.history.remove(id);
        }
        let subtask_ids: Vec<u32> = self.subtasks.keys().copied().collect();
        for id in subtask_ids {
            self.schedule.remove(id);
            self.history.remove(id);
        }
        self.epics.clear();
        self.subtasks.clear();
    }

    // =========================================================================
    // Subtasks
    // =========================================================================

    /// Store a new subtask under its epic. `Ok(None)` when the draft's id
    /// already exists or the referenced epic does not.
    pub fn create_subtask(&mut self, mut subtask: Subtask) -> Result<Option<u32>> {
        if self.subtasks.contains_key(&subtask.task.id) {
            return Ok(None);
        }
        if !self.epics.contains_key(&subtask.epic_id) {
            return Ok(None);
        }
        if let Some(other) =
            self.schedule
                .conflict(subtask.task.start_time, subtask.task.duration, None)
        {
            return Err(Error::ScheduleConflict { other });
        }

        let id = self.allocate_id();
        subtask.task.id = id;
        let epic_id = subtask.epic_id;
        self.schedule
            .upsert(id, Kind::Subtask, subtask.task.start_time, subtask.task.duration);
        self.subtasks.insert(id, subtask);
        if let Some(epic) = self.epics.get_mut(&epic_id) {
            epic.add_subtask_id(id);
        }
        self.refresh_epic(epic_id);
        Ok(Some(id))
    }

    /// Replace a stored subtask. A changed `epic_id` transfers ownership:
    /// the subtask leaves the old epic's list, joins the new one's, and
    /// both aggregates are recomputed. `Ok(false)` when the subtask or the
    /// target epic is unknown.
    pub fn update_subtask(&mut self, subtask: Subtask) -> Result<bool> {
        let id = subtask.task.id;
        let previous_epic = match self.subtasks.get(&id) {
            Some(previous) => previous.epic_id,
            None => return Ok(false),
        };
        if !self.epics.contains_key(&subtask.epic_id) {
            return Ok(false);
        }
        if let Some(other) =
            self.schedule
                .conflict(subtask.task.start_time, subtask.task.duration, Some(id))
        {
            return Err(Error::ScheduleConflict { other });
        }

        let new_epic = subtask.epic_id;
        self.schedule
            .upsert(id, Kind::Subtask, subtask.task.start_time, subtask.task.duration);
        self.subtasks.insert(id, subtask);

        if previous_epic != new_epic {
            if let Some(old) = self.epics.get_mut(&previous_epic) {
                old.remove_subtask_id(id);
            }
            if let Some(new) = self.epics.get_mut(&new_epic) {
                new.add_subtask_id(id);
            }
            self.refresh_epic(previous_epic);
        }
        self.refresh_epic(new_epic);
        Ok(true)
    }

    /// Move a subtask to another epic, keeping its other fields.
    pub fn move_subtask(&mut self, id: u32, epic_id: u32) -> Result<bool> {
        let mut subtask = match self.subtasks.get(&id) {
            Some(subtask) => subtask.clone(),
            None => return Ok(false),
        };
        subtask.epic_id = epic_id;
        self.update_subtask(subtask)
    }

    /// Fetch a subtask and record the view in history.
    pub fn get_subtask(&mut self, id: u32) -> Option<Subtask> {
        let subtask = self.subtasks.get(&id).cloned();
        if subtask.is_some() {
            self.history.record(id);
        }
        subtask
    }

    pub fn all_subtasks(&self) -> Vec<Subtask> {
        let mut subtasks: Vec<Subtask> = self.subtasks.values().cloned().collect();
        subtasks.sort_by_key(|subtask| subtask.task.id);
        subtasks
    }

    pub fn delete_subtask(&mut self, id: u32) {
        if let Some(subtask) = self.subtasks.remove(&id) {
            self.schedule.remove(id);
            self.history.remove(id);
            if let Some(epic) = self.epics.get_mut(&subtask.epic_id) {
                epic.remove_subtask_id(id);
            }
            self.refresh_epic(subtask.epic_id);
        }
    }

    /// Delete every subtask, resetting every epic to the empty aggregate.
    pub fn delete_all_subtasks(&mut self) {
        let subtask_ids: Vec<u32> = self.subtasks.keys().copied().collect();
        for id in subtask_ids {
            self.schedule.remove(id);
            self.history.remove(id);
        }
        self.subtasks.clear();

        let epic_ids: Vec<u32> = self.epics.keys().copied().collect();
        for id in epic_ids {
            if let Some(epic) = self.epics.get_mut(&id) {
                epic.subtask_ids.clear();
            }
            self.refresh_epic(id);
        }
    }

    /// Subtasks of one epic, in the epic's list order.
    pub fn subtasks_of_epic(&self, epic_id: u32) -> Vec<Subtask> {
        let Some(epic) = self.epics.get(&epic_id) else {
            return Vec::new();
        };
        epic.subtask_ids
            .iter()
            .filter_map(|id| self.subtasks.get(id))
            .cloned()
            .collect()
    }

    fn refresh_epic(&mut self, epic_id: u32) {
        let aggregate = {
            let Some(epic) = self.epics.get(&epic_id) else {
                return;
            };
            let owned: Vec<&Subtask> = epic
                .subtask_ids
                .iter()
                .filter_map(|id| self.subtasks.get(id))
                .collect();
            rollup::rollup(&owned)
        };
        if let Some(epic) = self.epics.get_mut(&epic_id) {
            aggregate.apply(epic);
        }
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// All tasks and subtasks ordered by ascending start time, undated
    /// items last. Epics are never included.
    pub fn prioritized(&self) -> Vec<Item> {
        self.schedule
            .ordered()
            .into_iter()
            .filter_map(|(id, kind)| match kind {
                Kind::Task => self.tasks.get(&id).cloned().map(Item::Task),
                Kind::Subtask => self.subtasks.get(&id).cloned().map(Item::Subtask),
                Kind::Epic => None,
            })
            .collect()
    }

    /// Recently viewed items, oldest first.
    pub fn history(&self) -> Vec<Item> {
        self.history.ids().filter_map(|id| self.item(id)).collect()
    }

    /// Recently viewed item ids, oldest first.
    pub fn history_ids(&self) -> Vec<u32> {
        self.history.ids().collect()
    }

    fn item(&self, id: u32) -> Option<Item> {
        if let Some(task) = self.tasks.get(&id) {
            return Some(Item::Task(task.clone()));
        }
        if let Some(epic) = self.epics.get(&id) {
            return Some(Item::Epic(epic.clone()));
        }
        self.subtasks.get(&id).cloned().map(Item::Subtask)
    }

    fn item_exists(&self, id: u32) -> bool {
        self.tasks.contains_key(&id)
            || self.epics.contains_key(&id)
            || self.subtasks.contains_key(&id)
    }

    // =========================================================================
    // Reconstruction
    // =========================================================================

    /// Rebuild a manager from decoded entities, as the persistence codec
    /// produces them.
    ///
    /// The allocator resumes past the highest id seen. Epic subtask lists
    /// are rebuilt from the subtasks' `epic_id` fields (a dangling
    /// reference rejects the whole document), every epic aggregate is
    /// recomputed, the schedule is repopulated, and the history ids are
    /// replayed with stale entries dropped.
    pub fn from_parts(
        tasks: Vec<Task>,
        epics: Vec<Epic>,
        subtasks: Vec<Subtask>,
        history: Vec<u32>,
    ) -> Result<Self> {
        let mut manager = TaskManager::new();

        for task in tasks {
            manager.next_id = manager.next_id.max(task.id);
            manager
                .schedule
                .upsert(task.id, Kind::Task, task.start_time, task.duration);
            manager.tasks.insert(task.id, task);
        }

        for mut epic in epics {
            manager.next_id = manager.next_id.max(epic.task.id);
            epic.subtask_ids.clear();
            manager.epics.insert(epic.task.id, epic);
        }

        for subtask in subtasks {
            let id = subtask.task.id;
            manager.next_id = manager.next_id.max(id);
            if subtask.epic_id == id {
                return Err(Error::Corrupt(format!(
                    "subtask {id} references itself as its epic"
                )));
            }
            let Some(epic) = manager.epics.get_mut(&subtask.epic_id) else {
                return Err(Error::Corrupt(format!(
                    "subtask {id} references missing epic {}",
                    subtask.epic_id
                )));
            };
            epic.add_subtask_id(id);
            manager
                .schedule
                .upsert(id, Kind::Subtask, subtask.task.start_time, subtask.task.duration);
            manager.subtasks.insert(id, subtask);
        }

        let epic_ids: Vec<u32> = manager.epics.keys().copied().collect();
        for id in epic_ids {
            manager.refresh_epic(id);
        }

        for id in history {
            if manager.item_exists(id) {
                manager.history.record(id);
            } else {
                debug!(id, "dropping stale history id");
            }
        }

        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn stamp(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn minutes(count: i64) -> Duration {
        Duration::minutes(count)
    }

    fn task(name: &str) -> Task {
        Task::new(name, "", Status::New)
    }

    #[test]
    fn ids_are_unique_across_kinds_and_never_reused() {
        let mut manager = TaskManager::new();
        let task_id = manager.create_task(task("a")).unwrap().unwrap();
        let epic_id = manager.create_epic(Epic::new("e", "")).unwrap();
        let subtask_id = manager
            .create_subtask(Subtask::new("s", "", Status::New, epic_id))
            .unwrap()
            .unwrap();

        assert_eq!((task_id, epic_id, subtask_id), (1, 2, 3));

        manager.delete_task(task_id);
        let next = manager.create_task(task("b")).unwrap().unwrap();
        assert_eq!(next, 4);
    }

    #[test]
    fn create_rejects_existing_id_without_mutating() {
        let mut manager = TaskManager::new();
        let id = manager.create_task(task("a")).unwrap().unwrap();

        let mut duplicate = task("b");
        duplicate.id = id;
        assert_eq!(manager.create_task(duplicate).unwrap(), None);
        assert_eq!(manager.all_tasks().len(), 1);
    }

    #[test]
    fn overlap_rejects_create_and_leaves_store_unchanged() {
        let mut manager = TaskManager::new();
        let first = task("a").scheduled(stamp(10, 0), minutes(60));
        let id = manager.create_task(first).unwrap().unwrap();

        let second = task("b").scheduled(stamp(10, 30), minutes(60));
        let err = manager.create_task(second).unwrap_err();
        assert!(matches!(err, Error::ScheduleConflict { other } if other == id));

        let tasks = manager.all_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(manager.prioritized().len(), 1);
    }

    #[test]
    fn adjacent_windows_are_accepted_in_start_order() {
        let mut manager = TaskManager::new();
        let a = manager
            .create_task(task("a").scheduled(stamp(10, 0), minutes(60)))
            .unwrap()
            .unwrap();
        let b = manager
            .create_task(task("b").scheduled(stamp(11, 0), minutes(60)))
            .unwrap()
            .unwrap();

        let order: Vec<u32> = manager
            .prioritized()
            .iter()
            .map(crate::model::WorkItem::id)
            .collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn prioritized_lists_undated_items_last_and_skips_epics() {
        let mut manager = TaskManager::new();
        let undated = manager.create_task(task("later")).unwrap().unwrap();
        let epic_id = manager.create_epic(Epic::new("e", "")).unwrap();
        let mut sub = Subtask::new("s", "", Status::New, epic_id);
        sub.task = sub.task.scheduled(stamp(9, 0), minutes(30));
        let dated = manager.create_subtask(sub).unwrap().unwrap();

        let order: Vec<u32> = manager
            .prioritized()
            .iter()
            .map(crate::model::WorkItem::id)
            .collect();
        assert_eq!(order, vec![dated, undated]);
    }

    #[test]
    fn update_may_keep_its_own_window() {
        let mut manager = TaskManager::new();
        let id = manager
            .create_task(task("a").scheduled(stamp(10, 0), minutes(60)))
            .unwrap()
            .unwrap();

        let mut update = task("a").scheduled(stamp(10, 15), minutes(30));
        update.id = id;
        assert!(manager.update_task(update).unwrap());
    }

    #[test]
    fn update_unknown_task_reports_not_found() {
        let mut manager = TaskManager::new();
        let mut ghost = task("ghost");
        ghost.id = 42;
        assert!(!manager.update_task(ghost).unwrap());
    }

    #[test]
    fn epic_status_follows_subtasks() {
        let mut manager = TaskManager::new();
        let epic_id = manager.create_epic(Epic::new("release", "")).unwrap();
        assert_eq!(manager.all_epics()[0].task.status, Status::New);

        let first = manager
            .create_subtask(Subtask::new("a", "", Status::New, epic_id))
            .unwrap()
            .unwrap();
        let second = manager
            .create_subtask(Subtask::new("b", "", Status::New, epic_id))
            .unwrap()
            .unwrap();
        assert_eq!(manager.all_epics()[0].task.status, Status::New);

        let mut done = manager.subtasks_of_epic(epic_id)[0].clone();
        done.task.status = Status::Done;
        manager.update_subtask(done).unwrap();
        assert_eq!(manager.all_epics()[0].task.status, Status::InProgress);

        for id in [first, second] {
            let mut sub = manager.all_subtasks().into_iter().find(|s| s.task.id == id).unwrap();
            sub.task.status = Status::Done;
            manager.update_subtask(sub).unwrap();
        }
        assert_eq!(manager.all_epics()[0].task.status, Status::Done);

        manager.delete_all_subtasks();
        let epic = &manager.all_epics()[0];
        assert_eq!(epic.task.status, Status::New);
        assert_eq!(epic.task.duration, Some(Duration::zero()));
        assert_eq!(epic.task.start_time, None);
        assert_eq!(epic.end_time, None);
    }

    #[test]
    fn epic_window_tracks_subtask_mutations() {
        let mut manager = TaskManager::new();
        let epic_id = manager.create_epic(Epic::new("release", "")).unwrap();

        let mut first = Subtask::new("a", "", Status::New, epic_id);
        first.task = first.task.scheduled(stamp(9, 0), minutes(30));
        manager.create_subtask(first).unwrap().unwrap();

        let mut second = Subtask::new("b", "", Status::New, epic_id);
        second.task = second.task.scheduled(stamp(12, 0), minutes(60));
        let second_id = manager.create_subtask(second).unwrap().unwrap();

        let epic = &manager.all_epics()[0];
        assert_eq!(epic.task.start_time, Some(stamp(9, 0)));
        assert_eq!(epic.task.duration, Some(minutes(90)));
        assert_eq!(epic.end_time, Some(stamp(13, 0)));

        manager.delete_subtask(second_id);
        let epic = &manager.all_epics()[0];
        assert_eq!(epic.task.duration, Some(minutes(30)));
        assert_eq!(epic.end_time, Some(stamp(9, 30)));
    }

    #[test]
    fn subtask_requires_existing_epic() {
        let mut manager = TaskManager::new();
        let created = manager
            .create_subtask(Subtask::new("s", "", Status::New, 99))
            .unwrap();
        assert_eq!(created, None);
        assert!(manager.all_subtasks().is_empty());
    }

    #[test]
    fn moving_a_subtask_refreshes_both_epics() {
        let mut manager = TaskManager::new();
        let source = manager.create_epic(Epic::new("source", "")).unwrap();
        let target = manager.create_epic(Epic::new("target", "")).unwrap();
        let id = manager
            .create_subtask(Subtask::new("s", "", Status::Done, source))
            .unwrap()
            .unwrap();

        assert!(manager.move_subtask(id, target).unwrap());

        let epics = manager.all_epics();
        let source_epic = epics.iter().find(|e| e.task.id == source).unwrap();
        let target_epic = epics.iter().find(|e| e.task.id == target).unwrap();
        assert!(source_epic.subtask_ids.is_empty());
        assert_eq!(source_epic.task.status, Status::New);
        assert_eq!(target_epic.subtask_ids, vec![id]);
        assert_eq!(target_epic.task.status, Status::Done);
        assert_eq!(manager.all_subtasks()[0].epic_id, target);
    }

    #[test]
    fn deleting_an_epic_cascades_everywhere() {
        let mut manager = TaskManager::new();
        let epic_id = manager.create_epic(Epic::new("release", "")).unwrap();
        let mut sub = Subtask::new("s", "", Status::New, epic_id);
        sub.task = sub.task.scheduled(stamp(10, 0), minutes(30));
        let sub_id = manager.create_subtask(sub).unwrap().unwrap();

        manager.get_epic(epic_id);
        manager.get_subtask(sub_id);
        assert_eq!(manager.history_ids(), vec![epic_id, sub_id]);

        manager.delete_epic(epic_id);
        assert!(manager.all_epics().is_empty());
        assert!(manager.all_subtasks().is_empty());
        assert!(manager.prioritized().is_empty());
        assert!(manager.history_ids().is_empty());
    }

    #[test]
    fn history_tracks_views_across_kinds() {
        let mut manager = TaskManager::new();
        let task_id = manager.create_task(task("a")).unwrap().unwrap();
        let epic_id = manager.create_epic(Epic::new("e", "")).unwrap();

        manager.get_task(task_id);
        manager.get_epic(epic_id);
        manager.get_task(task_id);
        assert_eq!(manager.history_ids(), vec![epic_id, task_id]);

        manager.get_task(999);
        assert_eq!(manager.history_ids(), vec![epic_id, task_id]);

        let items = manager.history();
        assert_eq!(items[0].kind(), Kind::Epic);
        assert_eq!(items[1].kind(), Kind::Task);
    }

    #[test]
    fn update_epic_preserves_derived_fields() {
        let mut manager = TaskManager::new();
        let epic_id = manager.create_epic(Epic::new("release", "old")).unwrap();
        manager
            .create_subtask(Subtask::new("s", "", Status::Done, epic_id))
            .unwrap()
            .unwrap();

        let mut rename = Epic::new("shipped", "new");
        rename.task.id = epic_id;
        rename.task.status = Status::New;
        assert!(manager.update_epic(rename));

        let epic = &manager.all_epics()[0];
        assert_eq!(epic.task.name, "shipped");
        assert_eq!(epic.task.description, "new");
        assert_eq!(epic.task.status, Status::Done);
        assert_eq!(epic.subtask_ids.len(), 1);
    }

    #[test]
    fn delete_all_epics_clears_subtasks_too() {
        let mut manager = TaskManager::new();
        let epic_id = manager.create_epic(Epic::new("e", "")).unwrap();
        let sub_id = manager
            .create_subtask(Subtask::new("s", "", Status::New, epic_id))
            .unwrap()
            .unwrap();
        manager.get_subtask(sub_id);

        manager.delete_all_epics();
        assert!(manager.all_epics().is_empty());
        assert!(manager.all_subtasks().is_empty());
        assert!(manager.history_ids().is_empty());
    }

    #[test]
    fn from_parts_resumes_the_allocator_and_drops_stale_history() {
        let mut epic = Epic::new("e", "");
        epic.task.id = 5;
        let mut sub = Subtask::new("s", "", Status::Done, 5);
        sub.task.id = 7;

        let mut manager =
            TaskManager::from_parts(Vec::new(), vec![epic], vec![sub], vec![7, 99]).unwrap();
        assert_eq!(manager.history_ids(), vec![7]);
        assert_eq!(manager.all_epics()[0].task.status, Status::Done);

        let fresh = manager.create_task(task("next")).unwrap().unwrap();
        assert_eq!(fresh, 8);
    }

    #[test]
    fn from_parts_rejects_dangling_epic_references() {
        let mut sub = Subtask::new("s", "", Status::New, 3);
        sub.task.id = 1;

        let err = TaskManager::from_parts(Vec::new(), Vec::new(), vec![sub], Vec::new());
        assert!(matches!(err, Err(Error::Corrupt(_))));
    }
}
