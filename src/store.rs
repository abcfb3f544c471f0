//! File-backed persistence for the tracker.
//!
//! [`FileStore`] owns the data-file path and performs locked, atomic reads
//! and writes of the codec document. [`FileBackedManager`] composes an
//! in-memory [`TaskManager`] with a store and saves the full state after
//! every call that changed it, including by-id gets (a view mutates the
//! history). A failed save surfaces the error and leaves the in-memory
//! state authoritative; nothing is rolled back.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::lock;
use crate::manager::TaskManager;
use crate::model::{Epic, Item, Subtask, Task};

/// Locked, atomic access to one tracker document on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Encode and write the full state.
    pub fn save(&self, manager: &TaskManager) -> Result<()> {
        let document = codec::encode(manager)?;
        lock::write_atomic_locked(&self.path, document.as_bytes(), lock::DEFAULT_LOCK_TIMEOUT_MS)?;
        debug!(path = %self.path.display(), "saved tracker state");
        Ok(())
    }

    /// Read and decode the full state.
    pub fn load(&self) -> Result<TaskManager> {
        let document = lock::read_locked_str(&self.path, lock::DEFAULT_LOCK_TIMEOUT_MS)?;
        codec::decode(&document)
    }
}

/// A `TaskManager` that persists write-through to a [`FileStore`].
#[derive(Debug)]
pub struct FileBackedManager {
    manager: TaskManager,
    store: FileStore,
}

impl FileBackedManager {
    /// Start empty, backed by `path`. Nothing is written until the first
    /// mutation.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            manager: TaskManager::new(),
            store: FileStore::new(path),
        }
    }

    /// Load existing state from `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let store = FileStore::new(path);
        let manager = store.load()?;
        Ok(Self { manager, store })
    }

    /// Load `path` when it exists, otherwise start empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = FileStore::new(path);
        if store.exists() {
            Self::load(store.path().to_path_buf())
        } else {
            Ok(Self::create(store.path().to_path_buf()))
        }
    }

    /// Read access to the in-memory state.
    pub fn manager(&self) -> &TaskManager {
        &self.manager
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Persist the current state explicitly.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.manager)
    }

    // =========================================================================
    // Write-through surface
    // =========================================================================

    pub fn create_task(&mut self, task: Task) -> Result<Option<u32>> {
        let created = self.manager.create_task(task)?;
        self.save()?;
        Ok(created)
    }

    pub fn update_task(&mut self, task: Task) -> Result<bool> {
        let found = self.manager.update_task(task)?;
        self.save()?;
        Ok(found)
    }

    pub fn get_task(&mut self, id: u32) -> Result<Option<Task>> {
        let task = self.manager.get_task(id);
        if task.is_some() {
            self.save()?;
        }
        Ok(task)
    }

    pub fn all_tasks(&self) -> Vec<Task> {
        self.manager.all_tasks()
    }

    pub fn delete_task(&mut self, id: u32) -> Result<()> {
        self.manager.delete_task(id);
        self.save()
    }

    pub fn delete_all_tasks(&mut self) -> Result<()> {
        self.manager.delete_all_tasks();
        self.save()
    }

    pub fn create_epic(&mut self, epic: Epic) -> Result<Option<u32>> {
        let created = self.manager.create_epic(epic);
        self.save()?;
        Ok(created)
    }

    pub fn update_epic(&mut self, epic: Epic) -> Result<bool> {
        let found = self.manager.update_epic(epic);
        self.save()?;
        Ok(found)
    }

    pub fn get_epic(&mut self, id: u32) -> Result<Option<Epic>> {
        let epic = self.manager.get_epic(id);
        if epic.is_some() {
            self.save()?;
        }
        Ok(epic)
    }

    pub fn all_epics(&self) -> Vec<Epic> {
        self.manager.all_epics()
    }

    pub fn delete_epic(&mut self, id: u32) -> Result<()> {
        self.manager.delete_epic(id);
        self.save()
    }

    pub fn delete_all_epics(&mut self) -> Result<()> {
        self.manager.delete_all_epics();
        self.save()
    }

    pub fn create_subtask(&mut self, subtask: Subtask) -> Result<Option<u32>> {
        let created = self.manager.create_subtask(subtask)?;
        self.save()?;
        Ok(created)
    }

    pub fn update_subtask(&mut self, subtask: Subtask) -> Result<bool> {
        let found = self.manager.update_subtask(subtask)?;
        self.save()?;
        Ok(found)
    }

    pub fn move_subtask(&mut self, id: u32, epic_id: u32) -> Result<bool> {
        let found = self.manager.move_subtask(id, epic_id)?;
        self.save()?;
        Ok(found)
    }

    pub fn get_subtask(&mut self, id: u32) -> Result<Option<Subtask>> {
        let subtask = self.manager.get_subtask(id);
        if subtask.is_some() {
            self.save()?;
        }
        Ok(subtask)
    }

    pub fn all_subtasks(&self) -> Vec<Subtask> {
        self.manager.all_subtasks()
    }

    pub fn delete_subtask(&mut self, id: u32) -> Result<()> {
        self.manager.delete_subtask(id);
        self.save()
    }

    pub fn delete_all_subtasks(&mut self) -> Result<()> {
        self.manager.delete_all_subtasks();
        self.save()
    }

    pub fn subtasks_of_epic(&self, epic_id: u32) -> Vec<Subtask> {
        self.manager.subtasks_of_epic(epic_id)
    }

    pub fn prioritized(&self) -> Vec<Item> {
        self.manager.prioritized()
    }

    pub fn history(&self) -> Vec<Item> {
        self.manager.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Status;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn data_path(temp: &TempDir) -> PathBuf {
        temp.path().join("tasks.csv")
    }

    #[test]
    fn mutations_persist_immediately() {
        let temp = TempDir::new().unwrap();
        let path = data_path(&temp);

        let mut tracker = FileBackedManager::create(&path);
        let id = tracker
            .create_task(Task::new("call", "", Status::New))
            .unwrap()
            .unwrap();

        let reloaded = FileBackedManager::load(&path).unwrap();
        assert_eq!(reloaded.all_tasks()[0].id, id);
    }

    #[test]
    fn views_persist_history() {
        let temp = TempDir::new().unwrap();
        let path = data_path(&temp);

        let mut tracker = FileBackedManager::create(&path);
        let id = tracker
            .create_task(Task::new("call", "", Status::New))
            .unwrap()
            .unwrap();
        tracker.get_task(id).unwrap();

        let reloaded = FileBackedManager::load(&path).unwrap();
        assert_eq!(reloaded.manager().history_ids(), vec![id]);
    }

    #[test]
    fn open_starts_empty_when_the_file_is_missing() {
        let temp = TempDir::new().unwrap();
        let tracker = FileBackedManager::open(data_path(&temp)).unwrap();
        assert!(tracker.all_tasks().is_empty());
    }

    #[test]
    fn load_fails_on_a_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            FileBackedManager::load(data_path(&temp)),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn rejected_conflict_leaves_the_file_at_the_last_good_state() {
        let temp = TempDir::new().unwrap();
        let path = data_path(&temp);
        let start = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let mut tracker = FileBackedManager::create(&path);
        tracker
            .create_task(Task::new("a", "", Status::New).scheduled(start, Duration::minutes(60)))
            .unwrap()
            .unwrap();

        let overlapping = Task::new("b", "", Status::New)
            .scheduled(start + Duration::minutes(30), Duration::minutes(60));
        assert!(tracker.create_task(overlapping).is_err());

        let reloaded = FileBackedManager::load(&path).unwrap();
        assert_eq!(reloaded.all_tasks().len(), 1);
    }

    #[test]
    fn epic_cascade_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = data_path(&temp);

        let mut tracker = FileBackedManager::create(&path);
        let epic_id = tracker.create_epic(Epic::new("release", "")).unwrap().unwrap();
        tracker
            .create_subtask(Subtask::new("notes", "", Status::New, epic_id))
            .unwrap()
            .unwrap();
        tracker.delete_epic(epic_id).unwrap();

        let reloaded = FileBackedManager::load(&path).unwrap();
        assert!(reloaded.all_epics().is_empty());
        assert!(reloaded.all_subtasks().is_empty());
    }
}
