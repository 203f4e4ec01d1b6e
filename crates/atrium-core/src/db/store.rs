//! The persistence interface of the task planner.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use super::{Database, MemoryStore};
use crate::{
    error::Result,
    models::{NewTask, Task, TaskPatch},
};

/// CRUD over supervisor tasks.
///
/// A thread's *active* task is its most recently created task, provided that
/// task is not done. Creating a new task in a thread supersedes the previous
/// one; nothing is ever deleted.
pub trait TaskStore {
    /// Inserts a task with `plan_segments = [plan]` and `done = false`.
    fn create_task(&mut self, task: &NewTask) -> Result<Task>;

    fn get_task(&self, id: u64) -> Result<Option<Task>>;

    /// The running task of a thread, if there is one.
    fn get_active_by_thread(&self, thread_id: &str) -> Result<Option<Task>>;

    /// Every task of a thread, newest first, done ones included.
    fn list_tasks(&self, thread_id: &str) -> Result<Vec<Task>>;

    /// Overwrites the patched fields and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// * `OfficeError::TaskNotFound` - no task has this ID
    fn patch_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task>;

    /// Loads a task, hands it to `f` and persists the result, with no other
    /// writer able to interleave. Returns the stored task and `f`'s output.
    ///
    /// # Errors
    ///
    /// * `OfficeError::TaskNotFound` - no task has this ID
    fn modify_task<R>(&mut self, id: u64, f: impl FnOnce(&mut Task) -> R) -> Result<(Task, R)>;

    /// Same as [`TaskStore::modify_task`], for the active task of a thread.
    ///
    /// # Errors
    ///
    /// * `OfficeError::NoActiveTask` - the thread has no running task
    fn modify_active_by_thread<R>(
        &mut self,
        thread_id: &str,
        f: impl FnOnce(&mut Task) -> R,
    ) -> Result<(Task, R)>;
}

/// Gives a blocking operation exclusive use of a [`TaskStore`].
///
/// The planner clones the handle into `spawn_blocking` for every call.
pub trait StoreAccess: Clone + Send + Sync + 'static {
    type Store: TaskStore;

    fn with_store<T>(&self, op: impl FnOnce(&mut Self::Store) -> Result<T>) -> Result<T>;
}

/// Opens the SQLite file afresh for every operation.
#[derive(Debug, Clone)]
pub struct SqliteAccess {
    db_path: PathBuf,
}

impl SqliteAccess {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl StoreAccess for SqliteAccess {
    type Store = Database;

    fn with_store<T>(&self, op: impl FnOnce(&mut Self::Store) -> Result<T>) -> Result<T> {
        let mut db = Database::new(&self.db_path)?;
        op(&mut db)
    }
}

/// A [`MemoryStore`] shared between planner clones.
#[derive(Debug, Clone, Default)]
pub struct SharedMemoryStore {
    inner: Arc<Mutex<MemoryStore>>,
}

impl SharedMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreAccess for SharedMemoryStore {
    type Store = MemoryStore;

    fn with_store<T>(&self, op: impl FnOnce(&mut Self::Store) -> Result<T>) -> Result<T> {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        op(&mut *store)
    }
}
