//! In-process task store.

use std::collections::BTreeMap;

use jiff::Timestamp;

use super::store::TaskStore;
use crate::{
    error::{OfficeError, Result},
    models::{NewTask, Task, TaskPatch},
};

/// Task store backed by an ordered map. IDs are assigned sequentially from 1,
/// so map order is creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: BTreeMap<u64, Task>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_in_thread(&self, thread_id: &str) -> Option<&Task> {
        self.tasks
            .values()
            .rev()
            .find(|task| task.thread_id == thread_id)
    }

    fn active_id(&self, thread_id: &str) -> Option<u64> {
        self.newest_in_thread(thread_id)
            .filter(|task| !task.done)
            .map(|task| task.id)
    }
}

impl TaskStore for MemoryStore {
    fn create_task(&mut self, task: &NewTask) -> Result<Task> {
        self.next_id += 1;
        let now = Timestamp::now();
        let created = Task {
            id: self.next_id,
            thread_id: task.thread_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            plan_segments: vec![task.plan.clone()],
            todos: task.todos.clone(),
            done: false,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(created.id, created.clone());
        Ok(created)
    }

    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn get_active_by_thread(&self, thread_id: &str) -> Result<Option<Task>> {
        Ok(self
            .active_id(thread_id)
            .and_then(|id| self.tasks.get(&id))
            .cloned())
    }

    fn list_tasks(&self, thread_id: &str) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .values()
            .rev()
            .filter(|task| task.thread_id == thread_id)
            .cloned()
            .collect())
    }

    fn patch_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(OfficeError::TaskNotFound { id })?;
        patch.apply_to(task);
        task.updated_at = Timestamp::now();
        Ok(task.clone())
    }

    fn modify_task<R>(&mut self, id: u64, f: impl FnOnce(&mut Task) -> R) -> Result<(Task, R)> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(OfficeError::TaskNotFound { id })?;
        let output = f(task);
        task.updated_at = Timestamp::now();
        Ok((task.clone(), output))
    }

    fn modify_active_by_thread<R>(
        &mut self,
        thread_id: &str,
        f: impl FnOnce(&mut Task) -> R,
    ) -> Result<(Task, R)> {
        let id = self
            .active_id(thread_id)
            .ok_or_else(|| OfficeError::NoActiveTask {
                thread_id: thread_id.to_string(),
            })?;
        self.modify_task(id, f)
    }
}
