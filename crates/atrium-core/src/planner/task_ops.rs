//! Task operations for the Planner.

use super::{
    todo_machine::{self, AdvanceOutcome, StartOutcome, UpdateOutcome},
    Planner, Transition,
};
use crate::{
    db::{StoreAccess, TaskStore},
    error::Result,
    models::{NewTask, Task, TaskPatch},
    params::{CreatePlanAndTodos, TaskId, ThreadId, UpdatePlanOrTodos},
};

impl<A: StoreAccess> Planner<A> {
    /// Creates a task with the given plan and an all-pending todo list. No
    /// todo is started.
    ///
    /// # Errors
    ///
    /// * `OfficeError::InvalidInput` - blank thread, title or plan, or no todos
    pub async fn create_plan_and_todos(&self, params: &CreatePlanAndTodos) -> Result<Task> {
        let new_task = NewTask::try_from(params)?;
        let task = self.run(move |store| store.create_task(&new_task)).await?;

        log::info!(
            "Created task {} \"{}\" with {} todos in thread '{}'",
            task.id,
            task.title,
            task.todos.len(),
            task.thread_id
        );
        Ok(task)
    }

    /// Revises the active task of a thread: check-off, todo replacement and
    /// plan revision, applied atomically.
    ///
    /// # Errors
    ///
    /// * `OfficeError::NoActiveTask` - the thread has no running task
    /// * `OfficeError::InvalidInput` - blank plan text or todo titles
    pub async fn update_plan_or_todos(
        &self,
        params: &UpdatePlanOrTodos,
    ) -> Result<Transition<UpdateOutcome>> {
        let (updated_plan, new_pending) = params.validate()?;
        let thread_id = params.thread_id.clone();
        let check_off = params.check_off_current_todo;

        let transition = self
            .run(move |store| {
                store.modify_active_by_thread(&thread_id, |task| {
                    todo_machine::apply_update(task, updated_plan, new_pending, check_off)
                })
            })
            .await?;
        Ok(transition.into())
    }

    /// Promotes the first pending todo of a task to in progress.
    ///
    /// # Errors
    ///
    /// * `OfficeError::TaskNotFound` - no task has this ID
    pub async fn start_next_todo(&self, params: &TaskId) -> Result<Transition<StartOutcome>> {
        let id = params.task_id;
        let transition = self
            .run(move |store| store.modify_task(id, todo_machine::start_next))
            .await?;
        Ok(transition.into())
    }

    /// Completes the current todo and starts the next one, finishing the task
    /// when nothing remains.
    ///
    /// # Errors
    ///
    /// * `OfficeError::TaskNotFound` - no task has this ID
    pub async fn complete_current_todo_and_move_to_next(
        &self,
        params: &TaskId,
    ) -> Result<Transition<AdvanceOutcome>> {
        let id = params.task_id;
        let transition = self
            .run(move |store| store.modify_task(id, todo_machine::complete_current_and_advance))
            .await?;

        if transition.1.is_completed {
            log::info!("Task {id} completed");
        }
        Ok(transition.into())
    }

    pub async fn get_task(&self, params: &TaskId) -> Result<Option<Task>> {
        let id = params.task_id;
        self.run(move |store| store.get_task(id)).await
    }

    /// The running task of a thread, if any.
    pub async fn get_active_task(&self, params: &ThreadId) -> Result<Option<Task>> {
        let thread_id = params.thread_id.clone();
        self.run(move |store| store.get_active_by_thread(&thread_id))
            .await
    }

    /// Every task of a thread, newest first.
    pub async fn list_tasks(&self, params: &ThreadId) -> Result<Vec<Task>> {
        let thread_id = params.thread_id.clone();
        self.run(move |store| store.list_tasks(&thread_id)).await
    }

    /// Writes fields of a task directly, bypassing the todo transitions.
    ///
    /// # Errors
    ///
    /// * `OfficeError::TaskNotFound` - no task has this ID
    pub async fn patch_task(&self, id: u64, patch: TaskPatch) -> Result<Task> {
        self.run(move |store| store.patch_task(id, &patch)).await
    }
}
