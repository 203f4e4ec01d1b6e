//! Task handler operations that return display wrappers for the Planner.

use super::Planner;
use crate::{
    db::StoreAccess,
    display::{ActiveTask, CreateResult, Tasks},
    error::{OfficeError, Result},
    models::Task,
    params::{CreatePlanAndTodos, TaskId, ThreadId},
};

impl<A: StoreAccess> Planner<A> {
    /// Creates a task and wraps it for a creation banner.
    pub async fn create_task_result(
        &self,
        params: &CreatePlanAndTodos,
    ) -> Result<CreateResult<Task>> {
        self.create_plan_and_todos(params)
            .await
            .map(CreateResult::new)
    }

    /// The active task of a thread, displayable whether or not one exists.
    pub async fn show_active_task(&self, params: &ThreadId) -> Result<ActiveTask> {
        let task = self.get_active_task(params).await?;
        Ok(ActiveTask {
            thread_id: params.thread_id.clone(),
            task,
        })
    }

    /// A task by ID.
    ///
    /// # Errors
    ///
    /// * `OfficeError::TaskNotFound` - no task has this ID
    pub async fn show_task(&self, params: &TaskId) -> Result<Task> {
        self.get_task(params)
            .await?
            .ok_or(OfficeError::TaskNotFound {
                id: params.task_id,
            })
    }

    /// A thread's task history, newest first.
    pub async fn task_history(&self, params: &ThreadId) -> Result<Tasks> {
        self.list_tasks(params).await.map(Tasks)
    }
}
