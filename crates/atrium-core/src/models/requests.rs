//! Validated inputs for the task store.

use super::{Task, Todo};
use crate::{
    error::{OfficeError, Result},
    params::{clean_titles, require_non_blank, CreatePlanAndTodos},
};

/// A task ready to be inserted: all fields checked, todos still pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub thread_id: String,
    pub title: String,
    pub description: Option<String>,
    pub plan: String,
    pub todos: Vec<Todo>,
}

impl TryFrom<&CreatePlanAndTodos> for NewTask {
    type Error = OfficeError;

    fn try_from(params: &CreatePlanAndTodos) -> Result<Self> {
        require_non_blank("thread_id", &params.thread_id)?;
        require_non_blank("title", &params.title)?;
        require_non_blank("plan", &params.plan)?;
        if params.todos.is_empty() {
            return Err(OfficeError::invalid_input("todos")
                .with_reason("a plan needs at least one todo"));
        }
        let todos = clean_titles("todos", &params.todos)?
            .into_iter()
            .map(Todo::pending)
            .collect();

        Ok(Self {
            thread_id: params.thread_id.clone(),
            title: params.title.trim().to_string(),
            description: params
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            plan: params.plan.clone(),
            todos,
        })
    }
}

/// Fields of a stored task that may change after creation.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub plan_segments: Option<Vec<String>>,
    pub todos: Option<Vec<Todo>>,
    pub done: Option<bool>,
}

impl TaskPatch {
    /// A patch that overwrites every mutable field with the task's values.
    pub fn from_task(task: &Task) -> Self {
        Self {
            plan_segments: Some(task.plan_segments.clone()),
            todos: Some(task.todos.clone()),
            done: Some(task.done),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plan_segments.is_none() && self.todos.is_none() && self.done.is_none()
    }

    /// Applies the patch to an in-memory task. Timestamps are left alone.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(segments) = &self.plan_segments {
            task.plan_segments = segments.clone();
        }
        if let Some(todos) = &self.todos {
            task.todos = todos.clone();
        }
        if let Some(done) = self.done {
            task.done = done;
        }
    }
}
