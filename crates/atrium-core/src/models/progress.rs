//! Todo counts for a task.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Todo, TodoStatus};

/// How far along a task's todo list is.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskProgress {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub pending: u32,
}

impl TaskProgress {
    pub fn from_todos(todos: &[Todo]) -> Self {
        todos.iter().fold(
            Self {
                total: todos.len() as u32,
                ..Self::default()
            },
            |mut progress, todo| {
                match todo.status {
                    TodoStatus::Completed => progress.completed += 1,
                    TodoStatus::InProgress => progress.in_progress += 1,
                    TodoStatus::Pending => progress.pending += 1,
                }
                progress
            },
        )
    }

    /// Todos not yet completed.
    pub fn remaining(&self) -> u32 {
        self.in_progress + self.pending
    }
}
