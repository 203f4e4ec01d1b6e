//! Task and todo model definitions.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{TaskProgress, TodoStatus};

/// One entry of a task's todo list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Todo {
    pub title: String,
    pub status: TodoStatus,
}

impl Todo {
    /// A new todo waiting its turn.
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TodoStatus::Pending,
        }
    }
}

/// A supervisor's plan for one complex request within a conversation thread.
///
/// Todos are worked strictly in list order. At most one is in progress, and
/// `done` holds exactly when none is pending or in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Conversation thread that owns the task
    pub thread_id: String,

    pub title: String,

    pub description: Option<String>,

    /// Every revision of the plan text, oldest first
    pub plan_segments: Vec<String>,

    pub todos: Vec<Todo>,

    /// Terminal flag; a done task is never active again
    pub done: bool,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// The plan text currently in force (the latest revision).
    pub fn current_plan(&self) -> Option<&str> {
        self.plan_segments.last().map(String::as_str)
    }

    /// The todo being worked on, if any.
    pub fn current_todo(&self) -> Option<&Todo> {
        self.todos
            .iter()
            .find(|todo| todo.status == TodoStatus::InProgress)
    }

    /// Titles of completed todos, in list order.
    pub fn completed_titles(&self) -> Vec<&str> {
        self.titles_where(|status| status == TodoStatus::Completed)
    }

    /// Titles of todos that still have work left, in list order. The
    /// in-progress todo, if any, comes first.
    pub fn open_titles(&self) -> Vec<&str> {
        self.titles_where(|status| status.is_open())
    }

    pub fn has_open_todos(&self) -> bool {
        self.todos.iter().any(|todo| todo.status.is_open())
    }

    pub fn progress(&self) -> TaskProgress {
        TaskProgress::from_todos(&self.todos)
    }

    fn titles_where(&self, keep: impl Fn(TodoStatus) -> bool) -> Vec<&str> {
        self.todos
            .iter()
            .filter(|todo| keep(todo.status))
            .map(|todo| todo.title.as_str())
            .collect()
    }
}
