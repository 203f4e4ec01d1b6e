//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::Tasks;
use crate::{models::Task, planner::Transition, toolset::ToolResponse};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use atrium_core::{
///     display::CreateResult,
///     models::{Task, Todo},
/// };
/// use jiff::Timestamp;
///
/// let task = Task {
///     id: 4,
///     thread_id: "t1".to_string(),
///     title: "Release notes".to_string(),
///     description: None,
///     plan_segments: vec!["Collect changes".to_string()],
///     todos: vec![Todo::pending("Collect changes")],
///     done: false,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(task).to_string();
/// assert!(output.starts_with("Created task with ID: 4"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// The outcome message first, then the task as it now stands.
impl<O: fmt::Display> fmt::Display for Transition<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        writeln!(f)?;
        write!(f, "{}", self.task)
    }
}

/// The active task of a thread, or a note that there is none.
pub struct ActiveTask {
    pub thread_id: String,
    pub task: Option<Task>,
}

impl fmt::Display for ActiveTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.task {
            Some(task) => write!(f, "{task}"),
            None => writeln!(f, "No active task for thread '{}'.", self.thread_id),
        }
    }
}

/// Tool responses render the same way the CLI prints each result.
impl fmt::Display for ToolResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(task) => write!(f, "{}", CreateResult::new(task.clone())),
            Self::Updated(transition) => write!(f, "{transition}"),
            Self::Started(transition) => write!(f, "{transition}"),
            Self::Advanced(transition) => write!(f, "{transition}"),
            Self::Active(Some(task)) => write!(f, "{task}"),
            Self::Active(None) => writeln!(f, "No active task."),
            Self::History(tasks) => write!(f, "{}", Tasks(tasks.clone())),
        }
    }
}
