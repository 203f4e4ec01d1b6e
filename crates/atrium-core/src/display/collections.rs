//! Collection wrapper types for displaying groups of tasks.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::{models::Task, spatial::DeskPlacement};

/// Newtype wrapper for displaying a thread's task history as compact
/// summaries.
///
/// # Examples
///
/// ```rust
/// use atrium_core::{
///     display::Tasks,
///     models::{Task, Todo},
/// };
/// use jiff::Timestamp;
///
/// let task = Task {
///     id: 1,
///     thread_id: "t1".to_string(),
///     title: "Hiring plan".to_string(),
///     description: None,
///     plan_segments: vec!["Draft the roles".to_string()],
///     todos: vec![Todo::pending("List roles")],
///     done: false,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = Tasks(vec![task]).to_string();
/// assert!(output.contains("## Hiring plan (ID: 1) (0/1)"));
/// ```
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            let progress = task.progress();
            writeln!(
                f,
                "## {} (ID: {}) ({}/{})",
                task.title, task.id, progress.completed, progress.total
            )?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Status**: {}",
                if task.done { "done" } else { "active" }
            )?;
            if let Some(todo) = task.current_todo() {
                writeln!(f, "- **Working on**: {}", todo.title)?;
            }
            writeln!(f, "- **Created**: {}", LocalDateTime(&task.created_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the desks of one cluster.
pub struct Placements(pub Vec<DeskPlacement>);

impl fmt::Display for Placements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No desks in this cluster.");
        }
        for placement in &self.0 {
            writeln!(f, "- {placement}")?;
        }
        Ok(())
    }
}
