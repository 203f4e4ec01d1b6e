//! Todo transitions on an in-memory task.
//!
//! Every function here mutates a [`Task`] that the caller has loaded under
//! the store's read-modify-write, and leaves it satisfying the task
//! invariants: at most one todo in progress, todos advanced in list order, and
//! `done` exactly when nothing is open.

use serde::{Deserialize, Serialize};

use crate::models::{Task, TaskProgress, Todo, TodoStatus};

/// What `start_next_todo` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOutcome {
    /// Whether a pending todo was promoted by this call
    pub started: bool,
    pub message: String,
    /// Title of the todo now in progress
    pub current_todo: Option<String>,
    pub progress: TaskProgress,
}

/// What `complete_current_todo_and_move_to_next` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    /// True once the whole task is done
    pub is_completed: bool,
    pub message: String,
    /// Title of the todo now in progress, when work remains
    pub current_todo: Option<String>,
    pub progress: TaskProgress,
}

/// What `update_plan_or_todos` changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// Title of the todo that was checked off
    pub checked_off: Option<String>,
    pub plan_revised: bool,
    /// Number of open todos that were replaced
    pub todos_replaced: Option<usize>,
    /// Whether the update left nothing open and finished the task
    pub finished: bool,
}

/// Promotes the first pending todo to in progress.
///
/// Does nothing when a todo is already in progress or nothing is pending.
pub fn start_next(task: &mut Task) -> StartOutcome {
    if let Some(current) = task.current_todo() {
        let title = current.title.clone();
        return StartOutcome {
            started: false,
            message: format!("\"{title}\" is already in progress"),
            current_todo: Some(title),
            progress: task.progress(),
        };
    }

    let Some(next) = task
        .todos
        .iter_mut()
        .find(|todo| todo.status == TodoStatus::Pending)
    else {
        return StartOutcome {
            started: false,
            message: "No pending todos to start".to_string(),
            current_todo: None,
            progress: task.progress(),
        };
    };

    next.status = TodoStatus::InProgress;
    let title = next.title.clone();
    log::info!("Task {}: started \"{title}\"", task.id);
    StartOutcome {
        started: true,
        message: format!("Started \"{title}\""),
        current_todo: Some(title),
        progress: task.progress(),
    }
}

/// Completes the current todo and promotes the next pending one.
///
/// The current todo is the first open one: the in-progress todo if there is
/// one, otherwise the head of the pending queue. When nothing remains the task
/// is marked done.
pub fn complete_current_and_advance(task: &mut Task) -> AdvanceOutcome {
    if !task.done {
        if let Some(title) = check_off_head(task) {
            log::info!("Task {}: completed \"{title}\"", task.id);
        }
        start_next(task);
        refresh_done(task);
    }

    let progress = task.progress();
    if task.done {
        return AdvanceOutcome {
            is_completed: true,
            message: format!(
                "All todos completed ({}/{}). Task \"{}\" is done.",
                progress.completed, progress.total, task.title
            ),
            current_todo: None,
            progress,
        };
    }

    let current = task.current_todo().map(|todo| todo.title.clone());
    AdvanceOutcome {
        is_completed: false,
        message: format!(
            "Now working on \"{}\" ({}/{} completed, {} remaining)",
            current.as_deref().unwrap_or_default(),
            progress.completed,
            progress.total,
            progress.remaining()
        ),
        current_todo: current,
        progress,
    }
}

/// Revises the plan and todo list of a running task.
///
/// Order of application: check-off, then replacement of every open todo with
/// `new_pending` titles, then the plan revision. The task is marked done if
/// nothing is left open afterwards.
pub fn apply_update(
    task: &mut Task,
    updated_plan: Option<String>,
    new_pending: Option<Vec<String>>,
    check_off: bool,
) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::default();

    if check_off {
        outcome.checked_off = check_off_head(task);
    }

    if let Some(titles) = new_pending {
        let before = task.todos.len();
        task.todos.retain(|todo| !todo.status.is_open());
        outcome.todos_replaced = Some(before - task.todos.len());
        task.todos.extend(titles.into_iter().map(Todo::pending));
    }

    if let Some(plan) = updated_plan {
        task.plan_segments.push(plan);
        outcome.plan_revised = true;
    }

    refresh_done(task);
    outcome.finished = task.done;
    if task.done {
        log::info!("Task {}: finished by update", task.id);
    }
    outcome
}

/// Marks the task done exactly when no todo is open.
pub fn refresh_done(task: &mut Task) {
    task.done = !task.has_open_todos();
}

/// Completes the first open todo and returns its title.
fn check_off_head(task: &mut Task) -> Option<String> {
    let head = task.todos.iter_mut().find(|todo| todo.status.is_open())?;
    head.status = TodoStatus::Completed;
    Some(head.title.clone())
}
