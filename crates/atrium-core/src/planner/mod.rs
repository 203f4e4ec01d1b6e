//! High-level planner API for supervisor tasks.
//!
//! [`Planner`] is the async entry point the toolset, the CLI and the MCP
//! server share. Each call moves its store work onto a blocking thread and
//! applies the todo transitions of [`todo_machine`] inside the store's atomic
//! read-modify-write.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │   TaskStore     │
//! │ (task_handlers) │───▶│   (task_ops,    │───▶│ (Database or    │
//! │                 │    │  todo_machine)  │    │  MemoryStore)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Display wrappers       Business logic        Data persistence
//! ```
//!
//! # Usage
//!
//! ```rust
//! use atrium_core::{
//!     params::{CreatePlanAndTodos, TaskId},
//!     Planner,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = Planner::in_memory();
//!
//! let task = planner
//!     .create_plan_and_todos(&CreatePlanAndTodos {
//!         thread_id: "thread-1".to_string(),
//!         title: "Landing page".to_string(),
//!         description: None,
//!         plan: "Draft copy, then build".to_string(),
//!         todos: vec!["Draft copy".to_string(), "Build page".to_string()],
//!     })
//!     .await?;
//!
//! let started = planner.start_next_todo(&TaskId { task_id: task.id }).await?;
//! assert_eq!(started.outcome.current_todo.as_deref(), Some("Draft copy"));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::task;

use crate::{
    db::{SharedMemoryStore, SqliteAccess, StoreAccess},
    error::{OfficeError, Result},
    models::Task,
};

pub mod builder;
pub mod task_handlers;
pub mod task_ops;
pub mod todo_machine;


pub use builder::TaskStoreBuilder;
pub use todo_machine::{AdvanceOutcome, StartOutcome, UpdateOutcome};

/// Main planner interface for supervisor tasks.
#[derive(Debug, Clone)]
pub struct Planner<A = SqliteAccess> {
    access: A,
}

impl<A: StoreAccess> Planner<A> {
    pub fn new(access: A) -> Self {
        Self { access }
    }

    /// Runs `op` against the store on a blocking thread.
    pub(crate) async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut A::Store) -> Result<T> + Send + 'static,
    {
        let access = self.access.clone();
        task::spawn_blocking(move || access.with_store(op))
            .await
            .map_err(OfficeError::join)?
    }
}

impl Planner<SharedMemoryStore> {
    /// A planner over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(SharedMemoryStore::new())
    }
}

/// A task as stored after a transition, plus what the transition did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<O> {
    pub task: Task,
    #[serde(flatten)]
    pub outcome: O,
}

impl<O> From<(Task, O)> for Transition<O> {
    fn from((task, outcome): (Task, O)) -> Self {
        Self { task, outcome }
    }
}
