//! Core library for Atrium, the virtual office back end.
//!
//! Two independent halves live here:
//!
//! - [`spatial`]: the office floor as a walkability grid, A* routes for agents
//!   walking between desks, and the desk/cluster layout geometry.
//! - [`planner`] and [`toolset`]: the supervisor's task state machine. A task
//!   holds a plan and an ordered todo list that moves
//!   `pending → in-progress → completed`, persisted through a [`TaskStore`].
//!
//! Domain models implement [`std::fmt::Display`] as markdown; the
//! [`display`] module adds wrappers for results, histories and grid maps.
//!
//! # Quick Start
//!
//! ```rust
//! use atrium_core::{
//!     params::{CreatePlanAndTodos, TaskId, ThreadId},
//!     TaskStoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TaskStoreBuilder::new()
//!     .with_database_path(Some("atrium.db"))
//!     .build()
//!     .await?;
//!
//! let task = planner
//!     .create_plan_and_todos(&CreatePlanAndTodos {
//!         thread_id: "thread-42".to_string(),
//!         title: "Market analysis".to_string(),
//!         description: None,
//!         plan: "Collect data, then summarise".to_string(),
//!         todos: vec!["Collect data".to_string(), "Summarise".to_string()],
//!     })
//!     .await?;
//!
//! planner.start_next_todo(&TaskId { task_id: task.id }).await?;
//! let step = planner
//!     .complete_current_todo_and_move_to_next(&TaskId { task_id: task.id })
//!     .await?;
//! println!("{}", step.outcome.message);
//!
//! let active = planner
//!     .show_active_task(&ThreadId { thread_id: "thread-42".to_string() })
//!     .await?;
//! println!("{active}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod spatial;
pub mod toolset;

pub use db::{Database, MemoryStore, TaskStore};
pub use display::{ActiveTask, CreateResult, GridMap, LocalDateTime, Tasks};
pub use error::{OfficeError, Result};
pub use models::{NewTask, Task, TaskPatch, TaskProgress, Todo, TodoStatus};
pub use params::{
    CreatePlanAndTodos, DeskLayoutRequest, FindPath, TaskId, ThreadId, UpdatePlanOrTodos,
};
pub use planner::{Planner, TaskStoreBuilder, Transition};
pub use spatial::{DeskLayout, FloorMap, FloorPlan, GridIndex, WorldPos};
pub use toolset::{SupervisorToolset, ToolRequest, ToolResponse};
