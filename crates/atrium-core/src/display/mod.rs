//! Display formatting for tasks, transitions and floor grids.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! The wrappers here add context: a creation banner, a thread's history, the
//! active task of a thread or its absence, and an ASCII map of the floor.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │  (Task, Todo)   │───▶│ (Tasks, GridMap │───▶│    Output       │
//! │                 │    │  CreateResult)  │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All output is markdown.

pub mod collections;
pub mod datetime;
pub mod grid;
pub mod models;
pub mod results;

pub use collections::{Placements, Tasks};
pub use datetime::LocalDateTime;
pub use grid::GridMap;
pub use results::{ActiveTask, CreateResult};
