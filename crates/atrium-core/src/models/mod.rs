//! Data models for supervisor tasks and their todos.
//!
//! A [`Task`] is one planned piece of work inside a conversation thread. It
//! keeps every revision of its plan text and an ordered todo list whose
//! entries move `pending → in-progress → completed`. Display implementations
//! live in [`crate::display::models`] so the data types stay free of
//! formatting concerns.
//!
//! # Examples
//!
//! ```rust
//! use atrium_core::models::{Task, Todo, TodoStatus};
//! use jiff::Timestamp;
//!
//! let task = Task {
//!     id: 1,
//!     thread_id: "thread-1".to_string(),
//!     title: "Launch page".to_string(),
//!     description: None,
//!     plan_segments: vec!["Draft, then review".to_string()],
//!     todos: vec![Todo::pending("Draft copy"), Todo::pending("Review")],
//!     done: false,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! assert_eq!(task.current_plan(), Some("Draft, then review"));
//! assert_eq!(task.progress().pending, 2);
//! println!("{task}"); // markdown with status icons
//! ```

pub mod progress;
pub mod requests;
pub mod status;
pub mod task;

pub use progress::TaskProgress;
pub use requests::{NewTask, TaskPatch};
pub use status::TodoStatus;
pub use task::{Task, Todo};
