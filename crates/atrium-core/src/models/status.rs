//! Todo status enumeration.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle of a single todo: `pending → in-progress → completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum TodoStatus {
    /// Waiting its turn
    #[default]
    Pending,

    /// The one todo currently being worked on
    InProgress,

    /// Finished
    Completed,
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TodoStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TodoStatus::InProgress),
            "completed" => Ok(TodoStatus::Completed),
            _ => Err(format!("Invalid todo status: {s}")),
        }
    }
}

impl TodoStatus {
    /// Database and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in-progress",
            TodoStatus::Completed => "completed",
        }
    }

    /// Whether the todo still has work left.
    pub fn is_open(&self) -> bool {
        !matches!(self, TodoStatus::Completed)
    }

    /// Status with an icon, for markdown output.
    ///
    /// ```rust
    /// use atrium_core::models::TodoStatus;
    ///
    /// assert_eq!(TodoStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TodoStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TodoStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TodoStatus::Completed => "✓ Completed",
            TodoStatus::InProgress => "➤ In Progress",
            TodoStatus::Pending => "○ Pending",
        }
    }
}
