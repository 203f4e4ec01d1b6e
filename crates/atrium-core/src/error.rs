//! Error types for the office core.
//!
//! Only task planning and persistence can fail. Grid construction and
//! pathfinding report "nothing walkable" or "no route" through `Option` and a
//! logged warning instead.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for every fallible core operation.
#[derive(Error, Debug)]
pub enum OfficeError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// The thread has no task that is still running
    #[error("No active task found for thread '{thread_id}'")]
    NoActiveTask { thread_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// A tool name that the supervisor toolset does not register
    #[error("Unknown tool '{name}'")]
    UnknownTool { name: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> OfficeError {
        OfficeError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> OfficeError {
        OfficeError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl OfficeError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a failed `spawn_blocking` join.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// Whether the caller supplied something unusable, as opposed to the
    /// store failing underneath it.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. }
                | Self::NoActiveTask { .. }
                | Self::InvalidInput { .. }
                | Self::UnknownTool { .. }
                | Self::Serialization { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| OfficeError::database(message).with_source(e))
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, OfficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_active_task_message_names_thread() {
        let error = OfficeError::NoActiveTask {
            thread_id: "t1".to_string(),
        };
        assert_eq!(error.to_string(), "No active task found for thread 't1'");
        assert!(error.is_caller_error());
    }

    #[test]
    fn test_invalid_input_builder() {
        let error = OfficeError::invalid_input("todos").with_reason("must not be empty");
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'todos': must not be empty"
        );
    }

    #[test]
    fn test_database_error_is_not_caller_error() {
        let error = OfficeError::database("Failed").with_source(rusqlite::Error::InvalidQuery);
        assert!(!error.is_caller_error());
        assert!(error.to_string().starts_with("Database error: Failed"));
    }
}
