//! Builder for SQLite-backed planners.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Planner;
use crate::{
    db::{Database, SqliteAccess},
    error::{OfficeError, Result},
};

/// Configures where tasks are stored and creates the schema up front.
#[derive(Debug, Clone, Default)]
pub struct TaskStoreBuilder {
    database_path: Option<PathBuf>,
}

impl TaskStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/atrium/atrium.db` or `~/.local/share/atrium/atrium.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// * `OfficeError::XdgDirectory` - no default data directory is available
    /// * `OfficeError::FileSystem` - the parent directory cannot be created
    /// * `OfficeError::Database` - the schema cannot be initialized
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| OfficeError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(OfficeError::join)??;

        log::debug!("Task database ready at {}", db_path.display());
        Ok(Planner::new(SqliteAccess::new(db_path)))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("atrium")
            .place_data_file("atrium.db")
            .map_err(|e| OfficeError::XdgDirectory(e.to_string()))
    }
}
