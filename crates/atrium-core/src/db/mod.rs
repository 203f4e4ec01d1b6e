//! Task persistence.
//!
//! [`TaskStore`] is the interface the planner talks to. [`Database`] keeps
//! tasks in SQLite and [`MemoryStore`] keeps them in a map for embedding and
//! tests. Both give `modify_task` read-modify-write atomicity.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod memory;
pub mod migrations;
pub mod store;
pub mod task_queries;

pub use memory::MemoryStore;
pub use store::{SharedMemoryStore, SqliteAccess, StoreAccess, TaskStore};

/// SQLite-backed task store.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
