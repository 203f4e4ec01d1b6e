//! Task and todo queries for the SQLite store.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row, TransactionBehavior};

use super::{store::TaskStore, Database};
use crate::{
    error::{DatabaseResultExt, OfficeError, Result},
    models::{NewTask, Task, TaskPatch, Todo, TodoStatus},
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (thread_id, title, description, plan_segments, done, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)";
const SELECT_TASK_SQL: &str = "SELECT id, thread_id, title, description, plan_segments, done, created_at, updated_at FROM tasks WHERE id = ?1";
const SELECT_LATEST_IN_THREAD_SQL: &str =
    "SELECT id, done FROM tasks WHERE thread_id = ?1 ORDER BY id DESC LIMIT 1";
const SELECT_THREAD_TASK_IDS_SQL: &str =
    "SELECT id FROM tasks WHERE thread_id = ?1 ORDER BY id DESC";
const TOUCH_TASK_SQL: &str = "UPDATE tasks SET updated_at = ?1 WHERE id = ?2";
const UPDATE_PLAN_SEGMENTS_SQL: &str = "UPDATE tasks SET plan_segments = ?1 WHERE id = ?2";
const UPDATE_DONE_SQL: &str = "UPDATE tasks SET done = ?1 WHERE id = ?2";

const SELECT_TODOS_SQL: &str =
    "SELECT title, status FROM todos WHERE task_id = ?1 ORDER BY todo_order";
const DELETE_TODOS_SQL: &str = "DELETE FROM todos WHERE task_id = ?1";
const INSERT_TODO_SQL: &str =
    "INSERT INTO todos (task_id, todo_order, title, status) VALUES (?1, ?2, ?3, ?4)";

impl TaskStore for Database {
    fn create_task(&mut self, task: &NewTask) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let plan_segments = vec![task.plan.clone()];
        let segments_json = serde_json::to_string(&plan_segments)?;

        tx.execute(
            INSERT_TASK_SQL,
            params![
                &task.thread_id,
                &task.title,
                task.description.as_deref(),
                segments_json,
                now.to_string()
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;
        replace_todos(&tx, id, &task.todos)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            thread_id: task.thread_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            plan_segments,
            todos: task.todos.clone(),
            done: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        load_task(&self.connection, id)
    }

    fn get_active_by_thread(&self, thread_id: &str) -> Result<Option<Task>> {
        match active_task_id(&self.connection, thread_id)? {
            Some(id) => load_task(&self.connection, id),
            None => Ok(None),
        }
    }

    fn list_tasks(&self, thread_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_THREAD_TASK_IDS_SQL)
            .db_context("Failed to prepare query")?;

        let ids = stmt
            .query_map(params![thread_id], |row| row.get::<_, i64>(0))
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task row")?;

        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(task) = load_task(&self.connection, id as u64)? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    fn patch_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !write_patch(&tx, id, patch, Timestamp::now())? {
            return Err(OfficeError::TaskNotFound { id });
        }
        let task = load_task(&tx, id)?.ok_or(OfficeError::TaskNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }

    fn modify_task<R>(&mut self, id: u64, f: impl FnOnce(&mut Task) -> R) -> Result<(Task, R)> {
        self.modify_locked(|_| Ok(id), f)
    }

    fn modify_active_by_thread<R>(
        &mut self,
        thread_id: &str,
        f: impl FnOnce(&mut Task) -> R,
    ) -> Result<(Task, R)> {
        self.modify_locked(
            |conn| {
                active_task_id(conn, thread_id)?.ok_or_else(|| OfficeError::NoActiveTask {
                    thread_id: thread_id.to_string(),
                })
            },
            f,
        )
    }
}

impl Database {
    /// Runs a read-modify-write inside an IMMEDIATE transaction, so the write
    /// lock is held from the first read until commit.
    fn modify_locked<R>(
        &mut self,
        locate: impl FnOnce(&Connection) -> Result<u64>,
        f: impl FnOnce(&mut Task) -> R,
    ) -> Result<(Task, R)> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let id = locate(&tx)?;
        let mut task = load_task(&tx, id)?.ok_or(OfficeError::TaskNotFound { id })?;

        let output = f(&mut task);
        task.updated_at = Timestamp::now();
        write_patch(&tx, id, &TaskPatch::from_task(&task), task.updated_at)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((task, output))
    }
}

/// The newest task of a thread, unless it is done.
fn active_task_id(conn: &Connection, thread_id: &str) -> Result<Option<u64>> {
    let latest: Option<(i64, bool)> = conn
        .query_row(SELECT_LATEST_IN_THREAD_SQL, params![thread_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()
        .db_context("Failed to query active task")?;

    Ok(latest.and_then(|(id, done)| (!done).then_some(id as u64)))
}

fn load_task(conn: &Connection, id: u64) -> Result<Option<Task>> {
    let task = conn
        .query_row(SELECT_TASK_SQL, params![id as i64], task_from_row)
        .optional()
        .db_context("Failed to query task")?;

    match task {
        Some(mut task) => {
            task.todos = load_todos(conn, task.id)?;
            Ok(Some(task))
        }
        None => Ok(None),
    }
}

fn load_todos(conn: &Connection, task_id: u64) -> Result<Vec<Todo>> {
    let mut stmt = conn
        .prepare_cached(SELECT_TODOS_SQL)
        .db_context("Failed to prepare todo query")?;

    let todos = stmt
        .query_map(params![task_id as i64], |row| {
            let status_str: String = row.get(1)?;
            let status = status_str.parse::<TodoStatus>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    Type::Text,
                    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
                )
            })?;
            Ok(Todo {
                title: row.get(0)?,
                status,
            })
        })
        .db_context("Failed to query todos")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read todo row")?;

    Ok(todos)
}

/// Writes the patched fields. Returns `false` when the task does not exist.
fn write_patch(conn: &Connection, id: u64, patch: &TaskPatch, now: Timestamp) -> Result<bool> {
    let touched = conn
        .execute(TOUCH_TASK_SQL, params![now.to_string(), id as i64])
        .db_context("Failed to update task")?;
    if touched == 0 {
        return Ok(false);
    }

    if let Some(segments) = &patch.plan_segments {
        let segments_json = serde_json::to_string(segments)?;
        conn.execute(UPDATE_PLAN_SEGMENTS_SQL, params![segments_json, id as i64])
            .db_context("Failed to update plan")?;
    }
    if let Some(done) = patch.done {
        conn.execute(UPDATE_DONE_SQL, params![done, id as i64])
            .db_context("Failed to update task status")?;
    }
    if let Some(todos) = &patch.todos {
        replace_todos(conn, id, todos)?;
    }
    Ok(true)
}

fn replace_todos(conn: &Connection, task_id: u64, todos: &[Todo]) -> Result<()> {
    conn.execute(DELETE_TODOS_SQL, params![task_id as i64])
        .db_context("Failed to clear todos")?;

    let mut stmt = conn
        .prepare_cached(INSERT_TODO_SQL)
        .db_context("Failed to prepare todo insert")?;
    for (order, todo) in todos.iter().enumerate() {
        stmt.execute(params![
            task_id as i64,
            order as i64,
            &todo.title,
            todo.status.as_str()
        ])
        .db_context("Failed to insert todo")?;
    }
    Ok(())
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let segments_json: String = row.get(4)?;
    let plan_segments = serde_json::from_str(&segments_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        thread_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        plan_segments,
        todos: Vec::new(),
        done: row.get(5)?,
        created_at: parse_timestamp(row, 6)?,
        updated_at: parse_timestamp(row, 7)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
