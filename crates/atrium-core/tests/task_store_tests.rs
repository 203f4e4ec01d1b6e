mod common;

use atrium_core::{
    models::{TaskPatch, TodoStatus},
    MemoryStore, OfficeError, TaskStore,
};
use common::{create_test_db, new_task};

fn check_active_follows_done_flag<S: TaskStore>(store: &mut S) {
    let task = store.create_task(&new_task("t1", &["a"])).unwrap();
    assert_eq!(
        store.get_active_by_thread("t1").unwrap().map(|t| t.id),
        Some(task.id)
    );

    store
        .patch_task(task.id, &TaskPatch {
            done: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert!(store.get_active_by_thread("t1").unwrap().is_none());
    assert!(store.get_task(task.id).unwrap().unwrap().done);
}

fn check_history_is_newest_first<S: TaskStore>(store: &mut S) {
    let first = store.create_task(&new_task("t1", &["a"])).unwrap();
    let other = store.create_task(&new_task("t2", &["x"])).unwrap();
    let second = store.create_task(&new_task("t1", &["b"])).unwrap();

    let ids: Vec<u64> = store.list_tasks("t1").unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(store.list_tasks("t2").unwrap()[0].id, other.id);
}

fn check_modify_returns_closure_output<S: TaskStore>(store: &mut S) {
    let task = store.create_task(&new_task("t1", &["a", "b"])).unwrap();

    let (modified, previous) = store
        .modify_active_by_thread("t1", |task| {
            let previous = task.todos[0].status;
            task.todos[0].status = TodoStatus::InProgress;
            previous
        })
        .unwrap();

    assert_eq!(previous, TodoStatus::Pending);
    assert_eq!(modified.todos[0].status, TodoStatus::InProgress);
    assert_eq!(store.get_task(task.id).unwrap().unwrap(), modified);
}

fn check_missing_records<S: TaskStore>(store: &mut S) {
    assert!(store.get_task(404).unwrap().is_none());
    assert!(matches!(
        store.modify_task(404, |_| ()),
        Err(OfficeError::TaskNotFound { id: 404 })
    ));
    assert!(matches!(
        store.modify_active_by_thread("ghost", |_| ()),
        Err(OfficeError::NoActiveTask { .. })
    ));
}

#[test]
fn test_database_active_follows_done_flag() {
    let (_file, mut db) = create_test_db();
    check_active_follows_done_flag(&mut db);
}

#[test]
fn test_memory_active_follows_done_flag() {
    check_active_follows_done_flag(&mut MemoryStore::new());
}

#[test]
fn test_database_history_is_newest_first() {
    let (_file, mut db) = create_test_db();
    check_history_is_newest_first(&mut db);
}

#[test]
fn test_memory_history_is_newest_first() {
    check_history_is_newest_first(&mut MemoryStore::new());
}

#[test]
fn test_database_modify_returns_closure_output() {
    let (_file, mut db) = create_test_db();
    check_modify_returns_closure_output(&mut db);
}

#[test]
fn test_memory_modify_returns_closure_output() {
    check_modify_returns_closure_output(&mut MemoryStore::new());
}

#[test]
fn test_database_missing_records() {
    let (_file, mut db) = create_test_db();
    check_missing_records(&mut db);
}

#[test]
fn test_memory_missing_records() {
    check_missing_records(&mut MemoryStore::new());
}

#[test]
fn test_database_survives_reopen() {
    let (file, mut db) = create_test_db();
    let task = db.create_task(&new_task("t1", &["a", "b"])).unwrap();
    drop(db);

    let reopened = atrium_core::Database::new(file.path()).unwrap();
    let loaded = reopened.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded, task);
}
