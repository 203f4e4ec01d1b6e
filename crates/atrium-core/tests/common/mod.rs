#![allow(dead_code)]

use atrium_core::{
    models::{NewTask, Todo},
    spatial::{Aabb, Obstacle, ObstacleKind, WorldPos},
    Database, Planner, TaskStoreBuilder,
};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = TaskStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

pub fn new_task(thread_id: &str, todos: &[&str]) -> NewTask {
    NewTask {
        thread_id: thread_id.to_string(),
        title: format!("Task for {thread_id}"),
        description: None,
        plan: "Initial plan".to_string(),
        todos: todos.iter().map(|t| Todo::pending(*t)).collect(),
    }
}

pub fn desk_at(x: f64, z: f64) -> Obstacle {
    Obstacle::new(
        "desk",
        ObstacleKind::Desk,
        Aabb::around(WorldPos::ground(x, z), 2.0, 1.0),
    )
}

pub fn wall_across_x(z: f64, floor_size: f64) -> Obstacle {
    let half = floor_size / 2.0;
    Obstacle::new(
        "wall",
        ObstacleKind::Generic,
        Aabb::new(WorldPos::ground(-half, z - 0.1), WorldPos::ground(half, z + 0.1)),
    )
}
