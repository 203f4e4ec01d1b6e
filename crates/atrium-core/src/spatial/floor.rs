//! Floor plan input and the shared, swappable grid built from it.

use std::{
    fs,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use log::info;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    geometry::WorldPos,
    grid::{GridBuilder, GridIndex, Obstacle},
    pathfinder,
};
use crate::error::{OfficeError, Result};

/// Serializable description of one office floor.
///
/// ```json
/// {
///   "floor_size": 20.0,
///   "desk_padding": 2,
///   "obstacles": [
///     { "name": "team-a", "kind": "cluster",
///       "bounds": { "min": { "x": -3, "z": -2 }, "max": { "x": 3, "z": 2 } } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FloorPlan {
    /// Edge length of the square floor in world units
    pub floor_size: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    /// Padding in cells around generic obstacles (default 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacle_padding: Option<usize>,
    /// Padding in cells around desks and clusters (default 4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk_padding: Option<usize>,
}

impl FloorPlan {
    pub fn new(floor_size: f64, obstacles: Vec<Obstacle>) -> Self {
        Self {
            floor_size,
            obstacles,
            obstacle_padding: None,
            desk_padding: None,
        }
    }

    /// Parses a floor plan from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a floor plan file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| OfficeError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    pub fn grid_builder(&self) -> GridBuilder {
        GridBuilder::new(self.floor_size)
            .with_obstacle_padding(self.obstacle_padding)
            .with_desk_padding(self.desk_padding)
    }

    pub fn build_grid(&self) -> GridIndex {
        self.grid_builder().build(&self.obstacles)
    }
}

/// The current grid of a floor, shared between concurrent searches.
///
/// Searches work on an `Arc` snapshot. A rebuild constructs the new grid
/// without holding the lock and then swaps the pointer, so a search never
/// sees a half-built grid and in-flight searches finish on the old one.
#[derive(Debug)]
pub struct FloorMap {
    current: RwLock<Arc<GridIndex>>,
}

impl FloorMap {
    pub fn new(grid: GridIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(grid)),
        }
    }

    pub fn from_plan(plan: &FloorPlan) -> Self {
        Self::new(plan.build_grid())
    }

    /// The grid as of now. Later rebuilds do not affect the returned value.
    pub fn snapshot(&self) -> Arc<GridIndex> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `grid` and returns the one it replaced.
    pub fn replace(&self, grid: GridIndex) -> Arc<GridIndex> {
        self.swap(Arc::new(grid))
    }

    fn swap(&self, next: Arc<GridIndex>) -> Arc<GridIndex> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, next)
    }

    /// Rebuilds the grid from a new plan and installs it.
    ///
    /// Returns the grid this call installed, even if another rebuild has
    /// replaced it since.
    pub fn rebuild(&self, plan: &FloorPlan) -> Arc<GridIndex> {
        let grid = Arc::new(plan.build_grid());
        info!(
            "Rebuilt floor grid: {}x{} cells, {} obstacles, {} walkable",
            grid.width(),
            grid.depth(),
            plan.obstacles.len(),
            grid.walkable_count()
        );
        self.swap(grid.clone());
        grid
    }

    /// Path search on the current snapshot.
    pub fn find_path(&self, start: WorldPos, end: WorldPos) -> Option<Vec<WorldPos>> {
        pathfinder::find_path(&self.snapshot(), start, end)
    }
}

impl Default for FloorMap {
    /// An empty floor with no walkable cells until a plan is loaded.
    fn default() -> Self {
        Self::new(GridIndex::build(0.0, &[]))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::spatial::{Aabb, ObstacleKind};

    const PLAN_JSON: &str = r#"{
        "floor_size": 20.0,
        "desk_padding": 2,
        "obstacles": [
            { "name": "team-a", "kind": "cluster",
              "bounds": { "min": { "x": -3, "z": -2 }, "max": { "x": 3, "z": 2 } } }
        ]
    }"#;

    #[test]
    fn test_plan_from_json() {
        let plan = FloorPlan::from_json(PLAN_JSON).unwrap();
        assert_eq!(plan.floor_size, 20.0);
        assert_eq!(plan.desk_padding, Some(2));
        assert_eq!(plan.obstacle_padding, None);
        assert_eq!(plan.obstacles[0].kind, ObstacleKind::Cluster);
    }

    #[test]
    fn test_plan_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PLAN_JSON.as_bytes()).unwrap();
        let plan = FloorPlan::from_file(file.path()).unwrap();
        assert_eq!(plan.obstacles.len(), 1);
    }

    #[test]
    fn test_missing_file_is_file_system_error() {
        let err = FloorPlan::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, OfficeError::FileSystem { .. }));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = FloorPlan::from_json("{ floor_size: }").unwrap_err();
        assert!(matches!(err, OfficeError::Serialization { .. }));
    }

    #[test]
    fn test_plan_padding_overrides_reach_grid() {
        let plan = FloorPlan::from_json(PLAN_JSON).unwrap();
        let narrow = plan.build_grid();
        let wide = FloorPlan {
            desk_padding: None,
            ..plan
        }
        .build_grid();
        assert!(narrow.walkable_count() > wide.walkable_count());
    }

    #[test]
    fn test_snapshot_survives_rebuild() {
        let map = FloorMap::from_plan(&FloorPlan::new(10.0, Vec::new()));
        let before = map.snapshot();
        assert!(map
            .find_path(WorldPos::ground(0.0, -3.0), WorldPos::ground(0.0, 3.0))
            .is_some());

        let wall = Obstacle::new(
            "wall",
            ObstacleKind::Generic,
            Aabb::new(WorldPos::ground(-10.0, -0.1), WorldPos::ground(10.0, 0.1)),
        );
        map.rebuild(&FloorPlan::new(10.0, vec![wall]));

        assert!(map
            .find_path(WorldPos::ground(0.0, -3.0), WorldPos::ground(0.0, 3.0))
            .is_none());
        // The old snapshot is untouched.
        assert!(pathfinder::find_path(&before, WorldPos::ground(0.0, -3.0), WorldPos::ground(0.0, 3.0)).is_some());
        assert_ne!(*before, *map.snapshot());
    }

    #[test]
    fn test_concurrent_rebuilds_report_their_own_grid() {
        let map = Arc::new(FloorMap::default());
        let handles: Vec<_> = [8.0, 12.0, 16.0, 24.0]
            .into_iter()
            .map(|size| {
                let map = Arc::clone(&map);
                std::thread::spawn(move || {
                    (0..20)
                        .map(|_| map.rebuild(&FloorPlan::new(size, Vec::new())).width())
                        .all(|width| width == (size / 0.5) as usize)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_replace_returns_previous_grid() {
        let map = FloorMap::default();
        assert_eq!(map.snapshot().walkable_count(), 0);
        let old = map.replace(GridIndex::build(10.0, &[]));
        assert_eq!(old.walkable_count(), 0);
        assert_eq!(map.snapshot().width(), 20);
    }
}
