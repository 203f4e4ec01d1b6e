//! Office floor geometry: walkability grid, A* pathfinding and desk layout.
//!
//! This half of the crate has no dependency on task planning or storage. The
//! scene layer builds a [`GridIndex`] from a [`FloorPlan`], asks
//! [`find_path`] for routes between world positions, and uses [`DeskLayout`]
//! to place desks and employees.
//!
//! ```text
//! FloorPlan ──build──▶ GridIndex ──snapshot──▶ find_path ──▶ Vec<WorldPos>
//!                          ▲
//!                 FloorMap (atomic swap on rebuild)
//! ```
//!
//! # Example
//!
//! ```rust
//! use atrium_core::spatial::{find_path, Aabb, GridIndex, Obstacle, ObstacleKind, WorldPos};
//!
//! let desk = Obstacle::new(
//!     "desk",
//!     ObstacleKind::Desk,
//!     Aabb::around(WorldPos::ORIGIN, 2.0, 1.0),
//! );
//! let grid = GridIndex::build(20.0, &[desk]);
//!
//! let path = find_path(&grid, WorldPos::ground(-8.0, 0.0), WorldPos::ground(8.0, 0.0))
//!     .expect("the floor is open around the desk");
//! assert_eq!(path.first(), Some(&WorldPos::ground(-7.75, 0.25)));
//! ```

pub mod floor;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod pathfinder;

pub use floor::{FloorMap, FloorPlan};
pub use geometry::{Aabb, GridCoord, WorldPos};
pub use grid::{GridBuilder, GridIndex, Obstacle, ObstacleKind};
pub use layout::{DeskDimensions, DeskLayout, DeskPlacement};
pub use pathfinder::{find_grid_path, find_path, nearest_walkable};
