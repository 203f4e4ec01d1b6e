//! Walkability grid built from a square floor and its obstacles.
//!
//! The grid origin sits at the floor centre: world `(0, 0)` maps to the middle
//! cell, and world `(-floor_size / 2, -floor_size / 2)` to cell `(0, 0)`. A
//! grid is immutable once built; any change to the floor or its furniture
//! means building a fresh one (see [`FloorMap`](super::FloorMap) for swapping
//! it in while searches are running).

use log::{debug, warn};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, GridCoord, WorldPos};

/// World units covered by one cell edge.
pub const DEFAULT_CELL_SIZE: f64 = 0.5;
/// Cells of clearance kept around generic furniture.
pub const DEFAULT_OBSTACLE_PADDING: usize = 1;
/// Cells of clearance kept around desks and desk clusters.
pub const DEFAULT_DESK_PADDING: usize = 4;

/// The floor edge strip is never thinner than this, whatever the padding.
const MIN_BOUNDARY_CELLS: usize = 2;
/// Upper bound on the total number of cells a grid may hold.
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Below this share of walkable cells, pathing is expected to fail often.
const MIN_WALKABLE_RATIO: f64 = 0.2;

/// Type tag selecting which padding an obstacle receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// A single desk
    Desk,
    /// A team cluster of desks
    Cluster,
    /// Any other furniture or wall
    #[default]
    Generic,
}

/// Something agents must walk around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Obstacle {
    /// Free-form label, only used in logs
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ObstacleKind,
    /// World-space bounding box
    pub bounds: Aabb,
    /// Optional explicit footprint; when present it replaces the bounding box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint: Option<Vec<WorldPos>>,
}

impl Obstacle {
    /// Obstacle described only by its bounding box.
    pub fn new(name: impl Into<String>, kind: ObstacleKind, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            kind,
            bounds,
            footprint: None,
        }
    }

    pub fn with_footprint(mut self, footprint: Vec<WorldPos>) -> Self {
        self.footprint = Some(footprint);
        self
    }

    fn uses_desk_padding(&self) -> bool {
        matches!(self.kind, ObstacleKind::Desk | ObstacleKind::Cluster)
    }
}

/// Builder for [`GridIndex`] with optional padding overrides.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    floor_size: f64,
    cell_size: f64,
    obstacle_padding: usize,
    desk_padding: usize,
}

impl GridBuilder {
    /// Starts a builder for a square floor `floor_size` world units wide.
    pub fn new(floor_size: f64) -> Self {
        Self {
            floor_size,
            cell_size: DEFAULT_CELL_SIZE,
            obstacle_padding: DEFAULT_OBSTACLE_PADDING,
            desk_padding: DEFAULT_DESK_PADDING,
        }
    }

    /// Overrides the cell size. Non-positive or non-finite sizes are ignored.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        if cell_size.is_finite() && cell_size > 0.0 {
            self.cell_size = cell_size;
        } else {
            warn!("Ignoring invalid cell size {cell_size}, keeping {}", self.cell_size);
        }
        self
    }

    /// Overrides the generic obstacle padding when a value is given.
    pub fn with_obstacle_padding(mut self, padding: Option<usize>) -> Self {
        if let Some(padding) = padding {
            self.obstacle_padding = padding;
        }
        self
    }

    /// Overrides the desk/cluster padding when a value is given.
    pub fn with_desk_padding(mut self, padding: Option<usize>) -> Self {
        if let Some(padding) = padding {
            self.desk_padding = padding;
        }
        self
    }

    /// Builds the grid. Always succeeds, even if almost nothing is walkable.
    pub fn build(&self, obstacles: &[Obstacle]) -> GridIndex {
        let mut valid_floor = self.floor_size.is_finite() && self.floor_size > 0.0;
        if !valid_floor {
            warn!(
                "Floor size {} is not a positive number; building a single blocked cell",
                self.floor_size
            );
        }

        let side = (self.floor_size / self.cell_size).ceil();
        let max_side = (MAX_GRID_CELLS as f64).sqrt().floor();
        if valid_floor && side > max_side {
            warn!(
                "Floor size {} needs {side}x{side} cells, more than the {MAX_GRID_CELLS} allowed; \
                 building a single blocked cell",
                self.floor_size
            );
            valid_floor = false;
        }

        let cells = if valid_floor { side as usize } else { 0 }.max(1);
        let offset = if valid_floor {
            self.floor_size / 2.0
        } else {
            0.0
        };

        let mut grid = GridIndex {
            cell_size: self.cell_size,
            width: cells,
            depth: cells,
            world_offset_x: offset,
            world_offset_z: offset,
            walkable: vec![true; cells * cells],
        };

        grid.block_boundary(self.obstacle_padding.max(MIN_BOUNDARY_CELLS));

        for obstacle in obstacles {
            let padding = if obstacle.uses_desk_padding() {
                self.desk_padding
            } else {
                self.obstacle_padding
            };
            grid.block_obstacle(obstacle, padding);
        }

        let walkable = grid.walkable_count();
        let ratio = grid.walkable_ratio();
        debug!(
            "Built {}x{} grid from {} obstacles: {walkable} walkable cells ({:.1}%)",
            grid.width,
            grid.depth,
            obstacles.len(),
            ratio * 100.0
        );
        if ratio < MIN_WALKABLE_RATIO {
            warn!(
                "Only {:.1}% of the {}x{} grid is walkable; pathfinding may fail frequently",
                ratio * 100.0,
                grid.width,
                grid.depth
            );
        }

        grid
    }
}

/// Immutable walkability grid.
///
/// Cells are stored column-major as `walkable[x][z]`, flattened to
/// `x * depth + z`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridIndex {
    cell_size: f64,
    width: usize,
    depth: usize,
    world_offset_x: f64,
    world_offset_z: f64,
    walkable: Vec<bool>,
}

impl GridIndex {
    /// Builds a grid with the default cell size and paddings.
    pub fn build(floor_size: f64, obstacles: &[Obstacle]) -> Self {
        GridBuilder::new(floor_size).build(obstacles)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn world_offset_x(&self) -> f64 {
        self.world_offset_x
    }

    pub fn world_offset_z(&self) -> f64 {
        self.world_offset_z
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    /// Whether the cell is inside the grid and free. Out-of-bounds cells are
    /// never walkable.
    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.index_of(coord).is_some_and(|idx| self.walkable[idx])
    }

    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }

    /// Share of walkable cells, in `[0, 1]`.
    pub fn walkable_ratio(&self) -> f64 {
        if self.walkable.is_empty() {
            return 0.0;
        }
        self.walkable_count() as f64 / self.walkable.len() as f64
    }

    /// Maps a world position to the cell containing it, clamped to the grid.
    pub fn world_to_grid(&self, x: f64, z: f64) -> GridCoord {
        GridCoord {
            x: Self::axis_to_cell(x, self.world_offset_x, self.cell_size, self.width),
            z: Self::axis_to_cell(z, self.world_offset_z, self.cell_size, self.depth),
        }
    }

    /// Maps a cell to the world coordinates of its centre.
    pub fn grid_to_world(&self, gx: usize, gz: usize) -> (f64, f64) {
        (
            gx as f64 * self.cell_size - self.world_offset_x + self.cell_size / 2.0,
            gz as f64 * self.cell_size - self.world_offset_z + self.cell_size / 2.0,
        )
    }

    /// Cell centre as a floor-level world position.
    pub fn cell_center(&self, coord: GridCoord) -> WorldPos {
        let (x, z) = self.grid_to_world(coord.x, coord.z);
        WorldPos::ground(x, z)
    }

    /// Flat index of an in-bounds cell.
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        (coord.x < self.width && coord.z < self.depth).then(|| coord.x * self.depth + coord.z)
    }

    /// Inverse of [`GridIndex::index_of`].
    pub fn coord_of(&self, index: usize) -> GridCoord {
        GridCoord {
            x: index / self.depth,
            z: index % self.depth,
        }
    }

    /// The cell `(dx, dz)` away from `coord`, if it lies inside the grid.
    pub fn offset(&self, coord: GridCoord, dx: i64, dz: i64) -> Option<GridCoord> {
        let x = coord.x as i64 + dx;
        let z = coord.z as i64 + dz;
        (x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.depth)
            .then(|| GridCoord::new(x as usize, z as usize))
    }

    fn axis_to_cell(value: f64, offset: f64, cell_size: f64, cells: usize) -> usize {
        let cell = ((value + offset) / cell_size).floor();
        if cell.is_nan() || cell < 0.0 {
            0
        } else {
            (cell as usize).min(cells - 1)
        }
    }

    fn block_boundary(&mut self, strip: usize) {
        for x in 0..self.width {
            for z in 0..self.depth {
                let near_edge = x < strip
                    || z < strip
                    || x + strip >= self.width
                    || z + strip >= self.depth;
                if near_edge {
                    self.walkable[x * self.depth + z] = false;
                }
            }
        }
    }

    fn block_obstacle(&mut self, obstacle: &Obstacle, padding: usize) {
        match obstacle.footprint.as_deref() {
            Some(points) if !points.is_empty() => {
                for point in points {
                    let cell = self.world_to_grid(point.x, point.z);
                    self.block_rect(cell, cell, padding);
                }
            }
            _ => {
                let bounds = obstacle.bounds.normalized();
                let lo = self.world_to_grid(bounds.min.x, bounds.min.z);
                let hi = self.world_to_grid(bounds.max.x, bounds.max.z);
                self.block_rect(lo, hi, padding);
            }
        }
    }

    fn block_rect(&mut self, lo: GridCoord, hi: GridCoord, padding: usize) {
        let min_x = lo.x.saturating_sub(padding);
        let min_z = lo.z.saturating_sub(padding);
        let max_x = (hi.x + padding).min(self.width - 1);
        let max_z = (hi.z + padding).min(self.depth - 1);
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                self.walkable[x * self.depth + z] = false;
            }
        }
    }
}
