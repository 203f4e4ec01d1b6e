//! World-space and grid-space value types shared by the spatial modules.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point in world space. The floor is the `y = 0` plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WorldPos {
    pub x: f64,
    /// Height above the floor; ignored by the grid
    #[serde(default)]
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    pub const ORIGIN: WorldPos = WorldPos {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the floor plane.
    pub fn ground(x: f64, z: f64) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Component-wise sum, used to move cluster-relative positions into
    /// world space.
    pub fn translated(self, by: WorldPos) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
            z: self.z + by.z,
        }
    }
}

/// Axis-aligned bounding box of an obstacle in world space.
///
/// Only the x/z extent matters to the grid. Corners given in the wrong order
/// are normalised by [`Aabb::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Aabb {
    pub min: WorldPos,
    pub max: WorldPos,
}

impl Aabb {
    pub fn new(min: WorldPos, max: WorldPos) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` with the given full width (x) and depth (z).
    pub fn around(center: WorldPos, width: f64, depth: f64) -> Self {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        Self {
            min: WorldPos::new(center.x - hw, center.y, center.z - hd),
            max: WorldPos::new(center.x + hw, center.y, center.z + hd),
        }
    }

    /// Returns the box with `min <= max` on every axis.
    pub fn normalized(self) -> Self {
        Self {
            min: WorldPos::new(
                self.min.x.min(self.max.x),
                self.min.y.min(self.max.y),
                self.min.z.min(self.max.z),
            ),
            max: WorldPos::new(
                self.min.x.max(self.max.x),
                self.min.y.max(self.max.y),
                self.min.z.max(self.max.z),
            ),
        }
    }
}

/// Integer cell coordinates inside a [`GridIndex`](super::GridIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GridCoord {
    pub x: usize,
    pub z: usize,
}

impl GridCoord {
    pub fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    /// Manhattan distance, the heuristic for 4-connected unit-cost search.
    pub fn manhattan(self, other: GridCoord) -> usize {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self.manhattan(other) == 1
    }
}
