//! Desk placement inside a team cluster.
//!
//! A lone desk (the supervisor's) sits on the cluster centre. Larger clusters
//! are laid out in rows of [`DESKS_PER_ROW`]: the first row sits behind the
//! centre line facing `π`, every later row in front of it facing `0`. These
//! are plain functions of their inputs, used both for the initial layout and
//! for recomputing positions after a cluster is dragged.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::WorldPos;

pub const DESKS_PER_ROW: usize = 3;

/// Rotation of a lone desk: one full turn, i.e. facing forward.
pub const SINGLE_DESK_ROTATION: f64 = TAU;
/// Rotation of desks in the first row.
pub const FIRST_ROW_ROTATION: f64 = PI;
/// Rotation of desks in every row after the first.
pub const BACK_ROW_ROTATION: f64 = 0.0;

/// Physical sizes the layout is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeskDimensions {
    pub desk_width: f64,
    pub desk_depth: f64,
    pub employee_radius: f64,
    /// Extra clearance between the desk edge and the employee
    pub stand_gap: f64,
    pub stand_height: f64,
}

impl Default for DeskDimensions {
    fn default() -> Self {
        Self {
            desk_width: 2.0,
            desk_depth: 1.0,
            employee_radius: 0.3,
            stand_gap: 0.2,
            stand_height: 0.0,
        }
    }
}

impl DeskDimensions {
    /// Centre-to-centre distance between neighbouring desks in a row.
    pub fn spacing_x(&self) -> f64 {
        self.desk_width + 0.5
    }

    /// Centre-to-centre distance between the two rows.
    pub fn spacing_z(&self) -> f64 {
        self.desk_depth + 1.5
    }

    fn stand_offset(&self) -> f64 {
        self.desk_depth / 2.0 + self.employee_radius + self.stand_gap
    }
}

/// Everything the scene needs to place one desk and its occupant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeskPlacement {
    pub desk_index: usize,
    /// Absolute desk centre
    pub position: WorldPos,
    /// Rotation about the vertical axis, in radians
    pub rotation_y: f64,
    /// Where the assigned employee stands
    pub stand_position: WorldPos,
}

/// Desk layout calculator for one set of [`DeskDimensions`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeskLayout {
    dimensions: DeskDimensions,
}

impl DeskLayout {
    pub fn new(dimensions: DeskDimensions) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> &DeskDimensions {
        &self.dimensions
    }

    /// Desk centre relative to the cluster centre.
    pub fn desk_position(&self, desk_index: usize, total_desks: usize) -> WorldPos {
        if total_desks == 1 {
            return WorldPos::ORIGIN;
        }

        let row = desk_index / DESKS_PER_ROW;
        let col = desk_index % DESKS_PER_ROW;
        let half_row_gap = self.dimensions.spacing_z() / 2.0;

        WorldPos::new(
            (col as f64 - 1.0) * self.dimensions.spacing_x(),
            0.0,
            if row == 0 { -half_row_gap } else { half_row_gap },
        )
    }

    /// Desk centre in world space.
    pub fn absolute_desk_position(
        &self,
        cluster_position: WorldPos,
        desk_index: usize,
        total_desks: usize,
    ) -> WorldPos {
        self.desk_position(desk_index, total_desks)
            .translated(cluster_position)
    }

    /// Desk rotation about the vertical axis.
    pub fn desk_rotation(desk_index: usize, total_desks: usize) -> f64 {
        if total_desks == 1 {
            SINGLE_DESK_ROTATION
        } else if desk_index / DESKS_PER_ROW == 0 {
            FIRST_ROW_ROTATION
        } else {
            BACK_ROW_ROTATION
        }
    }

    /// Where an employee stands in front of a desk.
    pub fn employee_stand_position(&self, desk_position: WorldPos, desk_rotation: f64) -> WorldPos {
        let (fx, fz) = forward_vector(desk_rotation);
        let offset = self.dimensions.stand_offset();
        WorldPos::new(
            desk_position.x + fx * offset,
            self.dimensions.stand_height,
            desk_position.z + fz * offset,
        )
    }

    /// Full placement of one desk in world space.
    pub fn placement(
        &self,
        cluster_position: WorldPos,
        desk_index: usize,
        total_desks: usize,
    ) -> DeskPlacement {
        let position = self.absolute_desk_position(cluster_position, desk_index, total_desks);
        let rotation_y = Self::desk_rotation(desk_index, total_desks);
        DeskPlacement {
            desk_index,
            position,
            rotation_y,
            stand_position: self.employee_stand_position(position, rotation_y),
        }
    }

    /// Placements for every desk of a cluster, in index order.
    pub fn cluster_layout(&self, cluster_position: WorldPos, total_desks: usize) -> Vec<DeskPlacement> {
        (0..total_desks)
            .map(|index| self.placement(cluster_position, index, total_desks))
            .collect()
    }
}

/// Unit forward vector `(sin θ, cos θ)` on the floor plane. Quarter turns
/// produce exact components.
fn forward_vector(rotation: f64) -> (f64, f64) {
    let turn = rotation.rem_euclid(TAU);
    let quarters = turn / FRAC_PI_2;
    if (quarters - quarters.round()).abs() < 1e-9 {
        match (quarters.round() as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        (turn.sin(), turn.cos())
    }
}
