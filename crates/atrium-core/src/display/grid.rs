//! ASCII rendering of a walkability grid.

use std::{collections::HashSet, fmt};

use crate::spatial::{GridCoord, GridIndex, WorldPos};

/// Draws a [`GridIndex`] one character per cell, rows along +z.
///
/// `#` is blocked, `.` walkable, `*` a path cell, `S` and `G` the path's
/// start and goal. The map is wrapped in a fenced code block.
///
/// ```rust
/// use atrium_core::{display::GridMap, spatial::GridIndex};
///
/// let grid = GridIndex::build(3.0, &[]);
/// let map = GridMap::new(&grid).to_string();
/// assert!(map.contains("######"));
/// assert!(map.contains("##..##"));
/// ```
pub struct GridMap<'a> {
    grid: &'a GridIndex,
    path: Vec<GridCoord>,
}

impl<'a> GridMap<'a> {
    pub fn new(grid: &'a GridIndex) -> Self {
        Self {
            grid,
            path: Vec::new(),
        }
    }

    /// Overlays a world-space path returned by the pathfinder.
    pub fn with_path(mut self, path: &[WorldPos]) -> Self {
        self.path = path
            .iter()
            .map(|p| self.grid.world_to_grid(p.x, p.z))
            .collect();
        self
    }

    fn glyph(&self, coord: GridCoord, on_path: &HashSet<GridCoord>) -> char {
        if self.path.first() == Some(&coord) {
            'S'
        } else if self.path.last() == Some(&coord) {
            'G'
        } else if on_path.contains(&coord) {
            '*'
        } else if self.grid.is_walkable(coord) {
            '.'
        } else {
            '#'
        }
    }
}

impl fmt::Display for GridMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_path: HashSet<GridCoord> = self.path.iter().copied().collect();

        writeln!(f, "```text")?;
        for z in 0..self.grid.depth() {
            let row: String = (0..self.grid.width())
                .map(|x| self.glyph(GridCoord::new(x, z), &on_path))
                .collect();
            writeln!(f, "{row}")?;
        }
        writeln!(f, "```")?;
        writeln!(
            f,
            "{}x{} cells of {} units, {:.0}% walkable",
            self.grid.width(),
            self.grid.depth(),
            self.grid.cell_size(),
            self.grid.walkable_ratio() * 100.0
        )
    }
}
