//! A* search over a [`GridIndex`].
//!
//! Movement is 4-connected with unit step cost and a Manhattan heuristic. The
//! frontier is a binary heap keyed on `(f, insertion sequence)`, so among
//! equal-f entries the earliest pushed is expanded first and results are
//! reproducible. Parents live in a per-search arena indexed by flat cell
//! index; nothing survives the call.

use std::{cmp::Reverse, collections::BinaryHeap};

use log::{debug, warn};

use super::{
    geometry::{GridCoord, WorldPos},
    grid::GridIndex,
};

/// +x, -x, +z, -z
const NEIGHBOURS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const NO_PARENT: usize = usize::MAX;

/// Finds a walkable path between two world positions.
///
/// Endpoints that fall on blocked cells are snapped to the nearest walkable
/// cell first. The returned points are cell centres at floor level, from the
/// (snapped) start to the (snapped) goal inclusive. `None` means no path
/// currently exists; callers should skip the move or retry later.
pub fn find_path(grid: &GridIndex, start: WorldPos, end: WorldPos) -> Option<Vec<WorldPos>> {
    let from = snap_endpoint(grid, grid.world_to_grid(start.x, start.z), "start")?;
    let to = snap_endpoint(grid, grid.world_to_grid(end.x, end.z), "end")?;

    let Some(cells) = find_grid_path(grid, from, to) else {
        warn!(
            "No path from ({}, {}) to ({}, {})",
            from.x, from.z, to.x, to.z
        );
        return None;
    };

    Some(cells.into_iter().map(|c| grid.cell_center(c)).collect())
}

/// A* between two cells. Both must be walkable; no snapping is done here.
pub fn find_grid_path(grid: &GridIndex, start: GridCoord, goal: GridCoord) -> Option<Vec<GridCoord>> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let start_idx = grid.index_of(start)?;
    let goal_idx = grid.index_of(goal)?;
    let mut arena = SearchArena::new(grid.len());

    arena.g_cost[start_idx] = 0;
    arena.push(start.manhattan(goal), start_idx);

    while let Some(Reverse((_f, _seq, idx))) = arena.open.pop() {
        if arena.closed[idx] {
            continue;
        }
        if idx == goal_idx {
            return Some(arena.reconstruct(grid, goal_idx));
        }
        arena.closed[idx] = true;

        let current = grid.coord_of(idx);
        let next_cost = arena.g_cost[idx] + 1;

        for (dx, dz) in NEIGHBOURS {
            let Some(next) = grid.offset(current, dx, dz) else {
                continue;
            };
            if !grid.is_walkable(next) {
                continue;
            }
            let Some(next_idx) = grid.index_of(next) else {
                continue;
            };
            if arena.closed[next_idx] || next_cost >= arena.g_cost[next_idx] {
                continue;
            }
            arena.g_cost[next_idx] = next_cost;
            arena.parent[next_idx] = idx;
            arena.push(next_cost + next.manhattan(goal), next_idx);
        }
    }

    None
}

/// Nearest walkable cell to `origin`, searching square rings of growing
/// radius up to the larger grid dimension.
///
/// Within a ring the candidate with the smallest Manhattan distance wins;
/// ties go to the first in scan order (x ascending, then z ascending).
pub fn nearest_walkable(grid: &GridIndex, origin: GridCoord) -> Option<GridCoord> {
    if grid.is_walkable(origin) {
        return Some(origin);
    }

    let max_radius = grid.width().max(grid.depth()) as i64;
    for r in 1..=max_radius {
        let mut best: Option<(usize, GridCoord)> = None;
        for dx in -r..=r {
            for dz in -r..=r {
                if dx.abs() != r && dz.abs() != r {
                    continue;
                }
                let Some(cell) = grid.offset(origin, dx, dz) else {
                    continue;
                };
                if !grid.is_walkable(cell) {
                    continue;
                }
                let distance = (dx.abs() + dz.abs()) as usize;
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, cell));
                }
            }
        }
        if let Some((_, cell)) = best {
            return Some(cell);
        }
    }

    None
}

fn snap_endpoint(grid: &GridIndex, cell: GridCoord, label: &str) -> Option<GridCoord> {
    match nearest_walkable(grid, cell) {
        Some(snapped) => {
            if snapped != cell {
                debug!(
                    "Snapped {label} from ({}, {}) to walkable ({}, {})",
                    cell.x, cell.z, snapped.x, snapped.z
                );
            }
            Some(snapped)
        }
        None => {
            warn!(
                "No walkable cell near {label} ({}, {}); grid is fully blocked",
                cell.x, cell.z
            );
            None
        }
    }
}

/// Per-search node storage.
struct SearchArena {
    g_cost: Vec<usize>,
    parent: Vec<usize>,
    closed: Vec<bool>,
    open: BinaryHeap<Reverse<(usize, u64, usize)>>,
    seq: u64,
}

impl SearchArena {
    fn new(cells: usize) -> Self {
        Self {
            g_cost: vec![usize::MAX; cells],
            parent: vec![NO_PARENT; cells],
            closed: vec![false; cells],
            open: BinaryHeap::new(),
            seq: 0,
        }
    }

    fn push(&mut self, f_cost: usize, idx: usize) {
        self.open.push(Reverse((f_cost, self.seq, idx)));
        self.seq += 1;
    }

    fn reconstruct(&self, grid: &GridIndex, goal_idx: usize) -> Vec<GridCoord> {
        let mut path = Vec::new();
        let mut idx = goal_idx;
        loop {
            path.push(grid.coord_of(idx));
            let parent = self.parent[idx];
            if parent == NO_PARENT {
                break;
            }
            idx = parent;
        }
        path.reverse();
        path
    }
}
