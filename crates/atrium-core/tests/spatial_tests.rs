mod common;

use std::f64::consts::{PI, TAU};

use atrium_core::spatial::{
    find_path, DeskLayout, FloorMap, FloorPlan, GridBuilder, GridCoord, GridIndex, WorldPos,
};
use common::{desk_at, wall_across_x};

#[test]
fn test_coordinates_round_trip() {
    let grid = GridIndex::build(17.0, &[desk_at(1.0, 2.0)]);
    for gx in 0..grid.width() {
        for gz in 0..grid.depth() {
            let (x, z) = grid.grid_to_world(gx, gz);
            assert_eq!(grid.world_to_grid(x, z), GridCoord::new(gx, gz));
        }
    }
}

#[test]
fn test_empty_floor_boundary_and_interior() {
    let grid = GridIndex::build(10.0, &[]);
    assert_eq!(grid.width(), 20);
    for x in 0..grid.width() {
        for z in 0..grid.depth() {
            let edge = x < 2 || z < 2 || x >= grid.width() - 2 || z >= grid.depth() - 2;
            assert_eq!(grid.is_walkable(GridCoord::new(x, z)), !edge, "cell ({x}, {z})");
        }
    }
}

#[test]
fn test_padding_is_monotone() {
    let obstacles = [desk_at(0.0, 0.0), desk_at(-4.0, 3.0)];
    let mut previous = usize::MAX;
    for padding in 0..6 {
        let count = GridBuilder::new(20.0)
            .with_obstacle_padding(Some(padding))
            .with_desk_padding(Some(padding))
            .build(&obstacles)
            .walkable_count();
        assert!(count <= previous, "padding {padding} grew the walkable area");
        previous = count;
    }
}

#[test]
fn test_path_steps_are_adjacent_and_walkable() {
    let grid = GridIndex::build(30.0, &[desk_at(0.0, 0.0), desk_at(6.0, -4.0)]);
    let path = find_path(&grid, WorldPos::ground(-10.0, -10.0), WorldPos::ground(10.0, 10.0))
        .expect("open floor has a route");

    let cells: Vec<GridCoord> = path.iter().map(|p| grid.world_to_grid(p.x, p.z)).collect();
    for cell in &cells {
        assert!(grid.is_walkable(*cell));
    }
    for pair in cells.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]));
    }
    assert!(path.iter().all(|p| p.y == 0.0));
}

#[test]
fn test_full_width_wall_blocks_every_route() {
    let grid = GridIndex::build(20.0, &[wall_across_x(0.0, 20.0)]);
    let path = find_path(&grid, WorldPos::ground(0.0, -6.0), WorldPos::ground(0.0, 6.0));
    assert!(path.is_none());
}

#[test]
fn test_single_desk_layout() {
    let layout = DeskLayout::default();
    assert_eq!(layout.desk_position(0, 1), WorldPos::ORIGIN);
    assert_eq!(DeskLayout::desk_rotation(0, 1), TAU);
}

#[test]
fn test_rows_sit_on_opposite_sides_of_cluster() {
    let layout = DeskLayout::default();
    let cluster = WorldPos::ground(10.0, -5.0);
    let placements = layout.cluster_layout(cluster, 6);

    assert_eq!(placements.len(), 6);
    for placement in &placements[..3] {
        assert_eq!(placement.rotation_y, PI);
        assert!(placement.position.z < cluster.z);
    }
    for placement in &placements[3..] {
        assert_eq!(placement.rotation_y, 0.0);
        assert!(placement.position.z > cluster.z);
    }
}

#[test]
fn test_floor_map_rebuild_swaps_snapshot() {
    let floor = FloorMap::from_plan(&FloorPlan::new(20.0, Vec::new()));
    let before = floor.snapshot();

    floor.rebuild(&FloorPlan::new(20.0, vec![wall_across_x(0.0, 20.0)]));

    let start = WorldPos::ground(0.0, -6.0);
    let goal = WorldPos::ground(0.0, 6.0);
    assert!(find_path(&before, start, goal).is_some());
    assert!(floor.find_path(start, goal).is_none());
}
