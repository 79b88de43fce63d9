// End-to-end search scenarios over small hand-built worlds.
//
// Each test builds a `VoxelWorld` shaped for one movement situation (open
// floor, a shaft, a wall to walk around, a ladder over a wall, a hazard
// strip) and checks what `search` returns through the public API only.

use ledge_nav::frontier::TieBreak;
use ledge_nav::heuristic::HeuristicKind;
use ledge_nav::material::Material;
use ledge_nav::{
    CoordBounds, NavError, SearchConfig, SearchOutcome, SearchRequest, VoxelCoord, VoxelWorld,
    search, search_batch,
};

fn v(x: i32, y: i32, z: i32) -> VoxelCoord {
    VoxelCoord::new(x, y, z)
}

/// 16x8x16 world with a stone floor at y = 0. Agents stand at y = 1.
fn floor_world() -> VoxelWorld {
    let mut world = VoxelWorld::new(16, 8, 16);
    world.fill_layer(0, Material::Stone);
    world
}

fn plain() -> SearchConfig {
    SearchConfig {
        any_angle: false,
        ..SearchConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Basic outcomes
// ---------------------------------------------------------------------------

#[test]
fn flat_floor_reaches_goal_cheaply() {
    let world = floor_world();
    let (start, goal) = (v(0, 1, 0), v(9, 1, 6));
    let path = search(&world, &SearchConfig::default(), SearchRequest::new(start, goal)).unwrap();
    assert_eq!(path.outcome, SearchOutcome::GoalReached);
    assert_eq!(path.end, goal);
    let cost = path.total_cost().unwrap();
    assert!(cost < 10.0, "cost {cost}");
    let nodes = path.reconstruct();
    assert_eq!(nodes.first(), Some(&start));
    assert_eq!(nodes.last(), Some(&goal));
}

#[test]
fn straight_drop_is_one_penalized_edge() {
    // Solid block with a three-deep shaft; the start hangs over it.
    let mut world = VoxelWorld::new(9, 8, 9);
    world.fill(v(0, 0, 0), v(8, 3, 8), Material::Stone);
    world.fill(v(4, 1, 4), v(4, 3, 4), Material::Air);
    let start = v(4, 4, 4);
    let goal = start.down(1);

    let path = search(&world, &SearchConfig::default(), SearchRequest::new(start, goal)).unwrap();
    assert_eq!(path.outcome, SearchOutcome::GoalReached);
    assert_eq!(path.reconstruct(), vec![start, goal]);
    assert_eq!(path.total_cost(), Some(100.0));
}

#[test]
fn shaft_floor_costs_every_fallen_cell_in_both_modes() {
    let mut world = VoxelWorld::new(9, 8, 9);
    world.fill(v(0, 0, 0), v(8, 3, 8), Material::Stone);
    world.fill(v(4, 1, 4), v(4, 3, 4), Material::Air);
    let (start, floor) = (v(4, 4, 4), v(4, 1, 4));
    let req = SearchRequest::new(start, floor);

    // Two unsupported landings at 100 each plus the step onto the floor.
    let any = search(&world, &SearchConfig::default(), req).unwrap();
    assert_eq!(any.outcome, SearchOutcome::GoalReached);
    assert_eq!(any.reconstruct(), vec![start, floor]);
    assert_eq!(any.total_cost(), Some(201.0));

    let grid = search(&world, &plain(), req).unwrap();
    assert_eq!(grid.outcome, SearchOutcome::GoalReached);
    assert_eq!(grid.reconstruct(), vec![start, v(4, 3, 4), v(4, 2, 4), floor]);
    assert_eq!(grid.total_cost(), Some(201.0));
}

#[test]
fn distance_cutoff_stops_near_the_limit() {
    let world = floor_world();
    let start = v(1, 1, 1);
    let req = SearchRequest::new(start, v(14, 1, 14)).with_max_distance(3.0);
    let path = search(&world, &SearchConfig::default(), req).unwrap();

    assert_eq!(path.outcome, SearchOutcome::DistanceCutOff);
    assert_eq!(path.goal, v(14, 1, 14));
    let d = start.euclidean_distance(path.end);
    assert!(d >= 3.0 && d < 3.0 + 3f64.sqrt(), "end {} at {d}", path.end);
    assert!(path.reached(path.end));
    let nodes = path.reconstruct();
    assert_eq!(nodes.first(), Some(&start));
    assert_eq!(nodes.last(), Some(&path.end));
}

#[test]
fn enclosed_start_has_no_path() {
    let mut world = VoxelWorld::new(8, 8, 8);
    world.fill(v(0, 0, 0), v(7, 7, 7), Material::Stone);
    world.fill(v(2, 1, 2), v(2, 2, 2), Material::Air);
    let config = SearchConfig::default();
    let path = search(&world, &config, SearchRequest::new(v(2, 1, 2), v(5, 1, 5))).unwrap();
    assert_ne!(path.outcome, SearchOutcome::GoalReached);
    assert!(path.iterations <= config.max_iterations);
    assert!(path.reconstruct().is_empty());
}

#[test]
fn disconnected_goal_within_tiny_cap() {
    let mut world = floor_world();
    // Full-width wall too tall to climb.
    world.fill(v(8, 1, 0), v(8, 7, 15), Material::Stone);
    let config = SearchConfig {
        max_iterations: 50,
        ..SearchConfig::default()
    };
    let path = search(&world, &config, SearchRequest::new(v(2, 1, 2), v(12, 1, 2))).unwrap();
    assert_eq!(path.outcome, SearchOutcome::IterationsExhausted);
    assert_eq!(path.iterations, 50);
    assert!(path.reconstruct().is_empty());
}

// ---------------------------------------------------------------------------
// Obstacles
// ---------------------------------------------------------------------------

#[test]
fn any_angle_rounds_a_wall_more_cheaply_than_grid_steps() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 2, 10), Material::Stone);
    let req = SearchRequest::new(v(2, 1, 2), v(10, 1, 2));

    // Uniform-cost grid search gives the exact step count for comparison.
    let dijkstra = SearchConfig {
        heuristic: HeuristicKind::Zero,
        ..plain()
    };
    let grid = search(&world, &dijkstra, req).unwrap();
    let any = search(&world, &SearchConfig::default(), req).unwrap();
    assert_eq!(grid.outcome, SearchOutcome::GoalReached);
    assert_eq!(any.outcome, SearchOutcome::GoalReached);

    // Ten moves to get past the wall's end, ten to come back.
    let grid_cost = grid.total_cost().unwrap();
    let any_cost = any.total_cost().unwrap();
    assert_eq!(grid_cost, 20.0);
    assert!(any_cost >= 2.0 && any_cost < grid_cost, "{any_cost}");

    // Neither route passes through the wall.
    for node in any.reconstruct().iter().chain(grid.reconstruct().iter()) {
        assert!(world.get(*node).is_passable(), "{node}");
    }
}

#[test]
fn ladder_carries_the_agent_over_a_wall() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 3, 15), Material::Stone);
    world.fill(v(5, 1, 8), v(5, 3, 8), Material::Ladder);
    let req = SearchRequest::new(v(2, 1, 8), v(10, 1, 8));

    for config in [SearchConfig::default(), plain()] {
        let path = search(&world, &config, req).unwrap();
        assert_eq!(path.outcome, SearchOutcome::GoalReached);
        let nodes = path.reconstruct();
        assert!(nodes.iter().any(|n| n.y >= 4), "{nodes:?}");
    }
}

#[test]
fn magma_strip_is_walked_around() {
    let mut world = floor_world();
    world.fill(v(6, 0, 0), v(6, 0, 12), Material::MagmaBlock);
    let req = SearchRequest::new(v(2, 1, 6), v(10, 1, 6));

    let path = search(&world, &SearchConfig::default(), req).unwrap();
    assert_eq!(path.outcome, SearchOutcome::GoalReached);
    assert!(path.total_cost().unwrap() < 100.0);
    for node in path.reconstruct() {
        assert!(world.get(node.down(1)).is_safe(), "{node} stands on a hazard");
    }
}

#[test]
fn lava_blocks_the_walk_layer_in_grid_mode() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 1, 15), Material::Lava);
    let config = SearchConfig {
        max_iterations: 5_000,
        ..plain()
    };
    let path = search(&world, &config, SearchRequest::new(v(2, 1, 6), v(10, 1, 6))).unwrap();
    assert_ne!(path.outcome, SearchOutcome::GoalReached);
    assert!(path.reconstruct().is_empty());
}

// ---------------------------------------------------------------------------
// Repeatability and reconstruction
// ---------------------------------------------------------------------------

#[test]
fn repeated_search_gives_the_same_cost() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 2, 10), Material::Stone);
    world.fill(v(9, 1, 5), v(12, 1, 6), Material::Stone);
    let req = SearchRequest::new(v(1, 1, 1), v(13, 1, 3));
    let first = search(&world, &SearchConfig::default(), req).unwrap();
    let second = search(&world, &SearchConfig::default(), req).unwrap();
    assert_eq!(first.total_cost(), second.total_cost());
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.iterations, second.iterations);
}

#[test]
fn every_tie_break_finds_the_same_cost_around_walls() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 2, 10), Material::Stone);
    world.fill(v(9, 1, 5), v(12, 1, 6), Material::Stone);
    let req = SearchRequest::new(v(1, 1, 1), v(13, 1, 3));
    let rules = [
        TieBreak::Fifo,
        TieBreak::Lifo,
        TieBreak::PreferDeeper,
        TieBreak::PreferShallower,
    ];

    for (any_angle, expected) in [(true, 3.0), (false, 20.0)] {
        for tie_break in rules {
            let config = SearchConfig {
                any_angle,
                tie_break,
                ..SearchConfig::default()
            };
            let path = search(&world, &config, req).unwrap();
            assert_eq!(path.outcome, SearchOutcome::GoalReached, "{tie_break:?}");
            let label = format!("{tie_break:?} any_angle={any_angle}");
            assert_eq!(path.total_cost(), Some(expected), "{label}");

            let nodes = path.reconstruct();
            assert_eq!(nodes.first(), Some(&req.start));
            assert_eq!(nodes.last(), Some(&req.goal));
            for w in nodes.windows(2) {
                assert_eq!(path.parents[&w[1]], w[0]);
                assert!(path.costs[&w[1]] > path.costs[&w[0]], "{tie_break:?}");
            }
        }
    }
}

#[test]
fn reconstructed_chain_follows_parents_with_rising_cost() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 2, 10), Material::Stone);
    let req = SearchRequest::new(v(2, 1, 2), v(10, 1, 2));
    let path = search(&world, &plain(), req).unwrap();
    let nodes = path.reconstruct();
    assert_eq!(nodes[0], path.start);
    for w in nodes.windows(2) {
        assert_eq!(path.parents[&w[1]], w[0]);
        assert!(path.costs[&w[1]] > path.costs[&w[0]]);
    }
}

#[test]
fn route_round_trips_through_json() {
    let world = floor_world();
    let path = search(&world, &SearchConfig::default(), SearchRequest::new(v(1, 1, 1), v(7, 1, 3)))
        .unwrap();
    let route = path.route();
    let json = serde_json::to_string(&route).unwrap();
    let back: ledge_nav::Route = serde_json::from_str(&json).unwrap();
    assert_eq!(back, route);
    assert_eq!(back.outcome, SearchOutcome::GoalReached);
}

// ---------------------------------------------------------------------------
// Validation and batches
// ---------------------------------------------------------------------------

#[test]
fn endpoints_outside_bounds_fail_fast() {
    let world = floor_world();
    let config = SearchConfig {
        bounds: CoordBounds::new(v(-4, -4, -4), v(20, 12, 20)),
        ..SearchConfig::default()
    };
    let err = search(&world, &config, SearchRequest::new(v(-5, 1, 1), v(3, 1, 3))).unwrap_err();
    assert!(matches!(err, NavError::InvalidCoordinate { .. }));
    assert!(err.to_string().starts_with("start"));
}

#[test]
fn infinite_max_distance_is_accepted() {
    let world = floor_world();
    let req = SearchRequest::new(v(1, 1, 1), v(4, 1, 4)).with_max_distance(f64::INFINITY);
    assert!(search(&world, &SearchConfig::default(), req).is_ok());
    let req = req.with_max_distance(f64::NAN);
    assert!(matches!(
        search(&world, &SearchConfig::default(), req),
        Err(NavError::InvalidParameter { .. })
    ));
}

#[test]
fn batch_matches_sequential_searches() {
    let mut world = floor_world();
    world.fill(v(6, 1, 0), v(6, 2, 10), Material::Stone);
    let requests: Vec<SearchRequest> = (0..8)
        .map(|i| SearchRequest::new(v(1, 1, i), v(12, 1, 15 - i)))
        .collect();
    let config = SearchConfig::default();
    let batch = search_batch(&world, &config, &requests);
    assert_eq!(batch.len(), requests.len());
    for (req, result) in requests.iter().zip(batch) {
        let alone = search(&world, &config, *req).unwrap();
        let together = result.unwrap();
        assert_eq!(together.total_cost(), alone.total_cost());
        assert_eq!(together.end, alone.end);
    }
}
