use std::collections::VecDeque;

use pacman_pursuit::constants::{MAZE_HEIGHT, MAZE_WIDTH};
use pacman_pursuit::{Dir, Maze, Pos, RoutingTable, DEFAULT_MAZE};

fn default_maze() -> Maze {
    Maze::parse(DEFAULT_MAZE, MAZE_WIDTH, MAZE_HEIGHT)
}

fn open_tiles(maze: &Maze) -> Vec<Pos> {
    (0..maze.height())
        .flat_map(|y| (0..maze.width()).map(move |x| Pos::new(x, y)))
        .filter(|pos| maze.original_tile(*pos).is_walkable())
        .collect()
}

/// Plain BFS distances from `from`, indexed row-major.
fn distances(maze: &Maze, from: Pos) -> Vec<Option<usize>> {
    let mut dist = vec![None; maze.width() * maze.height()];
    let mut queue = VecDeque::from([from]);
    dist[from.y * maze.width() + from.x] = Some(0);
    while let Some(pos) = queue.pop_front() {
        let here = dist[pos.y * maze.width() + pos.x].unwrap_or(0);
        for dir in Dir::ALL {
            let Some(next) = maze.neighbor(pos, dir) else {
                continue;
            };
            let idx = next.y * maze.width() + next.x;
            if maze.original_tile(next).is_walkable() && dist[idx].is_none() {
                dist[idx] = Some(here + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

#[test]
fn default_maze_is_fully_routed() {
    let maze = default_maze();
    let routes = RoutingTable::build(&maze);
    let tiles = open_tiles(&maze);
    assert_eq!(routes.len(), tiles.len());
    assert!(maze.player_start().is_some());
    assert_eq!(maze.ghost_spawns().len(), 4);
}

#[test]
fn following_routes_takes_shortest_paths() {
    let maze = default_maze();
    let routes = RoutingTable::build(&maze);
    let tiles = open_tiles(&maze);

    for &from in &tiles {
        let dist = distances(&maze, from);
        for &to in &tiles {
            let expected = dist[to.y * maze.width() + to.x].expect("default maze is connected");
            let mut at = from;
            let mut steps = 0;
            while at != to {
                let next = routes.query(at, to).expect("route exists");
                assert!(Dir::between(at, next).is_some(), "{at:?} -> {next:?} is not adjacent");
                at = next;
                steps += 1;
                assert!(steps <= expected, "{from:?} -> {to:?} overshoots {expected}");
            }
            assert_eq!(steps, expected, "{from:?} -> {to:?}");
        }
    }
}

#[test]
fn self_and_wall_queries() {
    let maze = default_maze();
    let routes = RoutingTable::build(&maze);
    for tile in open_tiles(&maze) {
        assert_eq!(routes.query(tile, tile), Some(tile));
        assert_eq!(routes.direction(tile, tile), None);
    }
    let start = maze.player_start().expect("start marker");
    assert_eq!(routes.query(Pos::new(0, 0), start), None);
    assert_eq!(routes.query(start, Pos::new(0, 0)), None);
    assert_eq!(routes.query(start, Pos::new(99, 99)), None);
}
