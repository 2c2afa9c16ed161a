//! All-pairs next-step routing over the maze's open tiles.
//!
//! One breadth-first search per open tile fills a dense `V x V` table, so a
//! pursuer asking "where do I step to reach X" is a single index lookup.

use std::collections::VecDeque;

use log::{debug, info};

use crate::components::{Dir, Pos};
use crate::level::Maze;

const NO_ROUTE: u32 = u32::MAX;

pub struct RoutingTable {
    width: usize,
    height: usize,
    /// Row-major tile index -> node id, `NO_ROUTE` for walls.
    ids: Vec<u32>,
    nodes: Vec<Pos>,
    /// `next[source * V + dest]` is the node id of the first step.
    next: Vec<u32>,
}

impl RoutingTable {
    /// Builds the table from the maze's loaded wall layout.
    pub fn build(maze: &Maze) -> Self {
        let width = maze.width();
        let height = maze.height();
        info!("building routing table for {}x{} maze", width, height);

        let mut ids = vec![NO_ROUTE; width * height];
        let mut nodes = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let pos = Pos { x, y };
                if maze.original_tile(pos).is_walkable() {
                    ids[y * width + x] = nodes.len() as u32;
                    nodes.push(pos);
                }
            }
        }

        let count = nodes.len();
        let mut table = Self {
            width,
            height,
            ids,
            nodes,
            next: vec![NO_ROUTE; count * count],
        };

        let mut first_step = vec![NO_ROUTE; count];
        let mut queue = VecDeque::with_capacity(count);
        for source in 0..count {
            table.search_from(maze, source as u32, &mut first_step, &mut queue);
        }

        info!("routing table complete, {} nodes", count);
        table
    }

    /// BFS from `source`, neighbours visited up, down, left, right. Every tile
    /// inherits the first step of the tile that discovered it.
    fn search_from(
        &mut self,
        maze: &Maze,
        source: u32,
        first_step: &mut [u32],
        queue: &mut VecDeque<u32>,
    ) {
        first_step.fill(NO_ROUTE);
        queue.clear();

        first_step[source as usize] = source;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let pos = self.nodes[current as usize];
            for dir in Dir::ALL {
                let Some(next) = maze.neighbor(pos, dir) else {
                    continue;
                };
                let id = self.ids[next.y * self.width + next.x];
                if id == NO_ROUTE || first_step[id as usize] != NO_ROUTE {
                    continue;
                }
                first_step[id as usize] = if current == source {
                    id
                } else {
                    first_step[current as usize]
                };
                queue.push_back(id);
            }
        }

        let count = self.nodes.len();
        let row = source as usize * count;
        self.next[row..row + count].copy_from_slice(first_step);
        debug!("routes from {:?} computed", self.nodes[source as usize]);
    }

    /// Number of open tiles in the table.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.id(pos).is_some()
    }

    /// First tile on a shortest path from `from` to `to`.
    ///
    /// Returns `from` itself when the two coincide, `None` when either tile is
    /// a wall or `to` is unreachable.
    pub fn query(&self, from: Pos, to: Pos) -> Option<Pos> {
        let source = self.id(from)?;
        let dest = self.id(to)?;
        let step = self.next[source as usize * self.nodes.len() + dest as usize];
        (step != NO_ROUTE).then(|| self.nodes[step as usize])
    }

    /// Direction of the first step from `from` toward `to`; `None` means stop.
    pub fn direction(&self, from: Pos, to: Pos) -> Option<Dir> {
        self.query(from, to).and_then(|next| Dir::between(from, next))
    }

    fn id(&self, pos: Pos) -> Option<u32> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        let id = self.ids[pos.y * self.width + pos.x];
        (id != NO_ROUTE).then_some(id)
    }
}
