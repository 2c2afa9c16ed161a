use std::fs;
use std::path::Path;

use log::debug;

use crate::components::{Dir, Pos, Tile};
use crate::error::MazeError;

/// Maze shipped with the game, 28 x 31.
pub const DEFAULT_MAZE: &str = include_str!("../assets/map.txt");

/// What the player picked up when entering a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    Pellet,
    Power,
}

/// Fixed-size maze grid.
///
/// `original` is never mutated after parsing; `grid` is the working copy that
/// pellets are eaten from and that [`Maze::reset`] restores.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    original: Vec<Tile>,
    grid: Vec<Tile>,
    player_start: Option<Pos>,
    ghost_spawns: Vec<Pos>,
}

impl Maze {
    /// Parses maze text into a `width` x `height` grid.
    ///
    /// `1` wall, `2` spawn area, `3` empty path, `4` power pellet, `g` empty
    /// path and pursuer spawn, `p` pellet and player start, anything else a
    /// pellet. Characters past the bounds are ignored; cells the text does not
    /// reach stay walls.
    pub fn parse(text: &str, width: usize, height: usize) -> Self {
        let mut grid = vec![Tile::Wall; width * height];
        let mut player_start = None;
        let mut ghost_spawns = Vec::new();

        for (y, line) in text.lines().take(height).enumerate() {
            for (x, ch) in line.chars().take(width).enumerate() {
                let tile = match ch {
                    '1' => Tile::Wall,
                    '2' => Tile::Spawn,
                    '3' => Tile::Empty,
                    '4' => Tile::Power,
                    'g' => {
                        ghost_spawns.push(Pos { x, y });
                        Tile::Empty
                    }
                    'p' => {
                        player_start = Some(Pos { x, y });
                        Tile::Pellet
                    }
                    _ => Tile::Pellet,
                };
                grid[y * width + x] = tile;
            }
        }

        debug!(
            "parsed {}x{} maze with {} pursuer spawns",
            width,
            height,
            ghost_spawns.len()
        );

        Self {
            width,
            height,
            original: grid.clone(),
            grid,
            player_start,
            ghost_spawns,
        }
    }

    pub fn load(path: &Path, width: usize, height: usize) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text, width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_start(&self) -> Option<Pos> {
        self.player_start
    }

    pub fn ghost_spawns(&self) -> &[Pos] {
        &self.ghost_spawns
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Working-grid cell at `pos`. Anything outside the bounds reads as a wall.
    pub fn tile(&self, pos: Pos) -> Tile {
        if self.contains(pos) {
            self.grid[self.index(pos)]
        } else {
            Tile::Wall
        }
    }

    /// Cell at `pos` as it was loaded.
    pub fn original_tile(&self, pos: Pos) -> Tile {
        if self.contains(pos) {
            self.original[self.index(pos)]
        } else {
            Tile::Wall
        }
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile(pos).is_walkable()
    }

    /// In-bounds neighbour of `pos` in `dir`, walls included.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let next = Pos {
            x: nx as usize,
            y: ny as usize,
        };
        self.contains(next).then_some(next)
    }

    /// Neighbour of `pos` in `dir` if it can be stepped on.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        self.neighbor(pos, dir).filter(|next| self.is_walkable(*next))
    }

    pub fn can_move(&self, pos: Pos, dir: Dir) -> bool {
        self.step(pos, dir).is_some()
    }

    /// Directions out of `pos` that lead onto a walkable tile, in [`Dir::ALL`] order.
    pub fn walkable_dirs(&self, pos: Pos) -> Vec<Dir> {
        Dir::ALL
            .into_iter()
            .filter(|dir| self.can_move(pos, *dir))
            .collect()
    }

    /// True when three or more neighbours of `pos` are open.
    pub fn is_intersection(&self, pos: Pos) -> bool {
        self.walkable_dirs(pos).len() >= 3
    }

    /// Clamps a signed coordinate into the grid.
    pub fn clamp(&self, x: isize, y: isize) -> Pos {
        let max_x = self.width.saturating_sub(1) as isize;
        let max_y = self.height.saturating_sub(1) as isize;
        Pos {
            x: x.clamp(0, max_x.max(0)) as usize,
            y: y.clamp(0, max_y.max(0)) as usize,
        }
    }

    /// Eats whatever collectible sits on `pos`.
    pub fn consume(&mut self, pos: Pos) -> Option<Pickup> {
        if !self.contains(pos) {
            return None;
        }
        let idx = self.index(pos);
        let pickup = match self.grid[idx] {
            Tile::Pellet => Pickup::Pellet,
            Tile::Power => Pickup::Power,
            _ => return None,
        };
        self.grid[idx] = Tile::Empty;
        Some(pickup)
    }

    pub fn pellets_left(&self) -> usize {
        self.grid.iter().filter(|t| t.is_collectible()).count()
    }

    pub fn all_cleared(&self) -> bool {
        !self.grid.iter().any(|t| t.is_collectible())
    }

    /// Restores the working grid from the pristine copy.
    pub fn reset(&mut self) {
        self.grid.copy_from_slice(&self.original);
    }

    fn index(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }
}
