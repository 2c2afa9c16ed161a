/// Kind of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
    Spawn,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        self != Tile::Wall
    }

    pub fn is_collectible(self) -> bool {
        matches!(self, Tile::Pellet | Tile::Power)
    }
}

/// Macro position: the column (`x`) and row (`y`) of a maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Neighbour visiting order. Routing ties are broken by this order.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    /// Direction of a single step from `from` to `to`, `None` when they coincide.
    ///
    /// Horizontal offsets win over vertical ones.
    pub fn between(from: Pos, to: Pos) -> Option<Dir> {
        let dx = to.x as isize - from.x as isize;
        let dy = to.y as isize - from.y as isize;
        if dx > 0 {
            Some(Dir::Right)
        } else if dx < 0 {
            Some(Dir::Left)
        } else if dy > 0 {
            Some(Dir::Down)
        } else if dy < 0 {
            Some(Dir::Up)
        } else {
            None
        }
    }
}

/// Continuous render position, measured in tiles from the maze's top-left corner.
///
/// The centre of tile `(x, y)` is `(x + 0.5, y + 0.5)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub fn center_of(pos: Pos) -> Self {
        Self {
            x: pos.x as f32 + 0.5,
            y: pos.y as f32 + 0.5,
        }
    }

    /// Tile under this render position, clamped into a `width` x `height` grid.
    pub fn to_pos(self, width: usize, height: usize) -> Pos {
        let clamp = |v: f32, len: usize| -> usize {
            let max = len.saturating_sub(1);
            if v.is_nan() || v < 0.0 {
                0
            } else {
                (v.floor() as usize).min(max)
            }
        };
        Pos {
            x: clamp(self.x, width),
            y: clamp(self.y, height),
        }
    }
}
