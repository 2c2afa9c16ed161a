use crate::components::{Dir, Pos, ScreenPos};
use crate::constants::MOVE_STEPS;
use crate::level::Maze;

/// Tile-to-tile movement with linear interpolation of the render position.
///
/// An agent is either idle on `tile` or moving toward `target`. A move cannot
/// be redirected once it has begun.
#[derive(Clone, Debug)]
pub struct Motion {
    tile: Pos,
    screen: ScreenPos,
    target: Option<Pos>,
    step: u32,
    steps: u32,
    step_delta: (f32, f32),
}

impl Motion {
    pub fn new(tile: Pos) -> Self {
        Self {
            tile,
            screen: ScreenPos::center_of(tile),
            target: None,
            step: 0,
            steps: MOVE_STEPS,
            step_delta: (0.0, 0.0),
        }
    }

    pub fn tile(&self) -> Pos {
        self.tile
    }

    pub fn screen(&self) -> ScreenPos {
        self.screen
    }

    pub fn target(&self) -> Option<Pos> {
        self.target
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    /// Starts a move one tile in `dir`. Refused while already moving or when
    /// the neighbour is not walkable on the working grid.
    pub fn begin(&mut self, dir: Dir, maze: &Maze) -> bool {
        if self.is_moving() {
            return false;
        }
        let Some(next) = maze.step(self.tile, dir) else {
            return false;
        };
        let (dx, dy) = dir.delta();
        let steps = self.steps as f32;
        self.target = Some(next);
        self.step = 0;
        self.step_delta = (dx as f32 / steps, dy as f32 / steps);
        true
    }

    /// Advances one animation step. Returns the new tile on arrival.
    pub fn advance(&mut self) -> Option<Pos> {
        let target = self.target?;
        self.step += 1;
        self.screen.x += self.step_delta.0;
        self.screen.y += self.step_delta.1;
        if self.step < self.steps {
            return None;
        }
        self.tile = target;
        self.screen = ScreenPos::center_of(target);
        self.target = None;
        self.step = 0;
        Some(target)
    }

    /// Drops any move in flight and stands on `tile`.
    pub fn place(&mut self, tile: Pos) {
        *self = Self::new(tile);
    }
}
