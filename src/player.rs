use crate::components::{Dir, Pos, ScreenPos};
use crate::constants::{
    MOUTH_FRAME_INTERVAL, MOUTH_MAX_DEGREES, MOUTH_START_DEGREES, MOUTH_STEP_DEGREES,
};
use crate::level::Maze;
use crate::motion::Motion;

#[derive(Clone, Debug)]
pub struct Player {
    motion: Motion,
    facing: Dir,
    mouth_angle: i32,
    mouth_opening: i32,
    mouth_frames: u32,
}

impl Player {
    pub fn new(tile: Pos) -> Self {
        Self {
            motion: Motion::new(tile),
            facing: Dir::Right,
            mouth_angle: MOUTH_START_DEGREES,
            mouth_opening: 1,
            mouth_frames: 0,
        }
    }

    pub fn tile(&self) -> Pos {
        self.motion.tile()
    }

    pub fn screen(&self) -> ScreenPos {
        self.motion.screen()
    }

    pub fn facing(&self) -> Dir {
        self.facing
    }

    /// Cosmetic mouth opening in degrees.
    pub fn mouth_angle(&self) -> i32 {
        self.mouth_angle
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    /// Turns toward `dir` and starts moving if the player is idle and the
    /// next tile is open. Rejected moves leave facing untouched.
    pub fn try_move(&mut self, dir: Dir, maze: &Maze) -> bool {
        if self.motion.is_moving() || !maze.can_move(self.tile(), dir) {
            return false;
        }
        self.facing = dir;
        self.motion.begin(dir, maze)
    }

    /// One animation step; returns the tile arrived on, if any.
    pub fn advance(&mut self) -> Option<Pos> {
        if !self.motion.is_moving() {
            return None;
        }
        let arrived = self.motion.advance();
        self.animate_mouth();
        arrived
    }

    /// Puts the player back on `tile`, facing right.
    pub fn respawn_at(&mut self, tile: Pos) {
        *self = Self::new(tile);
    }

    fn animate_mouth(&mut self) {
        self.mouth_frames += 1;
        if self.mouth_frames <= MOUTH_FRAME_INTERVAL {
            return;
        }
        self.mouth_frames = 0;
        self.mouth_angle += self.mouth_opening * MOUTH_STEP_DEGREES;
        if self.mouth_angle >= MOUTH_MAX_DEGREES || self.mouth_angle <= 0 {
            self.mouth_opening = -self.mouth_opening;
        }
    }
}
