use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Dir, Pos, ScreenPos, Tile};
use crate::constants::{
    AMBUSH_LOOKAHEAD, ESCAPE_AFTER, FRIGHT_SCATTER_PERCENT, PATROL_KEEP_PERCENT,
    REPRODUCTION_PERCENT,
};
use crate::level::Maze;
use crate::motion::Motion;
use crate::routing::RoutingTable;

/// Stable pursuer identifier, never reused within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PursuerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PursuerKind {
    /// Shortest path straight at the player.
    Chaser,
    /// Chaser that takes a random turn every few decisions.
    AggressiveChaser,
    /// Aims a few tiles ahead of the player.
    Ambusher,
    /// Mostly keeps going, occasionally turns at random.
    RandomPatrol,
    /// Turns at random only at intersections.
    IntersectionRandom,
}

/// Everything a pursuer may look at when picking a direction.
pub struct Pursuit<'a> {
    pub maze: &'a Maze,
    pub routes: &'a RoutingTable,
    pub player: Pos,
    pub facing: Dir,
}

#[derive(Clone, Debug)]
pub struct Pursuer {
    id: PursuerId,
    kind: PursuerKind,
    home: Pos,
    motion: Motion,
    heading: Option<Dir>,
    frightened: bool,
    active: bool,
    respawning: bool,
    speed: f32,
    delay_counter: u32,
    escape_counter: u32,
}

impl Pursuer {
    pub fn new(id: PursuerId, kind: PursuerKind, home: Pos) -> Self {
        Self {
            id,
            kind,
            home,
            motion: Motion::new(home),
            heading: None,
            frightened: false,
            active: true,
            respawning: false,
            speed: 1.0,
            delay_counter: 0,
            escape_counter: 0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Starts the pursuer on `tile` while keeping `home` as its respawn point.
    pub fn placed_at(mut self, tile: Pos) -> Self {
        self.motion.place(tile);
        self
    }

    pub fn id(&self) -> PursuerId {
        self.id
    }

    pub fn kind(&self) -> PursuerKind {
        self.kind
    }

    pub fn home(&self) -> Pos {
        self.home
    }

    pub fn tile(&self) -> Pos {
        self.motion.tile()
    }

    pub fn screen(&self) -> ScreenPos {
        self.motion.screen()
    }

    /// Last chosen direction; `None` is "stop".
    pub fn heading(&self) -> Option<Dir> {
        self.heading
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_respawning(&self) -> bool {
        self.respawning
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether the pursuer takes part in this tick.
    pub fn is_live(&self) -> bool {
        self.active && !self.respawning
    }

    pub(crate) fn set_frightened(&mut self, frightened: bool) {
        self.frightened = frightened;
    }

    /// Speed throttle. Slow pursuers count ticks and sit out until
    /// `trunc(1 / speed - 1)` have passed.
    pub(crate) fn throttled(&mut self) -> bool {
        if self.speed >= 1.0 {
            return false;
        }
        self.delay_counter += 1;
        let required = (1.0 / self.speed - 1.0) as u32;
        if self.delay_counter < required {
            return true;
        }
        self.delay_counter = 0;
        false
    }

    /// Rolls for a child pursuer. Only intersection wanderers standing on an
    /// intersection reproduce.
    pub(crate) fn wants_child(&self, maze: &Maze, rng: &mut impl Rng) -> bool {
        self.kind == PursuerKind::IntersectionRandom
            && maze.is_intersection(self.tile())
            && rng.gen_range(0..100) < REPRODUCTION_PERCENT
    }

    /// Picks a direction and starts moving along it. Stop leaves the pursuer idle.
    pub(crate) fn think(&mut self, ctx: &Pursuit<'_>, rng: &mut impl Rng) {
        self.heading = self.choose(ctx, rng);
        if let Some(dir) = self.heading {
            self.motion.begin(dir, ctx.maze);
        }
    }

    pub(crate) fn advance(&mut self) -> Option<Pos> {
        self.motion.advance()
    }

    pub(crate) fn capture(&mut self) {
        self.active = false;
        self.respawning = true;
    }

    pub(crate) fn respawn(&mut self) {
        self.motion.place(self.home);
        self.active = true;
        self.respawning = false;
        self.frightened = false;
        self.heading = None;
    }

    pub fn choose(&mut self, ctx: &Pursuit<'_>, rng: &mut impl Rng) -> Option<Dir> {
        if self.frightened {
            return self.flee(ctx, rng);
        }
        let tile = self.tile();
        match self.kind {
            PursuerKind::Chaser => chase(ctx, tile, ctx.player),
            PursuerKind::AggressiveChaser => {
                self.escape_counter += 1;
                if self.escape_counter >= ESCAPE_AFTER {
                    self.escape_counter = 0;
                    if let Some(dir) = random_dir(ctx.maze, tile, rng) {
                        return Some(dir);
                    }
                }
                chase(ctx, tile, ctx.player)
            }
            PursuerKind::Ambusher => ambush(ctx, tile),
            PursuerKind::RandomPatrol => patrol(ctx.maze, tile, self.heading, rng),
            PursuerKind::IntersectionRandom => {
                if ctx.maze.is_intersection(tile) {
                    return random_dir(ctx.maze, tile, rng);
                }
                match self.heading {
                    Some(dir) if ctx.maze.can_move(tile, dir) => Some(dir),
                    _ => random_dir(ctx.maze, tile, rng),
                }
            }
        }
    }

    fn flee(&self, ctx: &Pursuit<'_>, rng: &mut impl Rng) -> Option<Dir> {
        let tile = self.tile();
        let maze = ctx.maze;
        if maze.is_intersection(tile) && rng.gen_range(0..100) < FRIGHT_SCATTER_PERCENT {
            if let Some(dir) = random_dir(maze, tile, rng) {
                return Some(dir);
            }
        }

        let dx = tile.x as isize - ctx.player.x as isize;
        let dy = tile.y as isize - ctx.player.y as isize;
        let away = if dx.abs() > dy.abs() {
            match dx {
                d if d > 0 => Some(Dir::Right),
                d if d < 0 => Some(Dir::Left),
                _ => None,
            }
        } else {
            match dy {
                d if d > 0 => Some(Dir::Down),
                d if d < 0 => Some(Dir::Up),
                _ => None,
            }
        };
        if let Some(dir) = away.filter(|dir| maze.can_move(tile, *dir)) {
            return Some(dir);
        }

        patrol(maze, tile, self.heading, rng)
    }
}

fn random_dir(maze: &Maze, tile: Pos, rng: &mut impl Rng) -> Option<Dir> {
    maze.walkable_dirs(tile).choose(rng).copied()
}

fn chase(ctx: &Pursuit<'_>, tile: Pos, target: Pos) -> Option<Dir> {
    if !ctx.routes.contains(tile) || !ctx.routes.contains(target) {
        return None;
    }
    ctx.routes.direction(tile, target)
}

fn ambush(ctx: &Pursuit<'_>, tile: Pos) -> Option<Dir> {
    let (dx, dy) = ctx.facing.delta();
    let ahead = ctx.maze.clamp(
        ctx.player.x as isize + dx * AMBUSH_LOOKAHEAD,
        ctx.player.y as isize + dy * AMBUSH_LOOKAHEAD,
    );
    let target = if ctx.maze.tile(ahead) == Tile::Wall || !ctx.routes.contains(ahead) {
        ctx.player
    } else {
        ahead
    };
    chase(ctx, tile, target)
}

fn patrol(maze: &Maze, tile: Pos, heading: Option<Dir>, rng: &mut impl Rng) -> Option<Dir> {
    if let Some(dir) = heading {
        if rng.gen_range(0..100) < PATROL_KEEP_PERCENT && maze.can_move(tile, dir) {
            return Some(dir);
        }
    }
    random_dir(maze, tile, rng)
}

/// Kind and speed multiplier of every pursuer a round starts with, in spawn order.
pub fn roster_for_round(round: u32) -> Vec<(PursuerKind, f32)> {
    let count = match round {
        2 => 1,
        3 => 2,
        4 => 3,
        5 | 6 => 4,
        7 => 1,
        _ => 0,
    };
    (0..count)
        .map(|i| {
            let kind = match (round, i) {
                (7, _) => PursuerKind::IntersectionRandom,
                (_, 0) => PursuerKind::Chaser,
                (_, 1) => PursuerKind::IntersectionRandom,
                (_, 2) => PursuerKind::Ambusher,
                _ => PursuerKind::RandomPatrol,
            };
            let speed = match (round, i) {
                (6, 0) | (7, _) => 0.5,
                (6, 1) => 0.7,
                (6, 2) => 0.9,
                (6, _) => 1.1,
                _ => 1.0,
            };
            (kind, speed)
        })
        .collect()
}
