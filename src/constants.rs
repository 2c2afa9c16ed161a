use std::time::Duration;

pub const MAZE_WIDTH: usize = 28;
pub const MAZE_HEIGHT: usize = 31;
/// Largest accepted maze side. The routing table grows with the square of
/// the open tile count.
pub const MAX_MAZE_SIDE: u16 = 64;

/// Animation steps an agent takes to cross one tile.
pub const MOVE_STEPS: u32 = 6;

pub const DEFAULT_TICK_MS: u64 = 40;
pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const DEFAULT_COMMAND_PORT: u16 = 12345;

pub const PELLET_SCORE: u32 = 1;
pub const POWER_SCORE: u32 = 5;
pub const PURSUER_SCORE: u32 = 50;

pub const FRIGHT_DURATION: Duration = Duration::from_secs(10);
pub const RESPAWN_DELAY: Duration = Duration::from_secs(2);

pub const FIRST_ROUND: u32 = 1;
pub const LAST_ROUND: u32 = 7;
pub const MAX_PURSUERS: usize = 13;

/// Tiles ahead of the player the ambusher aims for.
pub const AMBUSH_LOOKAHEAD: isize = 4;
/// Consecutive evaluations before the aggressive chaser takes a random turn.
pub const ESCAPE_AFTER: u32 = 8;
pub const PATROL_KEEP_PERCENT: u32 = 70;
pub const FRIGHT_SCATTER_PERCENT: u32 = 50;
pub const REPRODUCTION_PERCENT: u32 = 5;
pub const CHILD_SPEED: f32 = 0.5;

pub const MOUTH_STEP_DEGREES: i32 = 15;
pub const MOUTH_MAX_DEGREES: i32 = 45;
pub const MOUTH_START_DEGREES: i32 = 10;
pub const MOUTH_FRAME_INTERVAL: u32 = 2;
