//! Simulation context and fixed-rate tick scheduler.

use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;

use crate::components::{Dir, Pos};
use crate::constants::{
    CHILD_SPEED, FIRST_ROUND, FRIGHT_DURATION, LAST_ROUND, MAX_PURSUERS, PELLET_SCORE,
    POWER_SCORE, PURSUER_SCORE, RESPAWN_DELAY,
};
use crate::error::{GameError, MazeError};
use crate::ghost::{roster_for_round, Pursuer, PursuerId, PursuerKind, Pursuit};
use crate::level::{Maze, Pickup, DEFAULT_MAZE};
use crate::player::Player;
use crate::routing::RoutingTable;
use crate::timers::{Timer, TimerQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Win,
    GameOver,
}

/// Fire-and-forget notifications for the audio side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    PursuerEaten,
    GameOver,
}

/// External input, from the keyboard or the network channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    RoundUp,
    RoundDown,
    SelectRound(u32),
    Start,
    NextRound,
    Retry,
    ToMenu,
}

pub struct Game {
    maze: Option<Maze>,
    routes: Option<RoutingTable>,
    player: Player,
    pursuers: Vec<Pursuer>,
    phase: Phase,
    score: u32,
    round: u32,
    tick: Duration,
    clock: Duration,
    timers: TimerQueue,
    fright_epoch: u32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl Game {
    /// A game with no maze yet; it stays in the menu until one is supplied.
    pub fn new(tick: Duration) -> Self {
        Self {
            maze: None,
            routes: None,
            player: Player::new(Pos::new(0, 0)),
            pursuers: Vec::new(),
            phase: Phase::Menu,
            score: 0,
            round: FIRST_ROUND,
            tick,
            clock: Duration::ZERO,
            timers: TimerQueue::new(),
            fright_epoch: 0,
            next_id: 0,
            events: Vec::new(),
        }
    }

    pub fn with_maze(maze: Maze, tick: Duration) -> Self {
        let mut game = Self::new(tick);
        game.set_maze(maze);
        game
    }

    /// Installs a maze, rebuilds the routing table and returns to the menu.
    pub fn set_maze(&mut self, maze: Maze) {
        self.routes = Some(RoutingTable::build(&maze));
        self.player = Player::new(maze.player_start().unwrap_or(Pos::new(0, 0)));
        self.maze = Some(maze);
        self.pursuers.clear();
        self.timers.clear();
        self.phase = Phase::Menu;
    }

    /// Loads a maze file. On failure the current maze is kept.
    pub fn load_maze(&mut self, path: &Path, width: usize, height: usize) -> Result<(), MazeError> {
        match Maze::load(path, width, height) {
            Ok(maze) => {
                info!("loaded maze {}", path.display());
                self.set_maze(maze);
                Ok(())
            }
            Err(err) => {
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Loads `path` when given, falling back to the built-in maze when there
    /// is no path or the file cannot be read.
    pub fn load_maze_or_builtin(&mut self, path: Option<&Path>, width: usize, height: usize) {
        if let Some(path) = path {
            if self.load_maze(path, width, height).is_ok() {
                return;
            }
            warn!("falling back to the built-in maze");
        }
        self.set_maze(Maze::parse(DEFAULT_MAZE, width, height));
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn routes(&self) -> Option<&RoutingTable> {
        self.routes.as_ref()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    pub fn pursuer(&self, id: PursuerId) -> Option<&Pursuer> {
        self.pursuers.iter().find(|p| p.id() == id)
    }

    /// Simulated time elapsed in the current round.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn command(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                self.steer(dir);
            }
            Command::RoundUp if self.phase == Phase::Menu => {
                self.round = (self.round + 1).min(LAST_ROUND);
            }
            Command::RoundDown if self.phase == Phase::Menu => {
                self.round = self.round.saturating_sub(1).max(FIRST_ROUND);
            }
            Command::SelectRound(round) => {
                let _ = self.select_round(round);
            }
            Command::Start if self.phase == Phase::Menu => {
                let _ = self.start_round();
            }
            Command::NextRound if self.phase == Phase::Win => {
                self.round = if self.round < LAST_ROUND {
                    self.round + 1
                } else {
                    FIRST_ROUND
                };
                let _ = self.start_round();
            }
            Command::Retry if self.phase == Phase::GameOver => {
                let _ = self.start_round();
            }
            Command::ToMenu => self.return_to_menu(),
            _ => debug!("ignoring {:?} during {:?}", command, self.phase),
        }
    }

    /// Moves the player one tile in `dir`.
    ///
    /// Only accepted while playing, while the player is idle, and when the
    /// destination is open; anything else is dropped.
    pub fn steer(&mut self, dir: Dir) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        match self.maze.as_ref() {
            Some(maze) => self.player.try_move(dir, maze),
            None => false,
        }
    }

    /// Chooses the round. Outside the menu the new round starts straight away.
    pub fn select_round(&mut self, round: u32) -> Result<(), GameError> {
        if !(FIRST_ROUND..=LAST_ROUND).contains(&round) {
            warn!("round {round} is not selectable");
            return Err(GameError::RoundOutOfRange(round));
        }
        self.round = round;
        if self.phase == Phase::Menu {
            return Ok(());
        }
        self.start_round()
    }

    /// Resets the board and enters `Playing` at the current round.
    ///
    /// The score survives unless the game comes from the menu or a game over.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        let result = self.try_start_round();
        if let Err(err) = result {
            warn!("cannot start round {}: {err}", self.round);
        }
        result
    }

    fn try_start_round(&mut self) -> Result<(), GameError> {
        let maze = self.maze.as_mut().ok_or(GameError::NoMaze)?;
        let start = maze.player_start().ok_or(GameError::NoPlayerStart)?;

        if matches!(self.phase, Phase::Menu | Phase::GameOver) {
            self.score = 0;
        }

        maze.reset();
        maze.consume(start);
        self.player.respawn_at(start);
        self.timers.clear();
        self.clock = Duration::ZERO;
        self.spawn_roster();
        self.phase = Phase::Playing;

        info!(
            "round {} started with {} pursuers, score {}",
            self.round,
            self.pursuers.len(),
            self.score
        );
        Ok(())
    }

    pub fn return_to_menu(&mut self) {
        self.score = 0;
        self.round = FIRST_ROUND;
        self.pursuers.clear();
        self.timers.clear();
        self.phase = Phase::Menu;
    }

    fn spawn_roster(&mut self) {
        self.pursuers.clear();
        let spawns = match self.maze.as_ref() {
            Some(maze) => maze.ghost_spawns().to_vec(),
            None => return,
        };
        for ((kind, speed), home) in roster_for_round(self.round).into_iter().zip(spawns) {
            let id = self.allocate_id();
            self.pursuers
                .push(Pursuer::new(id, kind, home).with_speed(speed));
        }
    }

    /// Adds a pursuer on `at`, which also becomes its respawn tile.
    pub fn spawn_pursuer(&mut self, kind: PursuerKind, at: Pos) -> PursuerId {
        let id = self.allocate_id();
        self.pursuers.push(Pursuer::new(id, kind, at));
        id
    }

    fn spawn_child(&mut self, at: Pos) {
        let Some(home) = self
            .maze
            .as_ref()
            .and_then(|maze| maze.ghost_spawns().first().copied())
        else {
            return;
        };
        let id = self.allocate_id();
        debug!("pursuer {:?} spawned at {:?}", id, at);
        self.pursuers.push(
            Pursuer::new(id, PursuerKind::IntersectionRandom, home)
                .placed_at(at)
                .with_speed(CHILD_SPEED),
        );
    }

    fn allocate_id(&mut self) -> PursuerId {
        let id = PursuerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// One simulation step. Does nothing outside `Playing`.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::Playing {
            return;
        }
        self.clock += self.tick;
        self.fire_timers();
        let player_before = self.player.tile();
        let pursuers_before: Vec<Pos> = self.pursuers.iter().map(Pursuer::tile).collect();
        self.advance_player();
        if self.phase != Phase::Playing {
            return;
        }
        self.advance_pursuers(rng);
        self.check_collisions(player_before, &pursuers_before);
    }

    fn fire_timers(&mut self) {
        while let Some(timer) = self.timers.pop_due(self.clock) {
            match timer {
                Timer::Respawn(id) => {
                    match self
                        .pursuers
                        .iter_mut()
                        .find(|p| p.id() == id && p.is_respawning())
                    {
                        Some(pursuer) => {
                            pursuer.respawn();
                            info!("pursuer {:?} respawned at {:?}", id, pursuer.home());
                        }
                        None => debug!("respawn for {:?} has no pursuer", id),
                    }
                }
                Timer::FrightEnd { epoch } if epoch == self.fright_epoch => {
                    for pursuer in self.pursuers.iter_mut().filter(|p| p.is_active()) {
                        pursuer.set_frightened(false);
                    }
                    info!("fright over");
                }
                Timer::FrightEnd { .. } => {}
            }
        }
    }

    fn activate_fright(&mut self) {
        self.fright_epoch += 1;
        for pursuer in self.pursuers.iter_mut().filter(|p| p.is_active()) {
            pursuer.set_frightened(true);
        }
        self.timers.schedule(
            self.clock + FRIGHT_DURATION,
            Timer::FrightEnd {
                epoch: self.fright_epoch,
            },
        );
        info!("fright started");
    }

    fn advance_player(&mut self) {
        let Some(arrived) = self.player.advance() else {
            return;
        };
        let pickup = match self.maze.as_mut() {
            Some(maze) => maze.consume(arrived),
            None => return,
        };
        match pickup {
            Some(Pickup::Pellet) => {
                self.score += PELLET_SCORE;
                self.events.push(GameEvent::PelletEaten);
            }
            Some(Pickup::Power) => {
                self.score += POWER_SCORE;
                self.events.push(GameEvent::PowerPelletEaten);
                self.activate_fright();
            }
            None => {}
        }
        if self.maze.as_ref().is_some_and(Maze::all_cleared) {
            info!("round {} cleared with score {}", self.round, self.score);
            self.phase = Phase::Win;
        }
    }

    fn advance_pursuers(&mut self, rng: &mut impl Rng) {
        let (Some(maze), Some(routes)) = (self.maze.as_ref(), self.routes.as_ref()) else {
            return;
        };
        let ctx = Pursuit {
            maze,
            routes,
            player: self.player.tile(),
            facing: self.player.facing(),
        };
        let can_breed = !maze.ghost_spawns().is_empty();
        let mut roster = self.pursuers.len();
        let mut births = Vec::new();

        for pursuer in self.pursuers.iter_mut() {
            if !pursuer.is_live() || pursuer.throttled() {
                continue;
            }
            if pursuer.is_moving() {
                pursuer.advance();
                continue;
            }
            if pursuer.wants_child(maze, rng) && can_breed && roster < MAX_PURSUERS {
                births.push(pursuer.tile());
                roster += 1;
            }
            pursuer.think(&ctx, rng);
        }

        for at in births {
            self.spawn_child(at);
        }
    }

    /// A pursuer hits the player when both stand on the same tile, or when
    /// they swapped tiles during this tick. `pursuers_before` follows roster
    /// order; children born this tick have no entry.
    fn check_collisions(&mut self, player_before: Pos, pursuers_before: &[Pos]) {
        let player = self.player.tile();
        for (idx, pursuer) in self.pursuers.iter_mut().enumerate() {
            if !pursuer.is_live() {
                continue;
            }
            let here = pursuer.tile();
            let before = pursuers_before.get(idx).copied().unwrap_or(here);
            let crossed = here == player_before && before == player && here != player;
            if here != player && !crossed {
                continue;
            }
            if !pursuer.is_frightened() {
                info!("pursuer {:?} caught the player", pursuer.id());
                self.phase = Phase::GameOver;
                self.events.push(GameEvent::GameOver);
                return;
            }
            pursuer.capture();
            self.score += PURSUER_SCORE;
            self.events.push(GameEvent::PursuerEaten);
            self.timers
                .schedule(self.clock + RESPAWN_DELAY, Timer::Respawn(pursuer.id()));
            info!("pursuer {:?} eaten", pursuer.id());
        }
    }
}
