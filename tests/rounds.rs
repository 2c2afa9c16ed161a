use std::time::Duration;

use pacman_pursuit::constants::{
    DEFAULT_TICK_MS, FRIGHT_DURATION, MAZE_HEIGHT, MAZE_WIDTH, MOVE_STEPS, PELLET_SCORE,
    POWER_SCORE,
};
use pacman_pursuit::{Command, Dir, Game, GameEvent, Maze, Phase, Pos, PursuerKind, DEFAULT_MAZE};
use rand::rngs::mock::StepRng;
use rstest::rstest;

fn tick() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

fn game_on(text: &str, width: usize, height: usize) -> Game {
    Game::with_maze(Maze::parse(text, width, height), tick())
}

fn run(game: &mut Game, ticks: u32) {
    let mut rng = StepRng::new(0, 0);
    for _ in 0..ticks {
        game.tick(&mut rng);
    }
}

/// Steers one tile and waits for the arrival.
fn walk(game: &mut Game, dir: Dir) {
    assert!(game.steer(dir), "move {dir:?} refused");
    run(game, MOVE_STEPS);
}

#[test]
fn clearing_the_board_wins() {
    let mut game = game_on("111\np04", 3, 2);
    game.command(Command::Start);
    assert_eq!(game.phase(), Phase::Playing);

    walk(&mut game, Dir::Right);
    assert_eq!(game.score(), PELLET_SCORE);
    walk(&mut game, Dir::Right);
    assert_eq!(game.score(), PELLET_SCORE + POWER_SCORE);
    assert_eq!(game.phase(), Phase::Win);
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::PelletEaten, GameEvent::PowerPelletEaten]
    );

    // Nothing moves once the round is over.
    let clock = game.clock();
    run(&mut game, 10);
    assert_eq!(game.clock(), clock);
}

#[test]
fn arrival_takes_exactly_move_steps_ticks() {
    let mut game = game_on("p00", 3, 1);
    game.command(Command::Start);
    assert!(game.steer(Dir::Right));
    run(&mut game, MOVE_STEPS - 1);
    assert_eq!(game.player().tile(), Pos::new(0, 0));
    assert_eq!(game.score(), 0);
    run(&mut game, 1);
    assert_eq!(game.player().tile(), Pos::new(1, 0));
    assert_eq!(game.score(), PELLET_SCORE);
}

#[test]
fn steering_mid_move_is_dropped() {
    let mut game = game_on("000\np00", 3, 2);
    game.command(Command::Start);
    assert!(game.steer(Dir::Right));
    run(&mut game, 2);
    assert!(!game.steer(Dir::Up));
    game.command(Command::Move(Dir::Left));
    assert_eq!(game.player().facing(), Dir::Right);
    run(&mut game, MOVE_STEPS - 2);
    assert_eq!(game.player().tile(), Pos::new(1, 1));
}

#[test]
fn steering_is_ignored_outside_play() {
    let mut game = game_on("p00", 3, 1);
    assert!(!game.steer(Dir::Right));
    run(&mut game, MOVE_STEPS);
    assert_eq!(game.player().tile(), Pos::new(0, 0));
}

#[test]
fn caught_by_a_chaser() {
    let mut game = game_on("p00g", 4, 1);
    game.command(Command::SelectRound(2));
    game.command(Command::Start);
    assert_eq!(game.pursuers().len(), 1);
    assert_eq!(game.pursuers()[0].kind(), PursuerKind::Chaser);

    run(&mut game, 3 * MOVE_STEPS + 3);
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.drain_events().contains(&GameEvent::GameOver));

    game.command(Command::Retry);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.round(), 2);
}

#[test]
fn score_carries_into_next_round() {
    let mut game = game_on("p0", 2, 1);
    game.command(Command::Start);
    walk(&mut game, Dir::Right);
    assert_eq!(game.phase(), Phase::Win);

    game.command(Command::NextRound);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.round(), 2);
    assert_eq!(game.score(), PELLET_SCORE);
    assert_eq!(game.player().tile(), Pos::new(0, 0));
    assert_eq!(game.maze().map(Maze::pellets_left), Some(1));
}

#[test]
fn last_round_wraps_to_first() {
    let mut game = game_on("p0", 2, 1);
    game.command(Command::SelectRound(7));
    game.command(Command::Start);
    walk(&mut game, Dir::Right);
    game.command(Command::NextRound);
    assert_eq!(game.round(), 1);
    assert_eq!(game.score(), PELLET_SCORE);
}

#[test]
fn second_power_pellet_restarts_fright() {
    // Pursuer sealed in its own corridor so it can never reach the player.
    let mut game = game_on("p44001g0", 8, 1);
    game.command(Command::Start);
    game.spawn_pursuer(PursuerKind::Chaser, Pos::new(6, 0));

    walk(&mut game, Dir::Right);
    assert!(game.pursuers()[0].is_frightened());
    let half = (FRIGHT_DURATION.as_millis() / tick().as_millis()) as u32 / 2;
    run(&mut game, half);

    walk(&mut game, Dir::Right);
    let second = game.clock();
    // The first window would have closed by now.
    run(&mut game, half + 10);
    assert!(game.pursuers()[0].is_frightened());

    let remaining = FRIGHT_DURATION + second - game.clock();
    let ticks = (remaining.as_millis() / tick().as_millis()) as u32;
    run(&mut game, ticks - 1);
    assert!(game.pursuers()[0].is_frightened());
    run(&mut game, 1);
    assert!(!game.pursuers()[0].is_frightened());
}

#[rstest]
#[case(1, 0)]
#[case(2, 1)]
#[case(4, 3)]
#[case(6, 4)]
#[case(7, 1)]
fn default_maze_rosters(#[case] round: u32, #[case] pursuers: usize) {
    let mut game = Game::with_maze(Maze::parse(DEFAULT_MAZE, MAZE_WIDTH, MAZE_HEIGHT), tick());
    game.select_round(round).expect("valid round");
    game.start_round().expect("default maze has a start");
    assert_eq!(game.pursuers().len(), pursuers);
    let spawns = game.maze().map(|m| m.ghost_spawns().to_vec()).unwrap_or_default();
    for (pursuer, spawn) in game.pursuers().iter().zip(spawns) {
        assert_eq!(pursuer.tile(), spawn);
    }
}

#[test]
fn menu_round_selection_is_bounded() {
    let mut game = game_on("p0", 2, 1);
    game.command(Command::RoundDown);
    assert_eq!(game.round(), 1);
    for _ in 0..10 {
        game.command(Command::RoundUp);
    }
    assert_eq!(game.round(), 7);
    game.command(Command::SelectRound(9));
    assert_eq!(game.round(), 7);
    game.command(Command::ToMenu);
    assert_eq!(game.round(), 1);
}

#[test]
fn failed_load_keeps_current_maze() {
    let mut game = game_on("p00", 3, 1);
    let missing = std::path::Path::new("/nonexistent/maze.txt");
    assert!(game.load_maze(missing, 3, 1).is_err());
    assert_eq!(game.maze().map(Maze::width), Some(3));
    game.command(Command::Start);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn chaser_on_player_tile_stays_idle() {
    let mut game = game_on("p00", 3, 1);
    game.command(Command::Start);
    let id = game.spawn_pursuer(PursuerKind::Chaser, Pos::new(0, 0));
    run(&mut game, 1);
    let chaser = game.pursuer(id).expect("chaser on roster");
    assert_eq!(chaser.heading(), None);
    assert!(!chaser.is_moving());
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn chaser_crossing_the_player_catches_them() {
    let mut game = game_on("p000", 4, 1);
    game.command(Command::Start);
    game.spawn_pursuer(PursuerKind::Chaser, Pos::new(1, 0));
    run(&mut game, 1);
    assert!(game.pursuers()[0].is_moving());

    // Both now travel toward each other's tile and arrive on the same tick.
    assert!(game.steer(Dir::Right));
    run(&mut game, MOVE_STEPS - 1);
    assert_eq!(game.phase(), Phase::Playing);
    run(&mut game, 1);
    assert_eq!(game.player().tile(), Pos::new(1, 0));
    assert_eq!(game.pursuers()[0].tile(), Pos::new(0, 0));
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn unreadable_maze_falls_back_to_builtin() {
    let mut game = Game::new(tick());
    let missing = std::path::Path::new("/nonexistent/maze.txt");
    game.load_maze_or_builtin(Some(missing), MAZE_WIDTH, MAZE_HEIGHT);
    let maze = game.maze().expect("built-in maze installed");
    assert_eq!(maze.ghost_spawns().len(), 4);
    game.command(Command::Start);
    assert_eq!(game.phase(), Phase::Playing);
}
