use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pacman_pursuit::audio::{AudioSink, TerminalBell};
use pacman_pursuit::command::from_key;
use pacman_pursuit::config::Config;
use pacman_pursuit::net::spawn_listener;
use pacman_pursuit::render::Renderer;
use pacman_pursuit::{init_logging, Command, Game};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(config.verbose, config.log_file.as_deref())?;

    let mut game = Game::new(config.tick_interval());
    game.load_maze_or_builtin(config.maze.as_deref(), config.width, config.height);
    game.select_round(config.round)?;

    let (tx, rx) = mpsc::channel();
    if let Some(port) = config.listener_port() {
        if let Err(err) = spawn_listener(port, tx) {
            warn!("command listener disabled: {err}");
        }
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("entering raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .and_then(|out| out.execute(Hide))
        .context("preparing the terminal")?;

    let result = run(&mut stdout, &config, &mut game, &rx);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    stdout: &mut Stdout,
    config: &Config,
    game: &mut Game,
    commands: &Receiver<Command>,
) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut renderer = Renderer::new(config.width, config.height);
    let mut bell = TerminalBell::stdout();
    let tick_interval = config.tick_interval();
    let frame_time = config.frame_time();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(std::time::Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if key.code == KeyCode::Char('q') {
                        info!("quit with score {}", game.score());
                        return Ok(());
                    }
                    if let Some(command) = from_key(key.code, game.phase()) {
                        game.command(command);
                    }
                }
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }
        for command in commands.try_iter() {
            game.command(command);
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            game.tick(&mut rng);
            for cue in game.drain_events() {
                bell.play(cue);
            }
        }
        renderer.draw(stdout, game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
