use std::path::PathBuf;
use std::time::Duration;

use clap::builder::TypedValueParser;
use clap::Parser;

use crate::constants::{
    DEFAULT_COMMAND_PORT, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS, FIRST_ROUND, LAST_ROUND,
    MAX_MAZE_SIDE, MAZE_HEIGHT, MAZE_WIDTH,
};

/// Terminal Pac-Man with routed pursuers and a network command channel
#[derive(Parser, Debug, Clone)]
#[command(name = "pacman", author, version, about, long_about = None)]
pub struct Config {
    /// Maze file; the built-in maze is used when omitted
    #[arg(long, env = "PACMAN_MAZE")]
    pub maze: Option<PathBuf>,

    /// Maze width in tiles
    #[arg(long, env = "PACMAN_WIDTH", default_value_t = MAZE_WIDTH,
          value_parser = clap::value_parser!(u16).range(1..=MAX_MAZE_SIDE as i64).map(usize::from))]
    pub width: usize,

    /// Maze height in tiles
    #[arg(long, env = "PACMAN_HEIGHT", default_value_t = MAZE_HEIGHT,
          value_parser = clap::value_parser!(u16).range(1..=MAX_MAZE_SIDE as i64).map(usize::from))]
    pub height: usize,

    /// Simulation tick interval in milliseconds
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Redraw rate in frames per second
    #[arg(long, env = "PACMAN_FPS", default_value_t = DEFAULT_RENDER_FPS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,

    /// TCP port for direction commands, 0 disables the listener
    #[arg(long, env = "PACMAN_PORT", default_value_t = DEFAULT_COMMAND_PORT)]
    pub port: u16,

    /// Round preselected in the menu
    #[arg(long, env = "PACMAN_ROUND", default_value_t = FIRST_ROUND,
          value_parser = clap::value_parser!(u32).range(FIRST_ROUND as i64..=LAST_ROUND as i64))]
    pub round: u32,

    /// Seed for reproducible pursuer behaviour
    #[arg(long, env = "PACMAN_SEED")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps)
    }

    pub fn listener_port(&self) -> Option<u16> {
        (self.port != 0).then_some(self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_arcade_setup() {
        let config = Config::try_parse_from(["pacman"]).expect("defaults parse");
        assert_eq!((config.width, config.height), (MAZE_WIDTH, MAZE_HEIGHT));
        assert_eq!(config.tick_interval(), Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(config.listener_port(), Some(DEFAULT_COMMAND_PORT));
        assert_eq!(config.round, FIRST_ROUND);
        assert!(config.maze.is_none());
    }

    #[test]
    fn zero_rates_are_rejected() {
        assert!(Config::try_parse_from(["pacman", "--tick-ms", "0"]).is_err());
        assert!(Config::try_parse_from(["pacman", "--fps", "0"]).is_err());
        assert!(Config::try_parse_from(["pacman", "--round", "8"]).is_err());
    }

    #[test]
    fn maze_bounds_are_capped() {
        assert!(Config::try_parse_from(["pacman", "--width", "64", "--height", "64"]).is_ok());
        assert!(Config::try_parse_from(["pacman", "--width", "65"]).is_err());
        assert!(Config::try_parse_from(["pacman", "--height", "65535"]).is_err());
        assert!(Config::try_parse_from(["pacman", "--height", "0"]).is_err());
    }

    #[test]
    fn port_zero_disables_listener() {
        let config = Config::try_parse_from(["pacman", "--port", "0", "--seed", "9"])
            .expect("flags parse");
        assert_eq!(config.listener_port(), None);
        assert_eq!(config.seed, Some(9));
    }
}
