//! Tile-based Pac-Man simulation: maze model, precomputed routing, pursuer
//! policies and a fixed-rate tick scheduler, with a terminal front end.

pub mod audio;
pub mod command;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod ghost;
pub mod level;
pub mod logging;
pub mod motion;
pub mod net;
pub mod player;
pub mod render;
pub mod routing;
pub mod timers;

pub use components::{Dir, Pos, ScreenPos, Tile};
pub use error::{GameError, MazeError};
pub use game::{Command, Game, GameEvent, Phase};
pub use ghost::{Pursuer, PursuerId, PursuerKind};
pub use level::{Maze, DEFAULT_MAZE};
pub use logging::init as init_logging;
pub use routing::RoutingTable;
