use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("could not read maze file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reasons a round cannot begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no maze loaded")]
    NoMaze,
    #[error("maze has no player start marker")]
    NoPlayerStart,
    #[error("round {0} is outside the playable range")]
    RoundOutOfRange(u32),
}
