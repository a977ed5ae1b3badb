use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Coordinates out of range")]
    OutOfRange,
}

/// Reason a board configuration was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board width and height must be at least 1")]
    EmptyBoard,
    #[error("too many bombs, requested {requested} but the board only fits {capacity}")]
    TooManyBombs {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("generated layout does not match the configured board")]
    LayoutMismatch,
    #[error("no difficulty preset with {0} lives")]
    UnknownDifficulty(u8),
}

pub type Result<T> = core::result::Result<T, GameError>;
