use alloc::string::String;
use thiserror::Error;

use crate::GameId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Cell is already open")]
    CellAlreadyOpen,
    #[error("Game already completed, no new moves are accepted")]
    GameAlreadyCompleted,
    #[error("Game {0} not found")]
    NotFound(GameId),
    #[error("Game {0} already exists")]
    AlreadyExists(GameId),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Mine layout is inconsistent")]
    InvalidLayout,
    #[error("Invalid cell token {0:?}")]
    InvalidCellToken(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl GameError {
    pub(crate) const fn config(reason: &'static str) -> Self {
        Self::InvalidConfiguration { reason }
    }

    /// Whether the error is a rejected move on an otherwise valid game.
    pub const fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds | Self::CellAlreadyOpen | Self::GameAlreadyCompleted
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
