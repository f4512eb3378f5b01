//! Transport-independent request and response shapes for creating games and making moves.
//!
//! Field names follow the JSON contract (`game_id`, `mines_count`, ...). Integers arrive unchecked and are
//! converted into engine types here, so every out-of-range value is reported as the matching engine error.

use serde::{Deserialize, Serialize};

use sapper_core::{
    CellCount, CellGrid, Coord, Coord2, GameConfig, GameError, GameId, GameService, GameSession,
    GameStore,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub width: i64,
    pub height: i64,
    pub mines_count: i64,
}

impl NewGameRequest {
    /// Largest width or height a client may ask for.
    pub const MAX_SIDE: Coord = 1024;

    pub fn to_config(&self) -> Result<GameConfig, GameError> {
        let invalid = |_| GameError::InvalidConfiguration {
            reason: "board parameters out of range",
        };
        let width = Coord::try_from(self.width).map_err(invalid)?;
        let height = Coord::try_from(self.height).map_err(invalid)?;
        let mines = CellCount::try_from(self.mines_count).map_err(invalid)?;
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return Err(GameError::InvalidConfiguration {
                reason: "board is larger than the maximum size",
            });
        }
        GameConfig::new(width, height, mines)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTurnRequest {
    pub game_id: GameId,
    pub row: i64,
    pub col: i64,
}

impl GameTurnRequest {
    /// Coordinates as `(row, col)`; values no board can contain are out of bounds.
    pub fn coords(&self) -> Result<Coord2, GameError> {
        let row = Coord::try_from(self.row).map_err(|_| GameError::OutOfBounds)?;
        let col = Coord::try_from(self.col).map_err(|_| GameError::OutOfBounds)?;
        Ok((row, col))
    }
}

/// What a client sees of a game: never the mine layout, only the visible field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfoResponse {
    pub game_id: GameId,
    pub width: Coord,
    pub height: Coord,
    pub mines_count: CellCount,
    pub completed: bool,
    pub field: CellGrid,
}

impl From<&GameSession> for GameInfoResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            game_id: session.id(),
            width: session.width(),
            height: session.height(),
            mines_count: session.mine_count(),
            completed: session.is_completed(),
            field: session.visible_field().clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidMove,
    InvalidConfiguration,
    Internal,
}

impl ErrorKind {
    pub fn of(err: &GameError) -> Self {
        match err {
            GameError::NotFound(_) => Self::NotFound,
            GameError::InvalidConfiguration { .. } => Self::InvalidConfiguration,
            err if err.is_invalid_move() => Self::InvalidMove,
            _ => Self::Internal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub error: String,
}

impl ErrorResponse {
    pub const NOT_FOUND: &'static str = "Game not found";
    pub const INVALID_CONFIGURATION: &'static str = "Invalid game configuration";
    pub const UNEXPECTED: &'static str = "An unexpected error occurred";

    pub fn kind_and_message(err: &GameError) -> (ErrorKind, String) {
        let kind = ErrorKind::of(err);
        let message = match kind {
            ErrorKind::InvalidMove => err.to_string(),
            ErrorKind::NotFound => Self::NOT_FOUND.to_owned(),
            ErrorKind::InvalidConfiguration => Self::INVALID_CONFIGURATION.to_owned(),
            ErrorKind::Internal => {
                log::error!("Internal error hidden from client: {}", err);
                Self::UNEXPECTED.to_owned()
            }
        };
        (kind, message)
    }
}

impl From<&GameError> for ErrorResponse {
    fn from(err: &GameError) -> Self {
        let (kind, error) = Self::kind_and_message(err);
        Self { kind, error }
    }
}

pub type Response = Result<GameInfoResponse, ErrorResponse>;

/// Handles a new game request end to end.
pub fn new_game<S: GameStore>(service: &mut GameService<S>, request: &NewGameRequest) -> Response {
    request
        .to_config()
        .and_then(|config| service.create_game(config))
        .map(|session| GameInfoResponse::from(&session))
        .map_err(|err| ErrorResponse::from(&err))
}

/// Handles a turn request end to end.
pub fn make_turn<S: GameStore>(service: &mut GameService<S>, request: &GameTurnRequest) -> Response {
    request
        .coords()
        .and_then(|coords| service.make_move(request.game_id, coords))
        .map(|session| GameInfoResponse::from(&session))
        .map_err(|err| ErrorResponse::from(&err))
}
