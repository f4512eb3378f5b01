use serde::{Deserialize, Serialize};

use crate::*;

/// Persisted form of a [`GameSession`], with both grids stored as rows of cell tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub game_guid: GameId,
    pub width: Coord,
    pub height: Coord,
    pub mines_count: CellCount,
    pub mines_field: CellGrid,
    pub current_field: CellGrid,
    pub completed: bool,
}

impl From<GameSession> for SessionRecord {
    fn from(session: GameSession) -> Self {
        let config = session.config();
        Self {
            game_guid: session.id(),
            width: config.width,
            height: config.height,
            mines_count: config.mines,
            mines_field: session.mine_layout().cells().clone(),
            current_field: session.visible_field().clone(),
            completed: session.is_completed(),
        }
    }
}

impl TryFrom<SessionRecord> for GameSession {
    type Error = GameError;

    fn try_from(record: SessionRecord) -> Result<Self> {
        let config = GameConfig::new(record.width, record.height, record.mines_count)?;
        if record.mines_field.shape() != config.shape() {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = MineLayout::from_cells(record.mines_field)?;
        if layout.game_config() != config {
            return Err(GameError::InvalidLayout);
        }

        GameSession::from_parts(
            record.game_guid,
            layout,
            record.current_field,
            record.completed,
        )
    }
}
