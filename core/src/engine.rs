use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Won,
    Lost,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game from creation to completion: the hidden layout, what the player sees, and whether it is over.
///
/// Every mutating method either fails without touching the session or applies its whole transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct GameSession {
    id: GameId,
    mine_layout: MineLayout,
    visible: CellGrid,
    completed: bool,
}

impl GameSession {
    pub fn new(id: GameId, mine_layout: MineLayout) -> Self {
        let visible = CellGrid::hidden(mine_layout.shape());
        let mut session = Self {
            id,
            mine_layout,
            visible,
            completed: false,
        };
        session.check_completion();
        session
    }

    /// Reassembles a session from stored parts, checking that they describe the same board.
    pub fn from_parts(
        id: GameId,
        mine_layout: MineLayout,
        visible: CellGrid,
        completed: bool,
    ) -> Result<Self> {
        if visible.shape() != mine_layout.shape() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            id,
            mine_layout,
            visible,
            completed,
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn width(&self) -> Coord {
        self.visible.width()
    }

    pub fn height(&self) -> Coord {
        self.visible.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn visible_field(&self) -> &CellGrid {
        &self.visible
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.visible[coords]
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn hidden_count(&self) -> CellCount {
        self.visible.count_matching(Cell::Hidden)
    }

    /// Derived from the visible field: a finished game showing a mine was lost.
    pub fn state(&self) -> SessionState {
        if !self.completed {
            SessionState::InProgress
        } else if self.visible.iter().any(|cell| cell.is_mine()) {
            SessionState::Lost
        } else {
            SessionState::Won
        }
    }

    /// Opens a hidden cell, expanding zero counts and finishing the game on a mine or on the last safe cell.
    pub fn open_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_completed()?;
        let coords = self.visible.validate_coords(coords)?;
        if !self.visible[coords].is_hidden() {
            return Err(GameError::CellAlreadyOpen);
        }

        let cell = self.mine_layout[coords];
        if cell.is_mine() {
            self.lose(coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.visible[coords] = cell;
        log::debug!("Open cell at {:?}, content: {:?}", coords, cell);
        if cell.is_empty() {
            self.flood_fill(coords);
        }

        Ok(if self.check_completion() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Finishes the game as won once the only hidden cells left are as many as the mines.
    ///
    /// Returns whether this call completed the game; it is a no-op on a completed session.
    pub fn check_completion(&mut self) -> bool {
        if self.completed {
            return false;
        }

        let hidden = self.hidden_count();
        if hidden != self.mine_layout.mine_count() {
            return false;
        }

        self.completed = true;
        self.visible.replace_all(Cell::Hidden, Cell::Marked);
        log::info!("Game {} won, {} mines marked", self.id, hidden);
        true
    }

    /// Reveals the zero region around `origin` together with its bordering counts.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit = VecDeque::from([origin]);
        let mut opened = 0;

        while let Some(visit_coords) = to_visit.pop_front() {
            for neighbor in self.visible.iter_neighbors(visit_coords) {
                if !self.visible[neighbor].is_hidden() {
                    continue;
                }

                // neighbors of a zero are never mines
                let cell = self.mine_layout[neighbor];
                self.visible[neighbor] = cell;
                opened += 1;
                log::trace!("Flood opened cell at {:?}, content: {:?}", neighbor, cell);

                if cell.is_empty() {
                    to_visit.push_back(neighbor);
                }
            }
        }

        log::debug!("Flood fill from {:?} opened {} cells", origin, opened);
    }

    fn lose(&mut self, coords: Coord2) {
        self.completed = true;
        self.visible = self.mine_layout.cells().clone();
        log::info!("Game {} lost on mine at {:?}", self.id, coords);
    }

    fn check_not_completed(&self) -> Result<()> {
        if self.completed {
            Err(GameError::GameAlreadyCompleted)
        } else {
            Ok(())
        }
    }
}
