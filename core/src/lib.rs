#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use record::*;
pub use service::*;
pub use store::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod record;
mod service;
mod store;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// Checks that the board is non-empty and leaves at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::config("board dimensions must be positive"));
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::config("too many mines for the board size"));
        }
        Ok(())
    }

    /// Grid shape as `(rows, cols)`.
    pub const fn shape(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Hidden truth of a board: every cell is either a mine or its adjacent mine count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellGrid", into = "CellGrid")]
pub struct MineLayout {
    cells: CellGrid,
    mine_count: CellCount,
}

impl MineLayout {
    /// Callers guarantee both dimensions are positive and fit in `Coord`.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let (rows, cols) = mine_mask.dim();
        let mut cells = CellGrid::filled((rows as Coord, cols as Coord), Cell::Count(0));
        let mut mine_count = 0;

        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                cells[(row as Coord, col as Coord)] = Cell::Mine;
                mine_count += 1;
            }
        }

        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            if !is_mine {
                let coords = (row as Coord, col as Coord);
                cells[coords] = Cell::Count(count_adjacent_mines(&cells, coords));
            }
        }

        Self { cells, mine_count }
    }

    /// Builds a layout with mines at exactly `mine_coords`; duplicates collapse into one mine.
    pub fn from_mine_coords(shape: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if shape.0 == 0 || shape.1 == 0 {
            return Err(GameError::config("board dimensions must be positive"));
        }

        let mut mine_mask: Array2<bool> = Array2::default(shape.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= shape.0 || coords.1 >= shape.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        if layout.mine_count >= layout.total_cells() {
            return Err(GameError::config("too many mines for the board size"));
        }
        Ok(layout)
    }

    /// Restores a layout from a stored grid, checking every count against the mine positions.
    pub fn from_cells(cells: CellGrid) -> Result<Self> {
        let mut mine_count = 0;
        for (coords, cell) in cells.indexed_iter() {
            match cell {
                Cell::Mine => mine_count += 1,
                Cell::Count(count) if count == count_adjacent_mines(&cells, coords) => {}
                _ => return Err(GameError::InvalidLayout),
            }
        }
        if mine_count >= cells.total_cells() {
            return Err(GameError::config("too many mines for the board size"));
        }
        Ok(Self { cells, mine_count })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.cells.width(), self.cells.height(), self.mine_count)
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> Coord2 {
        self.cells.shape()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.total_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }
}

fn count_adjacent_mines(cells: &CellGrid, coords: Coord2) -> u8 {
    // at most eight neighbors
    cells
        .iter_neighbors(coords)
        .filter(|&pos| cells[pos].is_mine())
        .count() as u8
}

impl Index<Coord2> for MineLayout {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords]
    }
}

impl TryFrom<CellGrid> for MineLayout {
    type Error = GameError;

    fn try_from(cells: CellGrid) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<MineLayout> for CellGrid {
    fn from(layout: MineLayout) -> Self {
        layout.cells
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Safe cells were revealed and the game goes on.
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn ends_game(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_boards() {
        assert!(GameConfig::new(3, 3, 8).is_ok());
        assert!(GameConfig::new(3, 3, 0).is_ok());
        for (width, height, mines) in [(2, 2, 4), (2, 2, 5), (0, 3, 0), (3, 0, 0)] {
            assert!(matches!(
                GameConfig::new(width, height, mines),
                Err(GameError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn config_shape_is_rows_by_cols() {
        let config = GameConfig::new(5, 2, 3).unwrap();

        assert_eq!(config.shape(), (2, 5));
        assert_eq!(config.total_cells(), 10);
        assert_eq!(config.safe_cells(), 7);
    }

    #[test]
    fn counts_neighbors_of_center_mine() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout[(1, 1)], Cell::Mine);
        for coords in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(layout[coords], Cell::Count(1), "at {coords:?}");
        }
    }

    #[test]
    fn counts_are_clipped_at_edges() {
        let layout = MineLayout::from_mine_coords((2, 4), &[(0, 0), (1, 1), (0, 3)]).unwrap();

        assert_eq!(layout[(0, 1)], Cell::Count(2));
        assert_eq!(layout[(0, 2)], Cell::Count(2));
        assert_eq!(layout[(1, 0)], Cell::Count(2));
        assert_eq!(layout[(1, 2)], Cell::Count(2));
        assert_eq!(layout[(1, 3)], Cell::Count(1));
        assert_eq!(layout.game_config(), GameConfig::new_unchecked(4, 2, 3));
    }

    #[test]
    fn from_mine_coords_rejects_invalid_input() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
        assert!(matches!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn from_cells_rejects_inconsistent_counts() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        assert_eq!(MineLayout::from_cells(layout.cells().clone()), Ok(layout.clone()));

        let mut tampered = layout.cells().clone();
        tampered[(1, 1)] = Cell::Count(0);
        assert_eq!(MineLayout::from_cells(tampered), Err(GameError::InvalidLayout));

        let mut hidden = layout.cells().clone();
        hidden[(1, 1)] = Cell::Hidden;
        assert_eq!(MineLayout::from_cells(hidden), Err(GameError::InvalidLayout));

        let all_mines = CellGrid::filled((1, 2), Cell::Mine);
        assert!(matches!(
            MineLayout::from_cells(all_mines),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn all_mine_layout_does_not_deserialize() {
        let result: core::result::Result<MineLayout, _> = serde_json::from_str(r#"[["X","X"]]"#);

        assert!(result.is_err());
    }
}
