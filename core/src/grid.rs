use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::*;

/// Row-major `height × width` grid of cells.
///
/// Serializes as a sequence of rows, each a sequence of cell tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    cells: Array2<Cell>,
}

impl CellGrid {
    pub fn filled((rows, cols): Coord2, cell: Cell) -> Self {
        Self {
            cells: Array2::from_elem((usize::from(rows), usize::from(cols)), cell),
        }
    }

    pub fn hidden(shape: Coord2) -> Self {
        Self::filled(shape, Cell::Hidden)
    }

    /// Builds a grid from nested rows, rejecting empty, ragged or oversized input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if Coord::try_from(height).is_err() || Coord::try_from(width).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<Cell> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> Coord2 {
        // every constructor keeps both dimensions within `Coord`
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn height(&self) -> Coord {
        self.shape().0
    }

    pub fn width(&self) -> Coord {
        self.shape().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.shape();
        mult(rows, cols)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.shape();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates every cell together with its coordinates, row by row.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count_matching(&self, cell: Cell) -> CellCount {
        // bounded by `total_cells`
        self.cells.iter().filter(|&&other| other == cell).count() as CellCount
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.shape())
    }

    pub fn replace_all(&mut self, from: Cell, to: Cell) {
        self.cells.map_inplace(|cell| {
            if *cell == from {
                *cell = to;
            }
        });
    }
}

impl Index<Coord2> for CellGrid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for CellGrid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Serialize for CellGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells.rows().into_iter().map(|row| row.to_vec()))
    }
}

impl<'de> Deserialize<'de> for CellGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<Cell>>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
