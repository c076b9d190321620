//! Game engine for a minesweeper variant with cats in place of mines.
//!
//! [`PlayEngine`] owns the board and every set derived from play. Front ends
//! call [`PlayEngine::reveal`] and [`PlayEngine::toggle_flag`], then read
//! [`PlayEngine::snapshot`] or the borrowing accessors to render.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Index;

pub use clock::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod clock;
mod difficulty;
mod engine;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConfigFields")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validates that the board is non-empty and leaves at least one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines { rows, cols, mines });
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }
}

#[derive(Deserialize)]
struct ConfigFields {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<ConfigFields> for GameConfig {
    type Error = GameError;

    fn try_from(ConfigFields { rows, cols, mines }: ConfigFields) -> Result<Self> {
        Self::new(rows, cols, mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}

/// Where the mines of one game lie.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count();
        // at most 8 neighbours
        count as u8
    }

    pub fn mine_coords(&self) -> BTreeSet<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .filter_map(|((row, col), _)| {
                Some((Coord::try_from(row).ok()?, Coord::try_from(col).ok()?))
            })
            .collect()
    }

    /// Builds the cell grid with adjacency counts for every safe cell.
    pub fn to_board(&self) -> Array2<Cell> {
        Array2::from_shape_fn(self.mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if self[coords] {
                Cell {
                    is_mine: true,
                    neighbor_count: 0,
                }
            } else {
                Cell {
                    is_mine: false,
                    neighbor_count: self.adjacent_mine_count(coords),
                }
            }
        })
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
