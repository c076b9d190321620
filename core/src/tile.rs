use serde::{Deserialize, Serialize};

/// One square of the board as laid out by mine generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    /// Mines among the in-bounds 8-neighbours, always 0 for mine cells.
    pub neighbor_count: u8,
}

/// Player-visible state of a cell, derived from the engine's sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine uncovered when the game was lost.
    Mine,
    /// The mine whose reveal lost the game.
    Exploded,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
