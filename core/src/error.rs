use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidDimensions,
    #[error("Board must contain at least one mine")]
    NoMines,
    #[error("Too many mines ({mines}) for a {rows}x{cols} board")]
    TooManyMines { rows: u8, cols: u8, mines: u16 },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Layout holds {layout} mines but the game expects {config}")]
    MineCountMismatch { layout: u16, config: u16 },
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
    #[error("Could not encode snapshot")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, GameError>;
