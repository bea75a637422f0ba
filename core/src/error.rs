use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Tile value {0} is not zero or a power of two")]
    InvalidTile(u32),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell is already occupied")]
    CellOccupied,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
