use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must be non-zero")]
    EmptyBoard,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine placed twice at the same coordinates")]
    DuplicateMine,
    #[error("Tile size must be non-zero")]
    InvalidTileSize,
    #[error("Board does not fit in screen coordinates")]
    LayoutOutOfRange,
}

pub type Result<T> = core::result::Result<T, GameError>;
