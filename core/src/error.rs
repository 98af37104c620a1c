use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Tile index out of range")]
    InvalidTileIndex,
    #[error("Tiles must be a permutation of 0..16")]
    InvalidTiles,
}

pub type Result<T> = core::result::Result<T, GameError>;
