use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Field must be at least 1x1")]
    InvalidSize,
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
    #[error("Layout shape {found:?} does not match field size {expected:?}")]
    ShapeMismatch { expected: Coord2, found: Coord2 },
    #[error("Malformed layout: {0}")]
    MalformedLayout(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
