use thiserror::Error;

use crate::chess::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("unexpected character '{0}' in board layout")]
    UnexpectedCharacter(char),
    #[error("piece placed off the board (file index {file}, rank index {rank})")]
    SquareOutOfRange { file: i32, rank: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("invalid move length {0}")]
    InvalidLength(usize),
    #[error("invalid origin square \"{0}\"")]
    InvalidOrigin(String),
    #[error("invalid target square \"{0}\"")]
    InvalidTarget(String),
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Coord),
}

pub type PositionValidityError = String;
