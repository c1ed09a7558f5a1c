use std::fmt::{self, Display, Formatter};

use crate::chess::{
    piece::{Piece, PieceType},
    types::Coord,
};

/// A proposed transition: a piece leaving `origin` for `target`, together
/// with whatever the caller believes is standing on `target`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Move {
    pub origin: Coord,
    pub piece: Piece,
    pub target: Coord,
    pub captured: Option<Piece>,
}

impl Move {
    /// A move of `piece` that has not left `origin` yet.
    pub const fn new(origin: Coord, piece: Piece) -> Self {
        Self {
            origin,
            piece,
            target: origin,
            captured: None,
        }
    }

    /// A move without a known piece, starting from [`Coord::INVALID`].
    pub const fn null() -> Self {
        Self::new(Coord::INVALID, Piece::NONE)
    }

    #[must_use]
    pub const fn with_target(mut self, target: Coord) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub const fn with_captured(mut self, captured: Option<Piece>) -> Self {
        self.captured = captured;
        self
    }

    pub const fn origin_index(&self) -> i32 {
        self.origin.index()
    }

    pub const fn target_index(&self) -> i32 {
        self.target.index()
    }

    /// Linear distance travelled; positive towards the eighth rank.
    pub const fn offset(&self) -> i32 {
        self.target_index() - self.origin_index()
    }

    /// True if a piece is moving and both squares are on the board.
    pub const fn is_valid(&self) -> bool {
        !self.piece.is_none() && self.origin.is_valid() && self.target.is_valid()
    }

    pub const fn is_capture(&self) -> bool {
        matches!(self.captured, Some(piece) if !piece.is_none())
    }

    /// Simplified algebraic notation. See the [`Display`] impl.
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl Default for Move {
    fn default() -> Self {
        Self::null()
    }
}

impl Display for Move {
    /// Writes simplified algebraic notation: no disambiguation, no check
    /// suffixes, no castling or promotion forms. Invalid moves write nothing.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.is_valid() {
            return Ok(());
        }

        match self.piece.piece_type() {
            Some(PieceType::Pawn) => {
                if let Some(file) = self.origin.file_name() {
                    write!(f, "{file}")?;
                }
                if self.is_capture() {
                    write!(f, "x{}", self.target)
                } else if let Some(rank) = self.target.rank_name() {
                    write!(f, "{rank}")
                } else {
                    Ok(())
                }
            }
            Some(piece_type) => {
                let capture_sigil = if self.is_capture() { "x" } else { "" };
                write!(f, "{}{capture_sigil}{}", piece_type.symbol(), self.target)
            }
            None => Ok(()),
        }
    }
}
