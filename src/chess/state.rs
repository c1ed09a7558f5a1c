use std::fmt::{self, Display, Write};

use crate::chess::{piece::Piece, types::CastlingRights};

/// The irreversible part of a position, packed into 32 bits.
///
/// ```text
/// [ 11 | fullmove ][ 8 | halfmove ][ 5 | captured ][ 4 | ep file + 1 ][ 4 | castling ]
///  31           21  20          13  12          8   7              4   3          0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GameState {
    data: u32,
}

#[allow(clippy::cast_possible_truncation, clippy::unusual_byte_groupings)]
impl GameState {
    pub const CASTLING_MASK: u32 = 0b1111;
    pub const EP_SHIFT: u32 = 4;
    pub const EP_MASK: u32 = 0b1111 << Self::EP_SHIFT;
    pub const CAPTURE_SHIFT: u32 = 8;
    pub const CAPTURE_MASK: u32 = 0b1_1111 << Self::CAPTURE_SHIFT;
    pub const HALFMOVE_SHIFT: u32 = 13;
    pub const HALFMOVE_MASK: u32 = 0xFF << Self::HALFMOVE_SHIFT;
    pub const FULLMOVE_SHIFT: u32 = 21;
    pub const FULLMOVE_MASK: u32 = 0x7FF << Self::FULLMOVE_SHIFT;

    /// Largest half-move clock the packed word can hold.
    pub const MAX_HALFMOVE: u8 = u8::MAX;
    /// Largest full-move number the packed word can hold.
    pub const MAX_FULLMOVE: u16 = 0x7FF;

    /// Bit-string offsets at which [`Display`] inserts a space.
    const DUMP_BREAKS: [usize; 4] = [11, 19, 24, 28];

    pub const fn from_inner(data: u32) -> Self {
        Self { data }
    }

    pub const fn inner(self) -> u32 {
        self.data
    }

    pub const fn new(
        castling: CastlingRights,
        ep_file: u8,
        captured: Piece,
        halfmove: u8,
        fullmove: u16,
    ) -> Self {
        let mut out = Self { data: 0 };
        out.set_castling(castling);
        out.set_ep_file(ep_file);
        out.set_captured(captured);
        out.set_halfmove(halfmove);
        out.set_fullmove(fullmove);
        out
    }

    /// A copy holding only the castling rights, with every other field zeroed.
    pub const fn castling_only(self) -> Self {
        Self { data: self.data & Self::CASTLING_MASK }
    }

    pub const fn castling(self) -> CastlingRights {
        CastlingRights::from_bits((self.data & Self::CASTLING_MASK) as u8)
    }

    /// The en-passant file plus one, or zero when no en-passant square exists.
    pub const fn ep_file(self) -> u8 {
        ((self.data & Self::EP_MASK) >> Self::EP_SHIFT) as u8
    }

    /// The zero-based en-passant file, if one is recorded.
    pub const fn en_passant_file(self) -> Option<u8> {
        match self.ep_file() {
            0 => None,
            n => Some(n - 1),
        }
    }

    /// The piece captured by the move that produced this state.
    pub const fn captured(self) -> Piece {
        Piece::from_code(((self.data & Self::CAPTURE_MASK) >> Self::CAPTURE_SHIFT) as u8)
    }

    pub const fn halfmove(self) -> u8 {
        ((self.data & Self::HALFMOVE_MASK) >> Self::HALFMOVE_SHIFT) as u8
    }

    pub const fn fullmove(self) -> u16 {
        ((self.data & Self::FULLMOVE_MASK) >> Self::FULLMOVE_SHIFT) as u16
    }

    pub const fn set_castling(&mut self, castling: CastlingRights) {
        self.data = (self.data & !Self::CASTLING_MASK) | castling.bits() as u32;
    }

    pub const fn set_ep_file(&mut self, ep_file: u8) {
        self.data = (self.data & !Self::EP_MASK) | ((ep_file as u32) << Self::EP_SHIFT & Self::EP_MASK);
    }

    pub const fn set_captured(&mut self, captured: Piece) {
        self.data = (self.data & !Self::CAPTURE_MASK)
            | ((captured.code() as u32) << Self::CAPTURE_SHIFT & Self::CAPTURE_MASK);
    }

    pub const fn set_halfmove(&mut self, halfmove: u8) {
        self.data = (self.data & !Self::HALFMOVE_MASK) | ((halfmove as u32) << Self::HALFMOVE_SHIFT);
    }

    pub const fn set_fullmove(&mut self, fullmove: u16) {
        self.data = (self.data & !Self::FULLMOVE_MASK)
            | ((fullmove as u32) << Self::FULLMOVE_SHIFT & Self::FULLMOVE_MASK);
    }
}

impl Display for GameState {
    /// Binary dump, most significant bit first, spaced at the field boundaries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..32 {
            if Self::DUMP_BREAKS.contains(&idx) {
                f.write_char(' ')?;
            }
            let bit = (self.data >> (31 - idx)) & 1;
            f.write_char(if bit == 1 { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl From<GameState> for u32 {
    fn from(state: GameState) -> Self {
        state.data
    }
}
