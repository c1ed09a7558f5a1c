use std::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

use crate::chess::piece::Colour;

pub const FILE_NAMES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
pub const RANK_NAMES: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

pub const BOARD_N_SQUARES: usize = 64;

/// File (0 to 7) of a linear square index.
pub const fn file_of(index: usize) -> usize {
    index & 0b000_111
}

/// Rank (0 to 7) of a linear square index.
pub const fn rank_of(index: usize) -> usize {
    index >> 3
}

/// A file/rank pair. Either component may be out of range, in which case the
/// coordinate is invalid; [`Coord::INVALID`] is the canonical "no square".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Coord {
    file: i8,
    rank: i8,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
impl Coord {
    pub const INVALID: Self = Self { file: -1, rank: 0 };

    pub const A1: Self = Self::new(0, 0);
    pub const B1: Self = Self::new(1, 0);
    pub const C1: Self = Self::new(2, 0);
    pub const D1: Self = Self::new(3, 0);
    pub const E1: Self = Self::new(4, 0);
    pub const F1: Self = Self::new(5, 0);
    pub const G1: Self = Self::new(6, 0);
    pub const H1: Self = Self::new(7, 0);

    pub const A8: Self = Self::new(0, 7);
    pub const B8: Self = Self::new(1, 7);
    pub const C8: Self = Self::new(2, 7);
    pub const D8: Self = Self::new(3, 7);
    pub const E8: Self = Self::new(4, 7);
    pub const F8: Self = Self::new(5, 7);
    pub const G8: Self = Self::new(6, 7);
    pub const H8: Self = Self::new(7, 7);

    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// The coordinate of a linear square index; [`Coord::INVALID`] when the
    /// index is off the board.
    pub const fn from_index(index: usize) -> Self {
        if index < BOARD_N_SQUARES {
            Self::new(file_of(index) as i8, rank_of(index) as i8)
        } else {
            Self::INVALID
        }
    }

    pub const fn file(self) -> i8 {
        self.file
    }

    pub const fn rank(self) -> i8 {
        self.rank
    }

    pub const fn is_valid(self) -> bool {
        0 <= self.file && self.file <= 7 && 0 <= self.rank && self.rank <= 7
    }

    pub const fn is_light_square(self) -> bool {
        (self.file as i32 + self.rank as i32) % 2 != 0
    }

    /// The raw linear index `rank * 8 + file`. Meaningless for invalid coordinates.
    pub const fn index(self) -> i32 {
        self.rank as i32 * 8 + self.file as i32
    }

    /// The linear index, for coordinates on the board.
    #[allow(clippy::cast_sign_loss)]
    pub const fn square_index(self) -> Option<usize> {
        if self.is_valid() { Some(self.index() as usize) } else { None }
    }

    /// -1, 0 or 1 depending on sort order; 0 means the same square.
    pub fn compare(self, other: Self) -> i8 {
        self.cmp(&other) as i8
    }

    #[allow(clippy::cast_sign_loss)]
    pub const fn file_name(self) -> Option<char> {
        if 0 <= self.file && self.file <= 7 {
            Some(FILE_NAMES[self.file as usize])
        } else {
            None
        }
    }

    #[allow(clippy::cast_sign_loss)]
    pub const fn rank_name(self) -> Option<char> {
        if 0 <= self.rank && self.rank <= 7 {
            Some(RANK_NAMES[self.rank as usize])
        } else {
            None
        }
    }
}

impl Default for Coord {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        // distinct off-board pairs can share an index; file breaks the tie.
        self.index().cmp(&other.index()).then(self.file.cmp(&other.file))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file_name(), self.rank_name()) {
            (Some(file), Some(rank)) => write!(f, "{file}{rank}"),
            _ => f.write_str("Invalid"),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
impl FromStr for Coord {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err("Invalid square name");
        };
        let file = FILE_NAMES.iter().position(|&c| c == file).ok_or("Invalid file")?;
        let rank = RANK_NAMES.iter().position(|&c| c == rank).ok_or("Invalid rank")?;
        Ok(Self::new(file as i8, rank as i8))
    }
}

/// The four castling-rights flags, as stored in the low nibble of the packed
/// game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights {
    data: u8,
}

impl CastlingRights {
    pub const WKCA: u8 = 0b0001;
    pub const WQCA: u8 = 0b0010;
    pub const BKCA: u8 = 0b0100;
    pub const BQCA: u8 = 0b1000;
    pub const KEY_MASK: u8 = 0b1111;

    pub const ALL: Self = Self { data: Self::KEY_MASK };
    pub const NONE: Self = Self { data: 0 };

    pub const fn new(wk: bool, wq: bool, bk: bool, bq: bool) -> Self {
        let mut data = 0;
        if wk {
            data |= Self::WKCA;
        }
        if wq {
            data |= Self::WQCA;
        }
        if bk {
            data |= Self::BKCA;
        }
        if bq {
            data |= Self::BQCA;
        }
        Self { data }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self { data: bits & Self::KEY_MASK }
    }

    pub const fn bits(self) -> u8 {
        self.data
    }

    pub const fn is_empty(self) -> bool {
        self.data == 0
    }

    const fn kingside_flag(side: Colour) -> u8 {
        match side {
            Colour::White => Self::WKCA,
            Colour::Black => Self::BKCA,
        }
    }

    const fn queenside_flag(side: Colour) -> u8 {
        match side {
            Colour::White => Self::WQCA,
            Colour::Black => Self::BQCA,
        }
    }

    pub const fn kingside(self, side: Colour) -> bool {
        self.data & Self::kingside_flag(side) != 0
    }

    pub const fn queenside(self, side: Colour) -> bool {
        self.data & Self::queenside_flag(side) != 0
    }

    /// Drops both rights of `side`.
    pub fn clear(&mut self, side: Colour) {
        self.data &= !(Self::kingside_flag(side) | Self::queenside_flag(side));
    }

    pub fn clear_side<const IS_KINGSIDE: bool>(&mut self, side: Colour) {
        self.data &= !if IS_KINGSIDE {
            Self::kingside_flag(side)
        } else {
            Self::queenside_flag(side)
        };
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (flag, ch) in [Self::WKCA, Self::WQCA, Self::BKCA, Self::BQCA].into_iter().zip("KQkq".chars()) {
            if self.data & flag != 0 {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
