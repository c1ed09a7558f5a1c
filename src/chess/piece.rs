use std::{
    fmt::{self, Display},
    mem::size_of,
};

/// Colour bits of a piece code. Discriminants are the raw code bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Colour {
    White = 0b01000,
    Black = 0b10000,
}

const _COLOUR_ASSERT: () = assert!(size_of::<Colour>() == size_of::<Option<Colour>>());

impl Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

impl Colour {
    pub const fn inner(self) -> u8 {
        self as u8
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        [Self::White, Self::Black].into_iter()
    }
}

/// Type bits of a piece code.
///
/// The values are chosen so that bit 2 marks the sliding pieces, bit 1 the
/// orthogonal sliders and bit 0 (together with bit 2) the diagonal sliders.
/// Codes 0 and 4 are unused.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum PieceType {
    King = 0b001,
    Pawn = 0b010,
    Knight = 0b011,
    Bishop = 0b101,
    Rook = 0b110,
    Queen = 0b111,
}

const _PIECE_TYPE_ASSERT: () = assert!(size_of::<PieceType>() == size_of::<Option<PieceType>>());

impl Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PieceType {
    pub const fn from_code(v: u8) -> Option<Self> {
        match v {
            0b001 => Some(Self::King),
            0b010 => Some(Self::Pawn),
            0b011 => Some(Self::Knight),
            0b101 => Some(Self::Bishop),
            0b110 => Some(Self::Rook),
            0b111 => Some(Self::Queen),
            _ => None,
        }
    }

    pub const fn inner(self) -> u8 {
        self as u8
    }

    /// The uppercase FEN letter for this piece type.
    pub const fn symbol(self) -> char {
        match self {
            Self::King => 'K',
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
        }
    }

    /// Inverse of [`PieceType::symbol`]. Only uppercase letters are accepted.
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'K' => Some(Self::King),
            'P' => Some(Self::Pawn),
            'N' => Some(Self::Knight),
            'B' => Some(Self::Bishop),
            'R' => Some(Self::Rook),
            'Q' => Some(Self::Queen),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::King => "King",
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        [Self::King, Self::Pawn, Self::Knight, Self::Bishop, Self::Rook, Self::Queen].into_iter()
    }
}

/// A 5-bit piece code: `piece type | piece colour`, or zero for an empty square.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Piece(u8);

impl Piece {
    pub const TYPE_MASK: u8 = 0b00111;
    pub const WHITE_MASK: u8 = 0b01000;
    pub const BLACK_MASK: u8 = 0b10000;
    pub const COLOUR_MASK: u8 = Self::WHITE_MASK | Self::BLACK_MASK;

    pub const NONE: Self = Self(0);

    pub const WK: Self = Self::new(Colour::White, PieceType::King);
    pub const WP: Self = Self::new(Colour::White, PieceType::Pawn);
    pub const WN: Self = Self::new(Colour::White, PieceType::Knight);
    pub const WB: Self = Self::new(Colour::White, PieceType::Bishop);
    pub const WR: Self = Self::new(Colour::White, PieceType::Rook);
    pub const WQ: Self = Self::new(Colour::White, PieceType::Queen);
    pub const BK: Self = Self::new(Colour::Black, PieceType::King);
    pub const BP: Self = Self::new(Colour::Black, PieceType::Pawn);
    pub const BN: Self = Self::new(Colour::Black, PieceType::Knight);
    pub const BB: Self = Self::new(Colour::Black, PieceType::Bishop);
    pub const BR: Self = Self::new(Colour::Black, PieceType::Rook);
    pub const BQ: Self = Self::new(Colour::Black, PieceType::Queen);

    pub const fn new(colour: Colour, piece_type: PieceType) -> Self {
        Self(colour as u8 | piece_type as u8)
    }

    /// Wraps a raw code. Bits above the fifth are discarded.
    pub const fn from_code(code: u8) -> Self {
        Self(code & (Self::COLOUR_MASK | Self::TYPE_MASK))
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// The raw colour bits of this code.
    pub const fn colour_bits(self) -> u8 {
        self.0 & Self::COLOUR_MASK
    }

    /// The raw type bits of this code. May be 0 or 4 for codes that do not
    /// name a piece.
    pub const fn type_bits(self) -> u8 {
        self.0 & Self::TYPE_MASK
    }

    pub const fn colour(self) -> Option<Colour> {
        match self.colour_bits() {
            Self::WHITE_MASK => Some(Colour::White),
            Self::BLACK_MASK => Some(Colour::Black),
            _ => None,
        }
    }

    pub const fn piece_type(self) -> Option<PieceType> {
        PieceType::from_code(self.type_bits())
    }

    pub const fn is_white(self) -> bool {
        self.colour_bits() == Self::WHITE_MASK
    }

    pub const fn is_rook_or_queen(self) -> bool {
        self.0 & 0b110 == 0b110
    }

    pub const fn is_bishop_or_queen(self) -> bool {
        self.0 & 0b101 == 0b101
    }

    pub const fn is_sliding(self) -> bool {
        self.0 & 0b100 == 0b100
    }

    /// True if the code is empty, or names exactly one colour and a real piece type.
    pub const fn is_well_formed(self) -> bool {
        self.is_none() || (self.colour().is_some() && self.piece_type().is_some())
    }

    /// The FEN letter for this piece, uppercase for white.
    pub const fn char(self) -> Option<char> {
        let Some(piece_type) = self.piece_type() else {
            return None;
        };
        let symbol = piece_type.symbol();
        if self.is_white() {
            Some(symbol)
        } else {
            Some(symbol.to_ascii_lowercase())
        }
    }

    /// Inverse of [`Piece::char`].
    pub const fn from_char(c: char) -> Option<Self> {
        let colour = if c.is_ascii_uppercase() { Colour::White } else { Colour::Black };
        match PieceType::from_symbol(c.to_ascii_uppercase()) {
            Some(piece_type) => Some(Self::new(colour, piece_type)),
            None => None,
        }
    }

    /// Full piece-type name, or the empty string for codes without a type.
    pub const fn name(self) -> &'static str {
        match self.piece_type() {
            Some(piece_type) => piece_type.name(),
            None => "",
        }
    }

    pub const fn colour_name(self) -> &'static str {
        if self.is_white() { "White" } else { "Black" }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Colour::all().flat_map(|colour| PieceType::all().map(move |pt| Self::new(colour, pt)))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("None");
        }
        match self.char() {
            Some(c) => write!(f, "{c}"),
            None => f.write_str("?"),
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({self}, {:#07b})", self.0)
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> Self {
        piece.0
    }
}
