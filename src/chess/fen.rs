use std::fmt::{self, Display};

use arrayvec::ArrayVec;

use crate::{
    chess::{
        piece::Piece,
        state::GameState,
        types::{BOARD_N_SQUARES, CastlingRights, FILE_NAMES},
    },
    errors::FenParseError,
};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const MATE_IN_2: &str = "1rb4r/pkPp3p/1b1P3n/1Q6/N3Pp2/8/P1P3PP/7K w - - 1 1";
pub const MATE_IN_3: &str = "rn3rk1/p5pp/2p5/3Ppb2/2q5/1Q6/PPPB2PP/R3K1NR b - - 0 1";
pub const MATE_IN_4: &str = "r5rk/2p1Nppp/3p3P/pp2p1P1/4P3/2qnPQK1/8/R6R w - - 1 1";

/// The built-in positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    Start,
    #[value(name = "mate-in-2")]
    MateIn2,
    #[value(name = "mate-in-3")]
    MateIn3,
    #[value(name = "mate-in-4")]
    MateIn4,
}

impl Preset {
    pub const fn fen(self) -> &'static str {
        match self {
            Self::Start => STARTING_FEN,
            Self::MateIn2 => MATE_IN_2,
            Self::MateIn3 => MATE_IN_3,
            Self::MateIn4 => MATE_IN_4,
        }
    }
}

/// A parsed FEN representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub board: [Piece; BOARD_N_SQUARES],
    pub white_to_move: bool,
    pub castling: CastlingRights,
    /// En-passant file plus one; zero when there is no en-passant square.
    pub ep_file: u8,
    pub halfmove: u8,
    pub fullmove: u16,
}

impl Default for Fen {
    fn default() -> Self {
        Self {
            board: [Piece::NONE; BOARD_N_SQUARES],
            white_to_move: true,
            castling: CastlingRights::ALL,
            ep_file: 0,
            halfmove: 0,
            fullmove: 0,
        }
    }
}

impl Fen {
    const MAX_FIELDS: usize = 6;

    /// Parse a FEN string.
    ///
    /// Fields are separated by single spaces. Only the board field is
    /// required; missing or unreadable trailing fields fall back to defaults,
    /// and anything after the sixth field is ignored. The side to move and
    /// the castling string are only read when more than two fields are
    /// present.
    pub fn parse(fen: &str) -> Result<Self, FenParseError> {
        let fields = fen.split(' ').take(Self::MAX_FIELDS).collect::<ArrayVec<&str, 6>>();
        let mut out = Self::default();

        // Field #1: Piece placement
        out.board = Self::parse_board(fields.first().copied().unwrap_or_default())?;

        // Fields #2 and #3: Active colour and castling availability
        if fields.len() > 2 {
            out.white_to_move = fields[1] == "w";
            out.castling = Self::parse_castling(fields[2]);
        }

        // Field #4: En passant target square
        if let Some(ep) = fields.get(3) {
            out.ep_file = Self::parse_ep(ep);
        }

        // Field #5: Halfmove clock
        if let Some(halfmove) = fields.get(4) {
            out.halfmove = halfmove.parse().unwrap_or(0);
        }

        // Field #6: Fullmove number
        if let Some(fullmove) = fields.get(5) {
            out.fullmove = fullmove
                .parse()
                .ok()
                .filter(|&n| n <= GameState::MAX_FULLMOVE)
                .unwrap_or(0);
        }

        Ok(out)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn parse_board(board_str: &str) -> Result<[Piece; BOARD_N_SQUARES], FenParseError> {
        let mut board = [Piece::NONE; BOARD_N_SQUARES];
        let mut file: i32 = 0;
        let mut rank: i32 = 7;

        for c in board_str.chars() {
            if c == '/' {
                file = 0;
                rank -= 1;
            } else if let Some(skip) = c.to_digit(10) {
                file += skip as i32;
            } else {
                let piece = Piece::from_char(c).ok_or(FenParseError::UnexpectedCharacter(c))?;
                let index = usize::try_from(rank * 8 + file)
                    .ok()
                    .filter(|_| (0..8).contains(&file) && (0..8).contains(&rank))
                    .ok_or(FenParseError::SquareOutOfRange { file, rank })?;
                board[index] = piece;
                file += 1;
            }
        }

        Ok(board)
    }

    fn parse_castling(s: &str) -> CastlingRights {
        CastlingRights::new(s.contains('K'), s.contains('Q'), s.contains('k'), s.contains('q'))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn parse_ep(s: &str) -> u8 {
        s.chars()
            .next()
            .and_then(|c| FILE_NAMES.iter().position(|&name| name == c))
            .map_or(0, |file| file as u8 + 1)
    }
}

impl Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counter = 0;
        for rank in (0..8).rev() {
            for file in 0..8 {
                let piece = self.board[rank * 8 + file];
                if let Some(c) = piece.char() {
                    if counter != 0 {
                        write!(f, "{counter}")?;
                    }
                    counter = 0;
                    write!(f, "{c}")?;
                } else {
                    counter += 1;
                }
            }
            if counter != 0 {
                write!(f, "{counter}")?;
            }
            counter = 0;
            if rank != 0 {
                write!(f, "/")?;
            }
        }

        if self.white_to_move {
            write!(f, " w")?;
        } else {
            write!(f, " b")?;
        }
        write!(f, " {}", self.castling)?;
        let ep_name = usize::from(self.ep_file)
            .checked_sub(1)
            .and_then(|file| FILE_NAMES.get(file));
        if let Some(file) = ep_name {
            let rank = if self.white_to_move { 6 } else { 3 };
            write!(f, " {file}{rank}")?;
        } else {
            write!(f, " -")?;
        }
        write!(f, " {}", self.halfmove)?;
        write!(f, " {}", self.fullmove)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{piece::Colour, types::Coord};

    fn at(fen: &Fen, name: &str) -> Piece {
        let sq: Coord = name.parse().unwrap();
        fen.board[sq.square_index().unwrap()]
    }

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(STARTING_FEN).unwrap();
        assert!(fen.white_to_move);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.ep_file, 0);
        assert_eq!(fen.halfmove, 0);
        assert_eq!(fen.fullmove, 1);
        for index in 0..16 {
            assert_eq!(fen.board[index].colour(), Some(Colour::White), "square {index}");
        }
        for index in 16..48 {
            assert!(fen.board[index].is_none(), "square {index}");
        }
        for index in 48..64 {
            assert_eq!(fen.board[index].colour(), Some(Colour::Black), "square {index}");
        }
        assert_eq!(at(&fen, "e1"), Piece::WK);
        assert_eq!(at(&fen, "d8"), Piece::BQ);
        assert_eq!(at(&fen, "b1"), Piece::WN);
        assert_eq!(at(&fen, "c8"), Piece::BB);
    }

    #[test]
    fn presets_round_trip() {
        for preset in [STARTING_FEN, MATE_IN_2, MATE_IN_3, MATE_IN_4] {
            let fen = Fen::parse(preset).unwrap();
            assert_eq!(fen.to_string(), preset);
        }
    }

    #[test]
    fn mate_in_two_layout() {
        let fen = Fen::parse(Preset::MateIn2.fen()).unwrap();
        assert_eq!(at(&fen, "b7"), Piece::BK);
        assert_eq!(at(&fen, "c7"), Piece::WP);
        assert_eq!(at(&fen, "h1"), Piece::WK);
        assert!(fen.castling.is_empty());
        assert_eq!(fen.halfmove, 1);
        assert_eq!(fen.fullmove, 1);
    }

    #[test]
    fn mate_in_three_is_black_to_move() {
        let fen = Fen::parse(MATE_IN_3).unwrap();
        assert!(!fen.white_to_move);
        assert_eq!(at(&fen, "g8"), Piece::BK);
    }

    #[test]
    fn board_only_defaults() {
        let fen = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        assert!(fen.white_to_move);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.ep_file, 0);
        assert_eq!(fen.halfmove, 0);
        assert_eq!(fen.fullmove, 0);
    }

    #[test]
    fn side_is_ignored_with_only_two_fields() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert!(fen.white_to_move);
        assert_eq!(fen.castling, CastlingRights::ALL);

        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 b -").unwrap();
        assert!(!fen.white_to_move);
        assert!(fen.castling.is_empty());
    }

    #[test]
    fn anything_but_w_is_black() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 W - - 0 1").unwrap();
        assert!(!fen.white_to_move);
    }

    #[test]
    fn castling_substrings() {
        let fen = Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert_eq!(fen.castling, CastlingRights::new(true, false, false, true));
        let fen = Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w qkQ - 0 1").unwrap();
        assert_eq!(fen.castling, CastlingRights::new(false, true, true, true));
    }

    #[test]
    fn en_passant_reads_only_the_file() {
        let fen = Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(fen.ep_file, 5);
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - a9 0 1").unwrap();
        assert_eq!(fen.ep_file, 1);
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(fen.ep_file, 0);
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - E3 0 1").unwrap();
        assert_eq!(fen.ep_file, 0);
        // an empty field from a doubled space
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w -  0 1").unwrap();
        assert_eq!(fen.ep_file, 0);
    }

    #[test]
    fn counters_default_on_parse_failure() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - x y").unwrap();
        assert_eq!(fen.halfmove, 0);
        assert_eq!(fen.fullmove, 0);
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - -3 4000").unwrap();
        assert_eq!(fen.halfmove, 0);
        assert_eq!(fen.fullmove, 0);
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 12 34").unwrap();
        assert_eq!(fen.halfmove, 12);
        assert_eq!(fen.fullmove, 34);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 b - - 3 9 bm Qd1+; id \"x\";").unwrap();
        assert!(!fen.white_to_move);
        assert_eq!(fen.halfmove, 3);
        assert_eq!(fen.fullmove, 9);
    }

    #[test]
    fn reject_unknown_piece_letter() {
        let result = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1");
        assert_eq!(result, Err(FenParseError::UnexpectedCharacter('X')));
    }

    #[test]
    fn reject_piece_off_the_board() {
        let result = Fen::parse("8/8/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(result, Err(FenParseError::SquareOutOfRange { file: 0, rank: -1 }));
        let result = Fen::parse("8K/8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(result, Err(FenParseError::SquareOutOfRange { file: 8, rank: 7 }));
    }

    #[test]
    fn empty_board_field_is_an_empty_board() {
        let fen = Fen::parse("").unwrap();
        assert!(fen.board.iter().all(|p| p.is_none()));
        assert_eq!(fen.to_string(), "8/8/8/8/8/8/8/8 w KQkq - 0 0");
    }

    #[test]
    fn ep_rank_follows_side_to_move() {
        let mut fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        fen.ep_file = 4;
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 w - d6 0 1");
        fen.white_to_move = false;
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 b - d3 0 1");
        // out-of-range file values are not written
        fen.ep_file = 12;
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }
}
