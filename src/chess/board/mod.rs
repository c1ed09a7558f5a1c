pub mod validation;

use std::fmt::{self, Debug, Display, Formatter};

use crate::{
    chess::{
        chessmove::Move,
        fen::{Fen, STARTING_FEN},
        piece::{Piece, PieceType},
        state::GameState,
        types::{BOARD_N_SQUARES, CastlingRights, Coord, file_of},
    },
    errors::{FenParseError, MoveParseError},
};

/// A stacked pre-image of the packed state, with the squares of the move
/// that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HistoryEntry {
    state: GameState,
    origin: usize,
    target: usize,
}

#[derive(PartialEq, Eq, Clone)]
pub struct BoardState {
    /// Piece code for each square, indexed `rank * 8 + file`.
    squares: [Piece; BOARD_N_SQUARES],
    /// The side to move.
    white_to_move: bool,
    /// Moves since the last capture or pawn move. Mirrors the packed word.
    halfmove_clock: u8,
    /// Completed turns. Mirrors the packed word.
    fullmove_number: u16,
    /// Castling rights, en-passant file, last capture and both clocks.
    current: GameState,
    history: Vec<HistoryEntry>,
}

impl Debug for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("squares", &self.squares)
            .field("white_to_move", &self.white_to_move)
            .field("halfmove_clock", &self.halfmove_clock)
            .field("fullmove_number", &self.fullmove_number)
            .field("current", &format_args!("{}", self.current))
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl BoardState {
    /// An empty board with nothing recorded in the packed state.
    pub const fn new() -> Self {
        Self {
            squares: [Piece::NONE; BOARD_N_SQUARES],
            white_to_move: true,
            halfmove_clock: 0,
            fullmove_number: 0,
            current: GameState::from_inner(0),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut out = Self::new();
        out.initialize(fen)?;
        Ok(out)
    }

    /// Sets up the board from FEN text. On error the board is left untouched.
    pub fn initialize(&mut self, fen: &str) -> Result<(), FenParseError> {
        let parsed = Fen::parse(fen)?;
        self.load_position(&parsed);
        Ok(())
    }

    pub fn set_startpos(&mut self) {
        let fen = Fen::parse(STARTING_FEN).expect("STARTING_FEN is broken");
        self.load_position(&fen);
    }

    /// Replaces the whole position with `fen` and forgets the move history.
    ///
    /// Values the packed word cannot hold are normalised: malformed piece
    /// codes become empty squares, an en-passant file past `h` becomes "none"
    /// and the full-move number is capped at [`GameState::MAX_FULLMOVE`].
    pub fn load_position(&mut self, fen: &Fen) {
        let ep_file = if fen.ep_file <= 8 { fen.ep_file } else { 0 };
        let fullmove = fen.fullmove.min(GameState::MAX_FULLMOVE);

        self.squares = fen.board.map(|p| if p.is_well_formed() { p } else { Piece::NONE });
        self.white_to_move = fen.white_to_move;
        self.current = GameState::new(fen.castling, ep_file, Piece::NONE, fen.halfmove, fullmove);
        self.halfmove_clock = self.current.halfmove();
        self.fullmove_number = self.current.fullmove();
        self.history.clear();

        debug_assert!(self.check_validity().is_ok(), "{:?}", self.check_validity());
    }

    /// The position as a FEN snapshot.
    pub fn snapshot(&self) -> Fen {
        Fen {
            board: self.squares,
            white_to_move: self.white_to_move,
            castling: self.current.castling(),
            ep_file: self.current.ep_file(),
            halfmove: self.halfmove_clock,
            fullmove: self.fullmove_number,
        }
    }

    /// The position as FEN text.
    pub fn save_position(&self) -> String {
        self.snapshot().to_string()
    }

    pub const fn squares(&self) -> &[Piece; BOARD_N_SQUARES] {
        &self.squares
    }

    /// The piece on `sq`, or [`Piece::NONE`] for empty or off-board squares.
    pub fn piece_at(&self, sq: Coord) -> Piece {
        sq.square_index().map_or(Piece::NONE, |index| self.squares[index])
    }

    pub const fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub const fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub const fn current_game_state(&self) -> GameState {
        self.current
    }

    pub const fn castling_rights(&self) -> CastlingRights {
        self.current.castling()
    }

    /// The zero-based file of the pawn that just advanced two squares.
    pub const fn en_passant_file(&self) -> Option<u8> {
        self.current.en_passant_file()
    }

    /// The piece taken by the last move, or [`Piece::NONE`].
    pub const fn last_captured(&self) -> Piece {
        self.current.captured()
    }

    /// Pre-move state words, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = GameState> + '_ {
        self.history.iter().map(|entry| entry.state)
    }

    /// Builds a move from coordinate text such as `e2e4`, taking the moving
    /// and captured pieces from the current position.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let text = text.trim();
        let (Some(from), Some(to), 4) = (text.get(0..2), text.get(2..4), text.len()) else {
            return Err(MoveParseError::InvalidLength(text.len()));
        };
        let origin: Coord = from
            .parse()
            .map_err(|_| MoveParseError::InvalidOrigin(from.to_string()))?;
        let target: Coord = to
            .parse()
            .map_err(|_| MoveParseError::InvalidTarget(to.to_string()))?;

        let piece = self.piece_at(origin);
        if piece.is_none() {
            return Err(MoveParseError::EmptyOrigin(origin));
        }
        let captured = Some(self.piece_at(target)).filter(|p| !p.is_none());

        Ok(Move::new(origin, piece).with_target(target).with_captured(captured))
    }

    /// Determines whether `m` may be executed. Only the bookkeeping
    /// preconditions are checked: piece movement rules, path clearance and
    /// king safety are not.
    pub fn is_valid_move(&self, m: &Move) -> bool {
        let (Some(origin), Some(target)) = (m.origin.square_index(), m.target.square_index()) else {
            return false;
        };
        // the record must describe the piece actually standing on the origin
        let moving = self.squares[origin];
        if moving.is_none() || !moving.is_well_formed() || m.piece != moving {
            return false;
        }
        if origin == target {
            return false;
        }

        let colour = moving.colour_bits();
        let same_colour = |p: Piece| !p.is_none() && p.colour_bits() == colour;
        if same_colour(self.squares[target]) || m.captured.is_some_and(same_colour) {
            return false;
        }

        true
    }

    /// Plays `m` on the board, updating the packed state. Returns `false`,
    /// leaving the position untouched, if the move fails [`Self::is_valid_move`].
    pub fn execute_move(&mut self, m: &Move) -> bool {
        if !self.is_valid_move(m) {
            return false;
        }
        let (Some(origin), Some(target)) = (m.origin.square_index(), m.target.square_index()) else {
            return false;
        };

        let piece = self.squares[origin];
        let captured = self.squares[target];
        let piece_type = piece.piece_type();
        let Some(side) = piece.colour() else {
            return false;
        };

        self.history.push(HistoryEntry { state: self.current, origin, target });

        let mut state = self.current.castling_only();
        let mut castling = state.castling();

        match piece_type {
            Some(PieceType::King) => castling.clear(side),
            Some(PieceType::Rook) => match file_of(origin) {
                0 => castling.clear_side::<false>(side),
                7 => castling.clear_side::<true>(side),
                _ => (),
            },
            Some(PieceType::Pawn) if m.offset().abs() > 8 => {
                #[allow(clippy::cast_possible_truncation)]
                state.set_ep_file(file_of(origin) as u8 + 1);
            }
            _ => (),
        }
        state.set_castling(castling);

        if !captured.is_none() {
            state.set_captured(captured);
        }

        if !captured.is_none() || piece_type == Some(PieceType::Pawn) {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        state.set_halfmove(self.halfmove_clock);

        self.squares[target] = piece;
        self.squares[origin] = Piece::NONE;

        self.white_to_move = !self.white_to_move;
        if self.white_to_move {
            self.fullmove_number = self.fullmove_number.saturating_add(1).min(GameState::MAX_FULLMOVE);
        }
        state.set_fullmove(self.fullmove_number);

        self.current = state;

        debug_assert!(self.check_validity().is_ok(), "{:?}", self.check_validity());

        true
    }

    /// Takes back the most recent move. Returns `false` if there is nothing
    /// to take back.
    pub fn undo_move(&mut self) -> bool {
        let Some(HistoryEntry { state, origin, target }) = self.history.pop() else {
            return false;
        };

        self.squares[origin] = self.squares[target];
        self.squares[target] = self.current.captured();

        self.current = state;
        self.white_to_move = !self.white_to_move;
        self.halfmove_clock = state.halfmove();
        self.fullmove_number = state.fullmove();

        debug_assert!(self.check_validity().is_ok(), "{:?}", self.check_validity());

        true
    }
}

impl Default for BoardState {
    fn default() -> Self {
        let mut out = Self::new();
        out.set_startpos();
        out
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}

impl fmt::UpperHex for BoardState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.squares[rank * 8 + file].char() {
                    Some(c) => write!(f, "{c} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "FEN: {self}")?;
        write!(f, "GameState: {}", self.current)?;

        Ok(())
    }
}
