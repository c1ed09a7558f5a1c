use crate::{
    chess::{board::BoardState, types::Coord},
    errors::PositionValidityError,
};

impl BoardState {
    /// Checks that the square array and the packed state agree with each
    /// other. Reachable positions always pass; this is a debugging aid.
    pub fn check_validity(&self) -> Result<(), PositionValidityError> {
        // check every square holds a real piece or nothing
        for (index, &piece) in self.squares.iter().enumerate() {
            if !piece.is_well_formed() {
                return Err(format!(
                    "square {} holds malformed piece code {:#07b}",
                    Coord::from_index(index),
                    piece.code()
                ));
            }
        }

        // check the mirrored clocks
        if self.halfmove_clock != self.current.halfmove() {
            return Err(format!(
                "half-move clock is corrupt: board says {}, state word says {}",
                self.halfmove_clock,
                self.current.halfmove()
            ));
        }
        if self.fullmove_number != self.current.fullmove() {
            return Err(format!(
                "full-move number is corrupt: board says {}, state word says {}",
                self.fullmove_number,
                self.current.fullmove()
            ));
        }

        // check the en-passant file fits on the board
        let ep_file = self.current.ep_file();
        if ep_file > 8 {
            return Err(format!("en-passant file is corrupt: expected 0..=8, got {ep_file}"));
        }

        // check the captured piece
        let captured = self.current.captured();
        if !captured.is_well_formed() {
            return Err(format!(
                "captured piece is corrupt: got code {:#07b}",
                captured.code()
            ));
        }

        // check the history only records on-board squares
        for (ply, entry) in self.history.iter().enumerate() {
            if entry.origin >= self.squares.len() || entry.target >= self.squares.len() {
                return Err(format!(
                    "history entry {ply} is corrupt: squares {} -> {}",
                    entry.origin, entry.target
                ));
            }
        }

        Ok(())
    }
}
