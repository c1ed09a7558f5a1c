#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::must_use_candidate, clippy::missing_const_for_fn)]

//! A compact chess position core: 5-bit piece codes, a 32-bit word for the
//! irreversible parts of a position, FEN conversion and move bookkeeping.
//!
//! Moves are applied without checking that they obey the rules of chess;
//! only the bookkeeping preconditions in
//! [`BoardState::is_valid_move`](chess::board::BoardState::is_valid_move)
//! are enforced.

pub mod chess;
pub mod errors;
