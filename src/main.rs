#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Command-line front end for the chessbase position core.

use anyhow::{Context, bail};
use chessbase::chess::{board::BoardState, state::GameState};

mod cli;

fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        // SAFETY: no other threads exist yet.
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }

    let cli = <cli::Cli as clap::Parser>::parse();

    match cli.subcommand {
        Some(cli::Subcommands::Show { position }) => show(&position),
        Some(cli::Subcommands::Play { position, trace, undo, moves }) => {
            play(&position, trace, undo, &moves)
        }
        Some(cli::Subcommands::State { position }) => state(&position),
        None => show(&cli::PositionArgs::default()),
    }
}

fn load(position: &cli::PositionArgs) -> anyhow::Result<BoardState> {
    let fen = cli::parse_position(position)?;
    let mut board = BoardState::new();
    board.load_position(&fen);
    Ok(board)
}

fn show(position: &cli::PositionArgs) -> anyhow::Result<()> {
    let board = load(position)?;
    println!("{board:X}");
    Ok(())
}

fn play(position: &cli::PositionArgs, trace: bool, undo: usize, moves: &[String]) -> anyhow::Result<()> {
    let mut board = load(position)?;
    let mut played = Vec::with_capacity(moves.len());

    for text in moves {
        let m = board
            .parse_move(text)
            .with_context(|| format!("cannot read move \"{text}\" in {board}"))?;
        if !board.execute_move(&m) {
            bail!("move \"{text}\" ({m:?}) is not allowed in {board}");
        }
        if trace {
            eprintln!(
                "info string played {text} ({}) state {} fen {board}",
                m.notation(),
                board.current_game_state()
            );
        }
        played.push(m.notation());
    }

    for _ in 0..undo {
        if !board.undo_move() {
            if trace {
                eprintln!("info string no moves left to take back");
            }
            break;
        }
        played.pop();
        if trace {
            eprintln!(
                "info string took back a move, state {} fen {board}",
                board.current_game_state()
            );
        }
    }

    println!("{board:X}");
    println!("Moves: {}", played.join(" "));
    Ok(())
}

fn state(position: &cli::PositionArgs) -> anyhow::Result<()> {
    let board = load(position)?;
    let state = board.current_game_state();
    println!("FEN: {board}");
    println!("word:      {:#010x}", state.inner());
    println!("binary:    {state}");
    println!("castling:  {}", state.castling());
    match state.en_passant_file() {
        Some(file) => println!("ep file:   {}", char::from(b'a' + file)),
        None => println!("ep file:   -"),
    }
    let captured = state.captured();
    if captured.is_none() {
        println!("captured:  -");
    } else {
        println!("captured:  {} {}", captured.colour_name(), captured.name());
    }
    println!("halfmove:  {} / {}", state.halfmove(), GameState::MAX_HALFMOVE);
    println!("fullmove:  {} / {}", state.fullmove(), GameState::MAX_FULLMOVE);
    Ok(())
}
