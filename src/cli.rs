use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use chessbase::chess::fen::{Fen, Preset};

#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Option<Subcommands>,
}

/// Where the starting position comes from. Defaults to the standard start.
#[derive(Args, Debug, Clone, Default)]
pub struct PositionArgs {
    /// FEN string for the starting position.
    #[clap(long, value_name = "FEN", conflicts_with = "preset")]
    pub fen: Option<String>,
    /// A built-in position.
    #[clap(long, value_enum, value_name = "NAME")]
    pub preset: Option<Preset>,
}

impl PositionArgs {
    /// The FEN text these arguments select.
    pub fn fen_text(&self) -> &str {
        match (&self.fen, self.preset) {
            (Some(fen), _) => fen,
            (None, Some(preset)) => preset.fen(),
            (None, None) => Preset::Start.fen(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Subcommands {
    /// Print a diagram of a position, with its FEN and packed state.
    Show {
        #[clap(flatten)]
        position: PositionArgs,
    },
    /// Play moves given in coordinate notation (e.g. e2e4) and print the result.
    Play {
        #[clap(flatten)]
        position: PositionArgs,
        /// Report every move and state word to stderr.
        #[clap(long)]
        trace: bool,
        /// Take back this many moves after playing them all.
        #[clap(long, value_name = "N", default_value = "0")]
        undo: usize,
        /// The moves to play, in order.
        #[clap(required = true, value_name = "MOVES")]
        moves: Vec<String>,
    },
    /// Print each field of the packed state word.
    State {
        #[clap(flatten)]
        position: PositionArgs,
    },
}

/// Parses the position the user asked for.
pub fn parse_position(args: &PositionArgs) -> anyhow::Result<Fen> {
    let text = args.fen_text();
    Fen::parse(text).with_context(|| format!("invalid FEN \"{text}\""))
}
