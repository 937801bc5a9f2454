use std::path::PathBuf;

use chess_engine::constants::MAX_DEPTH;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long, global = true)]
    pub save_settings: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Choose a move for the side to move
    Bestmove {
        /// Start position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Moves already played, e.g. "1. e4 e5 2. Nf3"
        #[arg(long)]
        moves: Option<String>,
        /// Opening book file (.csv or plain text)
        #[arg(long)]
        book: Option<PathBuf>,
        #[arg(long)]
        time_ms: Option<u64>,
        #[arg(long)]
        depth: Option<u32>,
        /// Skip the opening book
        #[arg(long)]
        no_book: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH as i64))]
        depth: u32,
        #[arg(long)]
        fen: Option<String>,
    },
    /// Let the engine play both sides
    Selfplay {
        #[arg(long, default_value_t = 40)]
        plies: usize,
        #[arg(long)]
        fen: Option<String>,
        #[arg(long)]
        book: Option<PathBuf>,
        #[arg(long)]
        time_ms: Option<u64>,
        #[arg(long)]
        depth: Option<u32>,
    },
    /// List book continuations after a move sequence
    Book {
        #[arg(long)]
        book: Option<PathBuf>,
        #[arg(long, default_value = "")]
        moves: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_flags_parse() {
        let args = Args::try_parse_from(["chess-search", "bestmove", "--depth", "6", "--time-ms", "250"]).unwrap();
        match args.command {
            Command::Bestmove { depth, time_ms, .. } => {
                assert_eq!(depth, Some(6));
                assert_eq!(time_ms, Some(250));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_perft_depth_is_bounded() {
        assert!(Args::try_parse_from(["chess-search", "perft", "--depth", "4"]).is_ok());
        let too_deep = (MAX_DEPTH + 1).to_string();
        assert!(Args::try_parse_from(["chess-search", "perft", "--depth", too_deep.as_str()]).is_err());
        assert!(Args::try_parse_from(["chess-search", "perft", "--depth", "0"]).is_err());
    }
}
