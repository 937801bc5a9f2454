mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chess_engine::api::{do_move, get_game_state, history_notation, reply, Game, GameStatus};
use chess_engine::constants::MATE_THRESHOLD;
use chess_engine::move_gen::{perft_divide, AttackTables};
use chess_engine::notation::move_to_text;
use chess_engine::{Board, EngineContext, SearchResult};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_search::book_loader::load_book;
use chess_search::session::{load_configured_book, move_tokens, start_game};
use chess_search::settings::{load_settings, save_settings, settings_path};
use chess_search::EngineSettings;
use cli::{Args, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let path = args.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path);

    match args.command {
        Command::Bestmove {
            fen,
            moves,
            book,
            time_ms,
            depth,
            no_book,
        } => {
            apply_overrides(&mut settings, book, time_ms, depth);
            if no_book {
                settings.search.use_book = false;
            }
            persist(args.save_settings, &path, &settings)?;
            bestmove(&settings, fen.as_deref(), moves.as_deref())
        }
        Command::Perft { depth, fen } => perft(depth as usize, fen.as_deref()),
        Command::Selfplay {
            plies,
            fen,
            book,
            time_ms,
            depth,
        } => {
            apply_overrides(&mut settings, book, time_ms, depth);
            persist(args.save_settings, &path, &settings)?;
            selfplay(&settings, plies, fen.as_deref())
        }
        Command::Book { book, moves } => {
            if let Some(book) = book {
                settings.book_path = Some(book);
            }
            persist(args.save_settings, &path, &settings)?;
            list_book(&settings, &moves)
        }
    }
}

fn apply_overrides(settings: &mut EngineSettings, book: Option<PathBuf>, time_ms: Option<u64>, depth: Option<u32>) {
    if let Some(book) = book {
        settings.book_path = Some(book);
    }
    if let Some(time_ms) = time_ms {
        settings.search.time_budget_ms = time_ms;
    }
    if let Some(depth) = depth {
        settings.search.max_depth = depth;
    }
}

fn persist(save: bool, path: &Path, settings: &EngineSettings) -> Result<()> {
    if save {
        save_settings(path, settings)?;
    }
    Ok(())
}

fn context(settings: &EngineSettings) -> Result<Arc<EngineContext>> {
    Ok(EngineContext::shared(load_configured_book(settings)?))
}

fn format_score(score: i32) -> String {
    if score >= MATE_THRESHOLD {
        "mate (winning)".to_string()
    } else if score <= -MATE_THRESHOLD {
        "mate (losing)".to_string()
    } else {
        format!("{} cp", score)
    }
}

fn notation_of(game: &Game, result: &SearchResult) -> Option<String> {
    let mv = result.best_move?;
    let mut board = game.board().clone();
    Some(move_to_text(&mut board, &game.context().tables, mv))
}

fn bestmove(settings: &EngineSettings, fen: Option<&str>, moves: Option<&str>) -> Result<()> {
    let mut game = start_game(context(settings)?, settings, fen, moves)?;
    let started = Instant::now();
    let result = reply(&mut game);

    let Some(text) = notation_of(&game, &result) else {
        println!("no legal move ({:?})", get_game_state(&mut game));
        return Ok(());
    };
    println!("bestmove {}", text);
    println!(
        "source {} score {} depth {} nodes {} time {} ms",
        result.source,
        format_score(result.score),
        result.depth,
        result.stats.nodes,
        started.elapsed().as_millis()
    );
    Ok(())
}

fn perft(depth: usize, fen: Option<&str>) -> Result<()> {
    let mut board = match fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::starting_position(),
    };
    let tables = AttackTables::new();

    let started = Instant::now();
    let divide = perft_divide(&mut board, &tables, depth);
    let total: u64 = divide.iter().map(|(_, count)| count).sum();
    let elapsed = started.elapsed();

    for (mv, count) in &divide {
        println!("{}: {}", mv, count);
    }
    println!();
    println!("total {} in {:.3}s", total, elapsed.as_secs_f64());
    Ok(())
}

fn selfplay(settings: &EngineSettings, plies: usize, fen: Option<&str>) -> Result<()> {
    let mut game = start_game(context(settings)?, settings, fen, None)?;

    for _ in 0..plies {
        if get_game_state(&mut game) != GameStatus::Playing {
            break;
        }
        let result = reply(&mut game);
        let Some(mv) = result.best_move else {
            break;
        };
        info!(
            "[SELFPLAY] {} ({}, {})",
            notation_of(&game, &result).unwrap_or_default(),
            result.source,
            format_score(result.score)
        );
        do_move(&mut game, mv).context("engine produced an illegal move")?;
    }

    let history = history_notation(&game);
    let first_full_move = game.board().initial_position().full_move_number();
    let black_first = game.board().initial_position().side_to_move() == chess_engine::Color::Black;
    println!("{}", numbered_line(&history, first_full_move, black_first));
    println!("result {:?}", get_game_state(&mut game));
    Ok(())
}

/// `1. e4 e5 2. Nf3` style rendering of a history.
fn numbered_line(history: &[String], first_full_move: u32, black_first: bool) -> String {
    let mut parts = Vec::with_capacity(history.len() * 3 / 2);
    let mut number = first_full_move;
    let mut white_to_move = !black_first;
    if black_first && !history.is_empty() {
        parts.push(format!("{}...", number));
    }
    for token in history {
        if white_to_move {
            parts.push(format!("{}.", number));
        } else {
            number += 1;
        }
        parts.push(token.clone());
        white_to_move = !white_to_move;
    }
    parts.join(" ")
}

fn list_book(settings: &EngineSettings, moves: &str) -> Result<()> {
    let Some(path) = &settings.book_path else {
        bail!("no book given: pass --book or set book_path in the settings file");
    };
    let book = load_book(path, settings.book_max_plies, settings.csv_max_plies)?;
    let tokens = move_tokens(moves);

    match book.continuations(&tokens) {
        Some(replies) if replies.is_empty() => println!("end of book line"),
        Some(replies) => println!("{}", replies.join(" ")),
        None => println!("left book"),
    }
    Ok(())
}
