//! Building a game from settings, a start position and a move list.

use std::sync::Arc;

use anyhow::Context;
use chess_engine::api::{new_game, play_notation, Game};
use chess_engine::{EngineContext, OpeningBook};
use tracing::debug;

use crate::book_loader::{load_book, text_line_tokens};
use crate::settings::EngineSettings;

/// Loads the configured book, or an empty one when the book is disabled or unset.
pub fn load_configured_book(settings: &EngineSettings) -> anyhow::Result<OpeningBook> {
    match (&settings.book_path, settings.search.use_book) {
        (Some(path), true) => load_book(path, settings.book_max_plies, settings.csv_max_plies),
        (Some(path), false) => {
            debug!("[BOOK] book disabled, ignoring {:?}", path);
            Ok(OpeningBook::new())
        }
        (None, _) => Ok(OpeningBook::new()),
    }
}

/// Splits a move list such as `"1. e4 e5 2. Nf3"` into notation tokens.
pub fn move_tokens(moves: &str) -> Vec<String> {
    text_line_tokens(moves, usize::MAX)
}

/// A game at `fen` (or the standard start) with `moves` already played.
pub fn start_game(
    ctx: Arc<EngineContext>,
    settings: &EngineSettings,
    fen: Option<&str>,
    moves: Option<&str>,
) -> anyhow::Result<Game> {
    let mut game = match fen {
        Some(fen) => Game::from_fen(ctx, settings.search.clone(), fen)?,
        None => new_game(ctx, settings.search.clone()),
    };
    for token in moves.map(move_tokens).unwrap_or_default() {
        play_notation(&mut game, &token).with_context(|| format!("playing {:?}", token))?;
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::api::history_notation;

    #[test]
    fn test_start_game_plays_moves() {
        let settings = EngineSettings::default();
        let game = start_game(Arc::new(EngineContext::default()), &settings, None, Some("1. e4 e5 2. Nf3")).unwrap();
        assert_eq!(history_notation(&game), vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_bad_move_is_reported() {
        let settings = EngineSettings::default();
        let err = start_game(Arc::new(EngineContext::default()), &settings, None, Some("e4 e4")).unwrap_err();
        assert!(format!("{:#}", err).contains("e4"));
    }

    #[test]
    fn test_bad_fen_is_reported() {
        let settings = EngineSettings::default();
        assert!(start_game(Arc::new(EngineContext::default()), &settings, Some("not a fen"), None).is_err());
    }

    #[test]
    fn test_disabled_book_is_empty() {
        let mut settings = EngineSettings::default();
        settings.book_path = Some("does-not-exist.txt".into());
        settings.search.use_book = false;
        assert!(load_configured_book(&settings).unwrap().is_empty());

        settings.search.use_book = true;
        assert!(load_configured_book(&settings).is_err());
    }
}
