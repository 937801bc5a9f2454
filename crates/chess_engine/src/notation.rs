//! Standard algebraic notation
//!
//! Converts between [`Move`] values and tokens such as `e4`, `Nbd7`, `exd6`, `R1e2`, `e8=Q+`
//! and `O-O`. Both directions work against the legal moves of the given position, so the board
//! is borrowed mutably as scratch space and restored before returning.
//!
//! Parsing is strict. A token that matches no legal move, or more than one, is an error; callers
//! decide how to recover (the book falls back to search, the game API rejects the input).

use crate::board::Board;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::move_gen::{generate_legal_moves, has_legal_move, AttackTables};
use crate::types::*;

#[derive(Debug, Default)]
struct ParsedToken {
    piece: Option<PieceType>,
    to: Square,
    promotion: Option<PieceType>,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    capture: bool,
}

fn notation_error(token: &str, reason: &str) -> ChessEngineError {
    ChessEngineError::Notation {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

/// Drops a leading move number (`12.`, `3...`) and trailing check or annotation marks.
fn strip_decorations(token: &str) -> &str {
    let body = match token.rfind('.') {
        Some(dot) if token[..dot].chars().all(|c| c.is_ascii_digit() || c == '.') => &token[dot + 1..],
        _ => token,
    };
    body.trim_end_matches(['+', '#', '!', '?'])
}

fn castle_side(body: &str) -> Option<bool> {
    match body {
        "O-O" | "0-0" => Some(true),
        "O-O-O" | "0-0-0" => Some(false),
        _ => None,
    }
}

fn parse_token(token: &str, body: &str) -> ChessEngineResult<ParsedToken> {
    let mut body = body;
    let mut parsed = ParsedToken::default();

    if let Some((head, promotion)) = body.split_once('=') {
        let letter = promotion
            .chars()
            .next()
            .filter(|_| promotion.len() == 1)
            .ok_or_else(|| notation_error(token, "promotion must be a single piece letter"))?;
        parsed.promotion = PieceType::from_letter(letter.to_ascii_uppercase())
            .filter(|p| PieceType::PROMOTIONS.contains(p));
        if parsed.promotion.is_none() {
            return Err(notation_error(token, "invalid promotion piece"));
        }
        body = head;
    } else if body.len() > 2 {
        // `e8Q` without the equals sign
        let bytes = body.as_bytes();
        let last = bytes[bytes.len() - 1] as char;
        if bytes[bytes.len() - 2].is_ascii_digit() && "QRBN".contains(last) {
            parsed.promotion = PieceType::from_letter(last);
            body = &body[..body.len() - 1];
        }
    }

    if body.len() < 2 || !body.is_ascii() {
        return Err(notation_error(token, "missing destination square"));
    }
    let (prefix, destination) = body.split_at(body.len() - 2);
    parsed.to = parse_square(destination)?;

    let mut rest = prefix.chars().peekable();
    if let Some(&first) = rest.peek() {
        if first.is_ascii_uppercase() {
            let piece = PieceType::from_letter(first)
                .ok_or_else(|| notation_error(token, "unknown piece letter"))?;
            parsed.piece = Some(piece);
            rest.next();
        }
    }
    for c in rest {
        match c {
            'x' | ':' => parsed.capture = true,
            'a'..='h' if !parsed.capture => parsed.from_file = Some(c as u8 - b'a'),
            '1'..='8' if !parsed.capture => parsed.from_rank = Some(c as u8 - b'1'),
            _ => return Err(notation_error(token, "unexpected character")),
        }
    }
    Ok(parsed)
}

/// Finds the legal move `token` denotes in the current position.
pub fn text_to_move(board: &mut Board, tables: &AttackTables, token: &str) -> ChessEngineResult<Move> {
    let token = token.trim();
    let body = strip_decorations(token);
    if body.is_empty() {
        return Err(notation_error(token, "empty move"));
    }

    let mut legal = MoveList::new();
    generate_legal_moves(board, tables, &mut legal);

    let matches: Vec<Move> = match castle_side(body) {
        Some(king_side) => legal
            .iter()
            .filter(|m| m.is_castle() && (m.to > m.from) == king_side)
            .copied()
            .collect(),
        None => {
            let parsed = parse_token(token, body)?;
            let piece = parsed.piece.unwrap_or(PieceType::Pawn);
            legal
                .iter()
                .filter(|m| {
                    m.piece == piece
                        && m.to == parsed.to
                        && m.promotion == parsed.promotion
                        && !m.is_castle()
                        && (!parsed.capture || m.is_capture())
                        && parsed.from_file.map_or(true, |f| file_of(m.from) == f)
                        && parsed.from_rank.map_or(true, |r| rank_of(m.from) == r)
                })
                .copied()
                .collect()
        }
    };

    match matches.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(ChessEngineError::NoMatchingMove {
            token: token.to_string(),
        }),
        _ => Err(ChessEngineError::AmbiguousMove {
            token: token.to_string(),
            count: matches.len(),
        }),
    }
}

/// Writes `mv` in standard algebraic notation for the current position.
///
/// `mv` should be legal here; the check suffix is computed by playing it.
pub fn move_to_text(board: &mut Board, tables: &AttackTables, mv: Move) -> String {
    let mut text = if mv.is_castle() {
        if mv.to > mv.from { "O-O".to_string() } else { "O-O-O".to_string() }
    } else {
        body_text(board, tables, mv)
    };

    board.make_move(mv);
    if board.in_check(tables) {
        text.push(if has_legal_move(board, tables) { '+' } else { '#' });
    }
    board.unmake_move(mv);
    text
}

/// The board's move history as tokens, each written for the position it was played from.
pub fn history_to_text(board: &Board, tables: &AttackTables) -> Vec<String> {
    let mut replay = board.initial_position();
    board
        .move_history()
        .map(|&mv| {
            let text = move_to_text(&mut replay, tables, mv);
            replay.make_move(mv);
            text
        })
        .collect()
}

fn body_text(board: &mut Board, tables: &AttackTables, mv: Move) -> String {
    let from = square_name(mv.from);
    let mut text = String::with_capacity(8);

    match mv.piece.letter() {
        None => {
            if mv.is_capture() {
                text.push_str(&from[..1]);
            }
        }
        Some(letter) => {
            text.push(letter);
            let mut legal = MoveList::new();
            generate_legal_moves(board, tables, &mut legal);
            let rivals: Vec<Square> = legal
                .iter()
                .filter(|m| m.piece == mv.piece && m.to == mv.to && m.from != mv.from)
                .map(|m| m.from)
                .collect();
            if !rivals.is_empty() {
                let file_clash = rivals.iter().any(|&sq| file_of(sq) == file_of(mv.from));
                let rank_clash = rivals.iter().any(|&sq| rank_of(sq) == rank_of(mv.from));
                match (file_clash, rank_clash) {
                    (false, _) => text.push_str(&from[..1]),
                    (true, false) => text.push_str(&from[1..]),
                    (true, true) => text.push_str(&from),
                }
            }
        }
    }

    if mv.is_capture() {
        text.push('x');
    }
    text.push_str(&square_name(mv.to));
    if let Some(letter) = mv.promotion.and_then(PieceType::letter) {
        text.push('=');
        text.push(letter);
    }
    text
}
