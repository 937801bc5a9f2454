//! Opening book file loading
//!
//! Two formats are understood, chosen by file extension:
//!
//! - plain text (anything but `.csv`): one game per line, whitespace separated, with
//!   optional move numbers (`1.`, `12...`, `1.e4`) and an optional trailing result
//! - CSV: a header row containing a `moves_list` column whose cells look like
//!   `['e4', 'e5', 'Nf3']`
//!
//! Text lines are cut at `text_max_plies`. CSV lines are inserted whole unless a
//! `csv_max_plies` cap is given.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context};
use chess_engine::OpeningBook;
use tracing::{debug, info};

const MOVES_COLUMN: &str = "moves_list";
const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Loads a book from disk, picking the parser from the extension.
pub fn load_book(path: &Path, text_max_plies: usize, csv_max_plies: Option<usize>) -> anyhow::Result<OpeningBook> {
    let file = File::open(path).with_context(|| format!("opening book file {:?}", path))?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let (book, games) = if is_csv {
        parse_csv_book(file, csv_max_plies).with_context(|| format!("reading CSV book {:?}", path))?
    } else {
        parse_text_book(BufReader::new(file), text_max_plies)
            .with_context(|| format!("reading text book {:?}", path))?
    };

    info!(
        "[BOOK] Loaded {} games ({} positions) from {:?}",
        games,
        book.len(),
        path
    );
    Ok(book)
}

/// Parses a plain-text book. Returns the book and the number of games read.
pub fn parse_text_book<R: BufRead>(reader: R, max_plies: usize) -> anyhow::Result<(OpeningBook, usize)> {
    let mut book = OpeningBook::new();
    let mut games = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("line {}", index + 1))?;
        let tokens = text_line_tokens(&line, max_plies);
        if tokens.is_empty() {
            continue;
        }
        book.insert_line(&tokens);
        games += 1;
    }
    Ok((book, games))
}

/// Move tokens of one text line, stripped of numbering and cut at the result.
pub fn text_line_tokens(line: &str, max_plies: usize) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw in line.split_whitespace() {
        if tokens.len() >= max_plies || RESULT_TOKENS.contains(&raw) {
            break;
        }
        let token = strip_move_number(raw);
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }
    tokens
}

fn strip_move_number(token: &str) -> &str {
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some(dot) = token.rfind('.') {
            return &token[dot + 1..];
        }
    }
    token
}

/// Parses a CSV book. Returns the book and the number of games read.
pub fn parse_csv_book<R: Read>(reader: R, max_plies: Option<usize>) -> anyhow::Result<(OpeningBook, usize)> {
    let mut reader = csv::Reader::from_reader(reader);
    let column = reader
        .headers()
        .context("reading CSV header")?
        .iter()
        .position(|name| name.trim() == MOVES_COLUMN);
    let Some(column) = column else {
        bail!("CSV book has no {:?} column", MOVES_COLUMN);
    };

    let mut book = OpeningBook::new();
    let mut games = 0;
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("CSV record {}", index + 1))?;
        let Some(cell) = record.get(column) else {
            debug!("[BOOK] record {} has no moves cell", index + 1);
            continue;
        };
        let tokens: Vec<&str> = list_cell_tokens(cell).take(max_plies.unwrap_or(usize::MAX)).collect();
        if tokens.is_empty() {
            continue;
        }
        book.insert_line(&tokens);
        games += 1;
    }
    Ok((book, games))
}

/// Tokens of a `['e4', 'e5']` style cell.
fn list_cell_tokens(cell: &str) -> impl Iterator<Item = &str> {
    let inner = cell.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|token| token.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|token| !token.is_empty())
}
