//! Bitboard position state
//!
//! The [`Board`] keeps one 64-bit occupancy mask per (color, piece type) pair, plus the rule
//! state a position needs: side to move, castling rights, en-passant target, half-move clock and
//! full-move number. A Zobrist hash is maintained incrementally by every
//! [`make_move`](Board::make_move) and [`unmake_move`](Board::unmake_move).
//!
//! Every piece placement change goes through a single `toggle` that XORs both the bitboard and
//! the hash, so applying the same toggles in reverse order restores the previous state exactly.
//! `make_move` pushes the fields it cannot reconstruct (castling rights, en-passant square,
//! half-move clock) onto the move history; `unmake_move` pops them.
//!
//! Callers must respect strict stack discipline: only the most recently made move may be
//! unmade. Violations are caught by `debug_assert!` in debug builds.

use crate::bitset::BitSet;
use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::hash::ZOBRIST;
use crate::move_gen::{is_king_attacked, AttackTables};
use crate::types::*;

/// Snapshot pushed by `make_move` so `unmake_move` can restore the position bit-exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    castling: u8,
    en_passant: Option<Square>,
    half_move_clock: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: [[u64; 6]; 2],
    occupancy: [u64; 2],
    side_to_move: Color,
    castling: u8,
    en_passant: Option<Square>,
    half_move_clock: u32,
    full_move_number: u32,
    hash: u64,
    history: Vec<HistoryEntry>,
}

impl Board {
    /// Board with no pieces, white to move, no castling rights.
    pub fn empty() -> Self {
        Board {
            pieces: [[0; 6]; 2],
            occupancy: [0; 2],
            side_to_move: Color::White,
            castling: 0,
            en_passant: None,
            half_move_clock: 0,
            full_move_number: 1,
            hash: 0,
            history: Vec::new(),
        }
    }

    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            let file = file as u8;
            board.toggle(Color::White, piece, square_of(file, 0));
            board.toggle(Color::White, PieceType::Pawn, square_of(file, 1));
            board.toggle(Color::Black, PieceType::Pawn, square_of(file, 6));
            board.toggle(Color::Black, piece, square_of(file, 7));
        }
        board.castling = ALL_CASTLING;
        board.hash = board.compute_hash();
        board
    }

    pub fn from_fen(fen: &str) -> ChessEngineResult<Self> {
        let invalid = |reason: &str| ChessEngineError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.to_string(),
        };
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }

        let mut board = Board::empty();
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("expected 8 ranks"));
        }
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file = file
                        .checked_add(skip as u8)
                        .filter(|f| skip > 0 && *f <= 8)
                        .ok_or_else(|| invalid("rank overflows 8 files"))?;
                    continue;
                }
                if file >= 8 {
                    return Err(invalid("rank overflows 8 files"));
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let piece = match c.to_ascii_lowercase() {
                    'p' => PieceType::Pawn,
                    'n' => PieceType::Knight,
                    'b' => PieceType::Bishop,
                    'r' => PieceType::Rook,
                    'q' => PieceType::Queen,
                    'k' => PieceType::King,
                    _ => return Err(invalid("unknown piece letter")),
                };
                board.toggle(color, piece, square_of(file, rank));
                file += 1;
            }
            if file != 8 {
                return Err(invalid("rank does not cover 8 files"));
            }
        }
        for color in Color::ALL {
            if board.pieces(color, PieceType::King).count_ones() != 1 {
                return Err(invalid("each side needs exactly one king"));
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("side to move must be 'w' or 'b'")),
        };

        if fields[2] != "-" {
            for c in fields[2].chars() {
                board.castling |= match c {
                    'K' => WHITE_KING_SIDE,
                    'Q' => WHITE_QUEEN_SIDE,
                    'k' => BLACK_KING_SIDE,
                    'q' => BLACK_QUEEN_SIDE,
                    _ => return Err(invalid("unknown castling flag")),
                };
            }
        }

        board.en_passant = match fields[3] {
            "-" => None,
            square => Some(parse_square(square).map_err(|_| invalid("bad en passant square"))?),
        };

        if let Some(clock) = fields.get(4) {
            board.half_move_clock = clock.parse().map_err(|_| invalid("bad half-move clock"))?;
        }
        if let Some(number) = fields.get(5) {
            board.full_move_number = number.parse().map_err(|_| invalid("bad full-move number"))?;
        }

        board.hash = board.compute_hash();
        if is_king_attacked(&board, &AttackTables::new(), board.side_to_move.opposite()) {
            return Err(invalid("side not to move is in check"));
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(square_of(file, rank)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let letter = piece.letter().unwrap_or('P');
                        fen.push(match color {
                            Color::White => letter,
                            Color::Black => letter.to_ascii_lowercase(),
                        });
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling == 0 {
            fen.push('-');
        } else {
            for (bit, flag) in [
                (WHITE_KING_SIDE, 'K'),
                (WHITE_QUEEN_SIDE, 'Q'),
                (BLACK_KING_SIDE, 'k'),
                (BLACK_QUEEN_SIDE, 'q'),
            ] {
                if self.castling & bit != 0 {
                    fen.push(flag);
                }
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(square) => fen.push_str(&square_name(square)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.half_move_clock, self.full_move_number));
        fen
    }

    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceType) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    /// Union of one color's bitboards.
    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy[0] | self.occupancy[1]
    }

    /// Union of both colors' bitboards for one piece type.
    #[inline]
    pub fn piece_union(&self, piece: PieceType) -> u64 {
        self.pieces[0][piece.index()] | self.pieces[1][piece.index()]
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceType)> {
        let bit = square_bit(square);
        let color = Color::ALL
            .into_iter()
            .find(|&color| self.occupancy(color) & bit != 0)?;
        PieceType::ALL
            .into_iter()
            .find(|&piece| self.pieces(color, piece) & bit != 0)
            .map(|piece| (color, piece))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        debug_assert!(self.pieces(color, PieceType::King) != 0, "king missing");
        self.pieces(color, PieceType::King).trailing_zeros() as Square
    }

    pub fn count_pieces(&self) -> u32 {
        self.occupied().count_ones()
    }

    /// Squares holding one color's pieces of one type.
    pub fn squares(&self, color: Color, piece: PieceType) -> BitSet {
        BitSet::from(self.pieces(color, piece))
    }

    /// True iff the side to move's king is attacked.
    pub fn in_check(&self, tables: &AttackTables) -> bool {
        is_king_attacked(self, tables, self.side_to_move)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> u8 {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    #[inline]
    pub fn full_move_number(&self) -> u32 {
        self.full_move_number
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn move_history(&self) -> impl DoubleEndedIterator<Item = &Move> + ExactSizeIterator {
        self.history.iter().map(|entry| &entry.mv)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    /// The position before the first recorded move, with an empty history.
    pub fn initial_position(&self) -> Board {
        let mut board = self.clone();
        while let Some(mv) = board.last_move() {
            board.unmake_move(mv);
        }
        board
    }

    /// Hash of the current position computed from scratch.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for color in Color::ALL {
            for piece in PieceType::ALL {
                let mut bits = self.pieces(color, piece);
                while bits != 0 {
                    let square = bits.trailing_zeros() as Square;
                    bits &= bits - 1;
                    hash ^= ZOBRIST.piece(color, piece, square);
                }
            }
        }
        hash ^= ZOBRIST.castling(self.castling);
        if let Some(square) = self.en_passant {
            hash ^= ZOBRIST.en_passant(square);
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side;
        }
        hash
    }

    #[inline]
    fn toggle(&mut self, color: Color, piece: PieceType, square: Square) {
        let bit = square_bit(square);
        self.pieces[color.index()][piece.index()] ^= bit;
        self.occupancy[color.index()] ^= bit;
        self.hash ^= ZOBRIST.piece(color, piece, square);
    }

    #[inline]
    fn set_castling(&mut self, rights: u8) {
        self.hash ^= ZOBRIST.castling(self.castling);
        self.castling = rights;
        self.hash ^= ZOBRIST.castling(self.castling);
    }

    #[inline]
    fn set_en_passant(&mut self, square: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= ZOBRIST.en_passant(old);
        }
        self.en_passant = square;
        if let Some(new) = square {
            self.hash ^= ZOBRIST.en_passant(new);
        }
    }

    /// Square of the pawn removed by a capture (differs from `to` for en passant).
    #[inline]
    fn capture_square(mv: &Move) -> Square {
        match (mv.en_passant, mv.color) {
            (true, Color::White) => mv.to - 8,
            (true, Color::Black) => mv.to + 8,
            (false, _) => mv.to,
        }
    }

    /// Rook source and destination for a castling king move.
    #[inline]
    fn castle_rook_squares(mv: &Move) -> (Square, Square) {
        if mv.to > mv.from {
            (mv.from + 3, mv.from + 1)
        } else {
            (mv.from - 4, mv.from - 1)
        }
    }

    /// Applies `mv`, which must be pseudo-legal in this position.
    pub fn make_move(&mut self, mv: Move) {
        debug_assert_eq!(mv.color, self.side_to_move, "move for the wrong side");
        debug_assert_ne!(mv.from, mv.to);

        self.history.push(HistoryEntry {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            half_move_clock: self.half_move_clock,
        });

        let us = mv.color;
        let them = us.opposite();

        if let Some(captured) = mv.captured {
            self.toggle(them, captured, Self::capture_square(&mv));
        }
        self.toggle(us, mv.piece, mv.from);
        self.toggle(us, mv.promotion.unwrap_or(mv.piece), mv.to);

        if mv.is_castle() {
            let (rook_from, rook_to) = Self::castle_rook_squares(&mv);
            self.toggle(us, PieceType::Rook, rook_from);
            self.toggle(us, PieceType::Rook, rook_to);
        }

        self.set_castling(
            self.castling & CASTLING_MASK[mv.from as usize] & CASTLING_MASK[mv.to as usize],
        );

        let double_step = mv.piece == PieceType::Pawn && mv.from.abs_diff(mv.to) == 16;
        self.set_en_passant(double_step.then(|| (mv.from + mv.to) / 2));

        if mv.piece == PieceType::Pawn || mv.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if us == Color::Black {
            self.full_move_number += 1;
        }

        self.side_to_move = them;
        self.hash ^= ZOBRIST.side;
    }

    /// Reverts `mv`, which must be the most recently made move.
    pub fn unmake_move(&mut self, mv: Move) {
        let entry = self.history.pop();
        debug_assert!(entry.is_some(), "unmake_move with empty history");
        let Some(entry) = entry else { return };
        debug_assert_eq!(entry.mv, mv, "unmake_move out of stack order");

        let us = mv.color;
        let them = us.opposite();

        self.hash ^= ZOBRIST.side;
        self.side_to_move = us;
        if us == Color::Black {
            self.full_move_number -= 1;
        }
        self.half_move_clock = entry.half_move_clock;
        self.set_en_passant(entry.en_passant);
        self.set_castling(entry.castling);

        if mv.is_castle() {
            let (rook_from, rook_to) = Self::castle_rook_squares(&mv);
            self.toggle(us, PieceType::Rook, rook_to);
            self.toggle(us, PieceType::Rook, rook_from);
        }
        self.toggle(us, mv.promotion.unwrap_or(mv.piece), mv.to);
        self.toggle(us, mv.piece, mv.from);
        if let Some(captured) = mv.captured {
            self.toggle(them, captured, Self::capture_square(&mv));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_matches_fen() {
        let board = Board::starting_position();
        assert_eq!(board.to_fen(), START_FEN);
        assert_eq!(Board::from_fen(START_FEN).unwrap(), board);
        assert_eq!(board.count_pieces(), 32);
        assert_eq!(board.king_square(Color::White), E1);
        assert_eq!(board.king_square(Color::Black), E8);
    }

    #[test]
    fn test_colors_never_overlap() {
        let board = Board::starting_position();
        assert_eq!(board.occupancy(Color::White) & board.occupancy(Color::Black), 0);
        assert_eq!(board.occupancy(Color::White).count_ones(), 16);
    }

    #[test]
    fn test_piece_at() {
        let board = Board::starting_position();
        assert_eq!(board.piece_at(D1), Some((Color::White, PieceType::Queen)));
        assert_eq!(board.piece_at(G8), Some((Color::Black, PieceType::Knight)));
        assert_eq!(board.piece_at(28), None);
    }

    #[test]
    fn test_double_step_sets_en_passant_and_hash() {
        let mut board = Board::starting_position();
        let before = board.clone();
        let mv = Move::quiet(12, 28, PieceType::Pawn, Color::White);
        board.make_move(mv);
        assert_eq!(board.en_passant(), Some(20));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.hash(), board.compute_hash());
        board.unmake_move(mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_en_passant_capture_removes_pawn_behind_target() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
        let before = board.clone();
        let mv = Move {
            from: 36,
            to: 45,
            piece: PieceType::Pawn,
            color: Color::White,
            captured: Some(PieceType::Pawn),
            promotion: None,
            en_passant: true,
        };
        board.make_move(mv);
        assert_eq!(board.piece_at(37), None);
        assert_eq!(board.piece_at(45), Some((Color::White, PieceType::Pawn)));
        assert_eq!(board.hash(), board.compute_hash());
        board.unmake_move(mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = board.clone();
        let mv = Move::quiet(E1, G1, PieceType::King, Color::White);
        board.make_move(mv);
        assert_eq!(board.piece_at(F1), Some((Color::White, PieceType::Rook)));
        assert_eq!(board.piece_at(H1), None);
        assert_eq!(board.castling_rights(), BLACK_KING_SIDE | BLACK_QUEEN_SIDE);
        assert_eq!(board.hash(), board.compute_hash());
        board.unmake_move(mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_rook_capture_clears_opponent_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = Move {
            from: A1,
            to: A8,
            piece: PieceType::Rook,
            color: Color::White,
            captured: Some(PieceType::Rook),
            promotion: None,
            en_passant: false,
        };
        board.make_move(mv);
        assert_eq!(board.castling_rights(), WHITE_KING_SIDE | BLACK_KING_SIDE);
        assert_eq!(board.half_move_clock(), 0);
    }

    #[test]
    fn test_promotion_round_trip() {
        let mut board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 5 40").unwrap();
        let before = board.clone();
        let mv = Move {
            from: 48,
            to: 57,
            piece: PieceType::Pawn,
            color: Color::White,
            captured: Some(PieceType::Knight),
            promotion: Some(PieceType::Queen),
            en_passant: false,
        };
        board.make_move(mv);
        assert_eq!(board.piece_at(57), Some((Color::White, PieceType::Queen)));
        assert_eq!(board.pieces(Color::White, PieceType::Pawn), 0);
        board.unmake_move(mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_fen_rejects_garbage() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - -").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -").is_err());
    }

    #[test]
    fn test_fen_rejects_long_digit_runs() {
        let err = Board::from_fen("99999999999999999999999999999999/8/8/8/8/8/8/4K2k w - - 0 1");
        assert!(matches!(err, Err(ChessEngineError::InvalidFen { .. })));
        assert!(Board::from_fen("4k4/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K03 w - - 0 1").is_err());
    }

    #[test]
    fn test_fen_rejects_capturable_king() {
        // black king on e8 attacked by the rook with white to move
        let err = Board::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1");
        assert!(matches!(err, Err(ChessEngineError::InvalidFen { .. })));
        // same placement with black to move is an ordinary check
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").is_ok());
    }

    #[test]
    fn test_fen_round_trip_keeps_counters() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 3 17";
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
    }
}
