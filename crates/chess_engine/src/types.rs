//! # Chess Engine Core Types - Squares, Pieces and Moves
//!
//! ## Overview
//!
//! This module defines the small value types that flow through every other part of the engine.
//! They are all `Copy` and a few bytes wide so that move lists can live in fixed per-ply arrays
//! without allocation during search.
//!
//! ## The `Move` Structure
//!
//! A [`Move`] describes one state transition completely:
//! - **from/to**: source and destination squares (0-63)
//! - **piece/color**: the moving piece
//! - **captured**: the piece removed by the move, if any (a pawn for en passant)
//! - **promotion**: the piece a pawn turns into, if any
//! - **en_passant**: set when the captured pawn does not stand on `to`
//!
//! Castling is not a separate tag: a king move with `|to - from| == 2` is a castle, and the board
//! moves the matching rook when it applies it.
//!
//! ## Wire Encoding
//!
//! Transport collaborators exchange moves as seven 32-bit integers in a fixed order:
//!
//! | Index | Field          | Encoding                        |
//! |-------|----------------|---------------------------------|
//! | 0     | piece type     | Pawn=0 .. King=5                |
//! | 1     | piece color    | White=0, Black=1                |
//! | 2     | from square    | 0-63                            |
//! | 3     | to square      | 0-63                            |
//! | 4     | captured type  | Pawn=0 .. Queen=4, none=6       |
//! | 5     | en passant     | 0 or 1                          |
//! | 6     | promotion type | Knight=1 .. Queen=4, none=6     |
//!
//! ## The `MoveList` Buffer
//!
//! [`MoveList`] is a fixed-capacity array with a length. The search owns one per ply (see
//! [`PlyBuffers`]) so that a recursive call at one depth never clobbers the list its caller is
//! still iterating.

use crate::constants::{MAX_DEPTH, MAX_MOVES};
use crate::error::{ChessEngineError, ChessEngineResult};
use std::fmt;

pub type Square = u8;

/// Encoded value for "no piece" in the wire format.
pub const NO_PIECE_CODE: i32 = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Promotion choices in generation order.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<PieceType> {
        PieceType::ALL.get(index).copied()
    }

    /// Upper-case letter used in algebraic notation. Pawns have none.
    pub fn letter(self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Rook => Some('R'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceType> {
        match letter {
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

#[inline]
pub const fn square_of(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn square_bit(square: Square) -> u64 {
    1u64 << square
}

/// `e4` style name of a square.
pub fn square_name(square: Square) -> String {
    let file = (b'a' + file_of(square)) as char;
    let rank = (b'1' + rank_of(square)) as char;
    format!("{file}{rank}")
}

pub fn parse_square(text: &str) -> ChessEngineResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessEngineError::InvalidSquare {
            text: text.to_string(),
        });
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessEngineError::InvalidSquare {
            text: text.to_string(),
        });
    }
    Ok(square_of(file - b'a', rank - b'1'))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceType,
    pub color: Color,
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
    pub en_passant: bool,
}

impl Move {
    /// Placeholder used to fill unused buffer slots. Never a real move.
    pub const EMPTY: Move = Move {
        from: 0,
        to: 0,
        piece: PieceType::Pawn,
        color: Color::White,
        captured: None,
        promotion: None,
        en_passant: false,
    };

    pub fn quiet(from: Square, to: Square, piece: PieceType, color: Color) -> Self {
        Move {
            from,
            to,
            piece,
            color,
            captured: None,
            promotion: None,
            en_passant: false,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.piece == PieceType::King && self.from.abs_diff(self.to) == 2
    }

    /// Seven-field wire form, see the module docs for the field order.
    pub fn to_wire(&self) -> [i32; 7] {
        let code = |piece: Option<PieceType>| piece.map_or(NO_PIECE_CODE, |p| p.index() as i32);
        [
            self.piece.index() as i32,
            self.color.index() as i32,
            self.from as i32,
            self.to as i32,
            code(self.captured),
            self.en_passant as i32,
            code(self.promotion),
        ]
    }

    pub fn from_wire(fields: [i32; 7]) -> ChessEngineResult<Move> {
        let invalid = |reason: &str| ChessEngineError::InvalidWireMove {
            fields,
            reason: reason.to_string(),
        };
        let piece_code = |code: i32| -> Result<Option<PieceType>, ChessEngineError> {
            if code == NO_PIECE_CODE {
                return Ok(None);
            }
            usize::try_from(code)
                .ok()
                .and_then(PieceType::from_index)
                .map(Some)
                .ok_or_else(|| invalid("unknown piece code"))
        };
        let square = |code: i32| -> Result<Square, ChessEngineError> {
            if (0..64).contains(&code) {
                Ok(code as Square)
            } else {
                Err(invalid("square out of range"))
            }
        };

        let piece = piece_code(fields[0])?.ok_or_else(|| invalid("missing moving piece"))?;
        let color = match fields[1] {
            0 => Color::White,
            1 => Color::Black,
            _ => return Err(invalid("unknown color")),
        };
        let from = square(fields[2])?;
        let to = square(fields[3])?;
        if from == to {
            return Err(invalid("from and to squares are equal"));
        }
        let en_passant = match fields[5] {
            0 => false,
            1 => true,
            _ => return Err(invalid("en passant flag must be 0 or 1")),
        };

        let captured = piece_code(fields[4])?;
        if captured == Some(PieceType::King) {
            return Err(invalid("a king cannot be captured"));
        }
        let promotion = piece_code(fields[6])?;
        if matches!(promotion, Some(PieceType::Pawn | PieceType::King)) {
            return Err(invalid("promotion must be to a knight, bishop, rook or queen"));
        }

        Ok(Move {
            from,
            to,
            piece,
            color,
            captured,
            promotion,
            en_passant,
        })
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::EMPTY
    }
}

/// Coordinate form (`e2e4`, `e7e8q`), used for logging.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(promotion) = self.promotion.and_then(PieceType::letter) {
            write!(f, "{}", promotion.to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Fixed-capacity move buffer.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: [Move::EMPTY; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move buffer overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Move {
        self.as_slice()[index]
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.as_slice().contains(mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// One [`MoveList`] per search ply, owned by a single search invocation.
pub struct PlyBuffers {
    plies: Vec<MoveList>,
}

impl PlyBuffers {
    pub fn new() -> Self {
        PlyBuffers {
            plies: (0..=MAX_DEPTH).map(|_| MoveList::new()).collect(),
        }
    }

    #[inline]
    pub fn ply(&self, ply: usize) -> &MoveList {
        &self.plies[ply]
    }

    #[inline]
    pub fn ply_mut(&mut self, ply: usize) -> &mut MoveList {
        &mut self.plies[ply]
    }
}

impl Default for PlyBuffers {
    fn default() -> Self {
        PlyBuffers::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names_round_trip() {
        for square in 0..64u8 {
            assert_eq!(parse_square(&square_name(square)).unwrap(), square);
        }
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
        assert!(parse_square("i1").is_err());
        assert!(parse_square("e9").is_err());
    }

    #[test]
    fn test_wire_encoding_field_order() {
        let mv = Move {
            from: 52,
            to: 60,
            piece: PieceType::Pawn,
            color: Color::White,
            captured: None,
            promotion: Some(PieceType::Queen),
            en_passant: false,
        };
        assert_eq!(mv.to_wire(), [0, 0, 52, 60, NO_PIECE_CODE, 0, 4]);
        assert_eq!(Move::from_wire(mv.to_wire()).unwrap(), mv);
    }

    #[test]
    fn test_wire_rejects_garbage() {
        assert!(Move::from_wire([9, 0, 12, 28, 6, 0, 6]).is_err());
        assert!(Move::from_wire([0, 2, 12, 28, 6, 0, 6]).is_err());
        assert!(Move::from_wire([0, 0, 12, 64, 6, 0, 6]).is_err());
        assert!(Move::from_wire([0, 0, 12, 12, 6, 0, 6]).is_err());
        assert!(Move::from_wire([0, 0, 12, 28, 6, 5, 6]).is_err());
    }

    #[test]
    fn test_wire_rejects_impossible_pieces() {
        // promotion to pawn or king
        assert!(Move::from_wire([0, 0, 52, 60, 6, 0, 0]).is_err());
        assert!(Move::from_wire([0, 0, 52, 60, 6, 0, 5]).is_err());
        // king as the captured piece
        assert!(Move::from_wire([4, 0, 3, 59, 5, 0, 6]).is_err());
        // knight underpromotion with a capture is fine
        let mv = Move::from_wire([0, 0, 52, 61, 3, 0, 1]).unwrap();
        assert_eq!(mv.promotion, Some(PieceType::Knight));
        assert_eq!(mv.captured, Some(PieceType::Rook));
    }

    #[test]
    fn test_move_list_push_and_truncate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::quiet(12, 28, PieceType::Pawn, Color::White));
        list.push(Move::quiet(6, 21, PieceType::Knight, Color::White));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).to, 21);
        list.truncate(1);
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_castle_is_inferred_from_king_distance() {
        let castle = Move::quiet(4, 6, PieceType::King, Color::White);
        let step = Move::quiet(4, 5, PieceType::King, Color::White);
        assert!(castle.is_castle());
        assert!(!step.is_castle());
    }
}
