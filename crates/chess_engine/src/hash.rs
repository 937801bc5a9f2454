//! Zobrist hashing
//!
//! Every (color, piece, square) triple, every castling-rights value, every en-passant file and
//! the side to move get a fixed pseudo-random 64-bit key. A position's hash is the XOR of the keys
//! of everything present, so the board can update it incrementally: toggling a piece on or off a
//! square is a single XOR, and applying the same XOR again undoes it.
//!
//! The keys are generated at compile time from a fixed seed with SplitMix64, so hashes are
//! stable across runs and no runtime initialisation is needed.

use crate::types::{Color, PieceType, Square};

pub struct ZobristKeys {
    pub pieces: [[[u64; 64]; 6]; 2],
    pub castling: [u64; 16],
    pub en_passant: [u64; 8],
    pub side: u64,
}

const SEED: u64 = 0x2545_F491_4F6C_DD1D;

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(SEED);

/// Returns the advanced state and the next output.
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    const fn generate(seed: u64) -> Self {
        let mut state = seed;
        let mut keys = ZobristKeys {
            pieces: [[[0; 64]; 6]; 2],
            castling: [0; 16],
            en_passant: [0; 8],
            side: 0,
        };

        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut square = 0;
                while square < 64 {
                    let (next, key) = splitmix64(state);
                    state = next;
                    keys.pieces[color][piece][square] = key;
                    square += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        // Index 0 (no rights) stays zero so a bare position hashes the same with or without it.
        let mut rights = 1;
        while rights < 16 {
            let (next, key) = splitmix64(state);
            state = next;
            keys.castling[rights] = key;
            rights += 1;
        }

        let mut file = 0;
        while file < 8 {
            let (next, key) = splitmix64(state);
            state = next;
            keys.en_passant[file] = key;
            file += 1;
        }

        let (_, side) = splitmix64(state);
        keys.side = side;
        keys
    }

    #[inline]
    pub fn piece(&self, color: Color, piece: PieceType, square: Square) -> u64 {
        self.pieces[color.index()][piece.index()][square as usize]
    }

    #[inline]
    pub fn castling(&self, rights: u8) -> u64 {
        self.castling[(rights & 0xF) as usize]
    }

    #[inline]
    pub fn en_passant(&self, square: Square) -> u64 {
        self.en_passant[(square % 8) as usize]
    }
}
