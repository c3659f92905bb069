// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::{BoardEvaluator, Score};
use crate::types::{Color, PieceKind, TableIndex, ROWS};

// Bonuses in hundredths of a pawn, indexed by rank as seen from the piece's own
// side (index 0 is its back rank).
const PAWN_TABLE: [i32; 8] = [0, 5, 5, 0, 5, 10, 50, 0];
const KNIGHT_TABLE: [i32; 8] = [-50, -40, -30, -30, -30, -30, -40, -50];
const BISHOP_TABLE: [i32; 8] = [-20, -10, -10, -10, -10, -10, -10, -20];
const ROOK_TABLE: [i32; 8] = [0, 0, 5, 10, 10, 5, 0, 0];
const QUEEN_TABLE: [i32; 8] = [-20, 0, 10, 20, 20, 10, 0, -20];
const KING_TABLE: [i32; 8] = [20, 30, 10, 0, 0, 10, 30, 20];

// Indexed by PieceKind.
static RANK_TABLES: [[i32; 8]; 6] = [
    PAWN_TABLE,
    KNIGHT_TABLE,
    BISHOP_TABLE,
    ROOK_TABLE,
    QUEEN_TABLE,
    KING_TABLE,
];

/// Material plus a per-rank placement bonus for every piece.
#[derive(Copy, Clone, Debug, Default)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    pub fn new() -> PositionalEvaluator {
        PositionalEvaluator
    }

    /// The placement bonus, in pawns and from White's point of view, of a piece
    /// of the given kind and color standing on `row`.
    pub fn placement_bonus(kind: PieceKind, color: Color, row: usize) -> f64 {
        let rank = match color {
            Color::White => ROWS - 1 - row,
            Color::Black => row,
        };

        f64::from(RANK_TABLES[kind.as_index()][rank]) / 100.0 * color.sign()
    }
}

impl BoardEvaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board) -> Score {
        let total: f64 = board
            .pieces()
            .map(|(square, piece)| {
                piece.value()
                    + PositionalEvaluator::placement_bonus(piece.kind(), piece.color(), square.row())
            })
            .sum();

        Score(total)
    }
}
