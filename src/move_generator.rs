// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation. Each piece's movement rule produces pseudo-legal moves,
//! which are then filtered by playing them out on a scratch copy of the board
//! and rejecting any that leave the mover's king attacked.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Piece, Role};
use crate::types::{Color, PieceKind, Square, PROMOTION_KINDS};

/// No legal chess position has more than 218 moves.
pub type MoveVec = ArrayVec<[Move; 256]>;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Appends the pseudo-legal moves of the piece on `square` to `moves`.
    /// Does nothing if the square is empty.
    pub fn pseudo_legal_moves(&self, board: &Board, square: Square, moves: &mut MoveVec) {
        let piece = match board.piece_at(square) {
            Some(piece) => piece,
            None => return,
        };

        match *piece.role() {
            Role::Pawn { direction, .. } => self.pawn_moves(board, piece, square, direction, moves),
            Role::Knight => self.step_moves(board, piece, square, &KNIGHT_OFFSETS, moves),
            Role::Bishop => self.slide_moves(board, piece, square, &DIAGONALS, moves),
            Role::Rook => self.slide_moves(board, piece, square, &ORTHOGONALS, moves),
            Role::Queen => {
                self.slide_moves(board, piece, square, &ORTHOGONALS, moves);
                self.slide_moves(board, piece, square, &DIAGONALS, moves);
            }
            Role::King { .. } => {
                self.step_moves(board, piece, square, &KING_OFFSETS, moves);
                self.castle_moves(board, piece, square, moves);
            }
        }
    }

    /// The legal moves of the piece on `square`, in generation order.
    pub fn legal_moves_from(&self, board: &Board, square: Square) -> MoveVec {
        let mut pseudo = MoveVec::new();
        self.pseudo_legal_moves(board, square, &mut pseudo);
        let color = match board.piece_at(square) {
            Some(piece) => piece.color(),
            None => return pseudo,
        };

        pseudo
            .into_iter()
            .filter(|&mov| self.is_legal_given_pseudolegal(board, mov, color))
            .collect()
    }

    /// Every legal move for `color`, scanning the board row by row from the
    /// top-left corner.
    pub fn legal_moves(&self, board: &Board, color: Color) -> MoveVec {
        let mut moves = MoveVec::new();
        for (square, _) in board.pieces_of(color) {
            for mov in self.legal_moves_from(board, square) {
                moves.push(mov);
            }
        }

        moves
    }

    pub fn has_legal_moves(&self, board: &Board, color: Color) -> bool {
        let mut pseudo = MoveVec::new();
        for (square, _) in board.pieces_of(color) {
            pseudo.clear();
            self.pseudo_legal_moves(board, square, &mut pseudo);
            if pseudo
                .iter()
                .any(|&mov| self.is_legal_given_pseudolegal(board, mov, color))
            {
                return true;
            }
        }

        false
    }

    /// Recomputes the transient move list of the piece on `square`. The list
    /// is cleared first, so stale moves from an earlier turn never survive.
    pub fn calc_moves(&self, board: &mut Board, square: Square) {
        let legal = self.legal_moves_from(board, square);
        if let Some(piece) = board.piece_at_mut(square) {
            piece.clear_moves();
            for mov in legal {
                piece.add_move(mov);
            }
        }
    }

    /// Legality test for moves that are already known to be pseudo-legal: the
    /// move is played on a scratch copy and rejected if it leaves the mover's
    /// king attacked.
    pub fn is_legal_given_pseudolegal(&self, board: &Board, mov: Move, color: Color) -> bool {
        let mut scratch = board.clone();
        scratch.apply(mov);
        !scratch.is_in_check(color)
    }

    /// Returns whether `target` is attacked by any piece of color `by`,
    /// regardless of whether that piece's own king would be exposed.
    pub fn is_attacked(&self, board: &Board, target: Square, by: Color) -> bool {
        let holds = |square: Option<Square>, kinds: &[PieceKind]| match square
            .and_then(|sq| board.piece_at(sq))
        {
            Some(piece) => piece.color() == by && kinds.contains(&piece.kind()),
            None => false,
        };

        // Pretend there's a piece of every kind on the target square and see
        // what it hits. Knight and king moves are symmetric, so this is exact.
        if KNIGHT_OFFSETS
            .iter()
            .any(|&(dr, dc)| holds(target.offset(dr, dc), &[PieceKind::Knight][..]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(dr, dc)| holds(target.offset(dr, dc), &[PieceKind::King][..]))
        {
            return true;
        }

        // A pawn of color `by` attacks diagonally forward, so it must sit one
        // step behind the target from its own point of view.
        let back = -by.pawn_direction();
        if [-1, 1]
            .iter()
            .any(|&dc| holds(target.offset(back, dc), &[PieceKind::Pawn][..]))
        {
            return true;
        }

        let first_hit = |(dr, dc): (i32, i32)| {
            let mut cursor = target.offset(dr, dc);
            while let Some(sq) = cursor {
                if board.piece_at(sq).is_some() {
                    return Some(sq);
                }
                cursor = sq.offset(dr, dc);
            }
            None
        };

        ORTHOGONALS
            .iter()
            .any(|&dir| holds(first_hit(dir), &[PieceKind::Rook, PieceKind::Queen][..]))
            || DIAGONALS
                .iter()
                .any(|&dir| holds(first_hit(dir), &[PieceKind::Bishop, PieceKind::Queen][..]))
    }
}

//
// Per-piece movement rules
//

impl MoveGenerator {
    fn pawn_moves(
        &self,
        board: &Board,
        pawn: &Piece,
        square: Square,
        direction: i32,
        moves: &mut MoveVec,
    ) {
        let color = pawn.color();
        let push_promotions = |moves: &mut MoveVec, dest: Square| {
            for &kind in &PROMOTION_KINDS {
                moves.push(Move::promotion(square, dest, kind));
            }
        };

        if let Some(one) = square.offset(direction, 0) {
            if board.piece_at(one).is_none() {
                if one.row() == color.promotion_row() {
                    push_promotions(moves, one);
                } else {
                    moves.push(Move::quiet(square, one));
                    if square.row() == color.pawn_start_row() {
                        if let Some(two) = one.offset(direction, 0) {
                            if board.piece_at(two).is_none() {
                                moves.push(Move::double_pawn_push(square, two));
                            }
                        }
                    }
                }
            }
        }

        for &dc in &[-1, 1] {
            let dest = match square.offset(direction, dc) {
                Some(dest) => dest,
                None => continue,
            };

            match board.piece_at(dest) {
                Some(target) if target.color() != color => {
                    if dest.row() == color.promotion_row() {
                        push_promotions(moves, dest);
                    } else {
                        moves.push(Move::quiet(square, dest));
                    }
                }
                Some(_) => {}
                None => {
                    // The pawn beside us double-stepped past `dest` last ply.
                    let beside = square.offset(0, dc).and_then(|sq| board.piece_at(sq));
                    if let Some(victim) = beside {
                        if victim.color() != color && victim.en_passant() {
                            moves.push(Move::en_passant(square, dest));
                        }
                    }
                }
            }
        }
    }

    fn step_moves(
        &self,
        board: &Board,
        piece: &Piece,
        square: Square,
        offsets: &[(i32, i32)],
        moves: &mut MoveVec,
    ) {
        for &(dr, dc) in offsets {
            if let Some(dest) = square.offset(dr, dc) {
                match board.piece_at(dest) {
                    Some(other) if other.color() == piece.color() => {}
                    _ => moves.push(Move::quiet(square, dest)),
                }
            }
        }
    }

    fn slide_moves(
        &self,
        board: &Board,
        piece: &Piece,
        square: Square,
        directions: &[(i32, i32)],
        moves: &mut MoveVec,
    ) {
        for &(dr, dc) in directions {
            let mut cursor = square.offset(dr, dc);
            while let Some(dest) = cursor {
                match board.piece_at(dest) {
                    None => moves.push(Move::quiet(square, dest)),
                    Some(other) => {
                        if other.color() != piece.color() {
                            moves.push(Move::quiet(square, dest));
                        }
                        break;
                    }
                }
                cursor = dest.offset(dr, dc);
            }
        }
    }

    fn castle_moves(&self, board: &Board, king: &Piece, square: Square, moves: &mut MoveVec) {
        let color = king.color();
        let enemy = color.toggle();
        if king.has_moved() || self.is_attacked(board, square, enemy) {
            return;
        }

        for &kingside in &[true, false] {
            let rook = match board.castle_rook(color, kingside) {
                Some(rook) => rook,
                None => continue,
            };

            let step = if kingside { 1 } else { -1 };
            let (low, high) = if rook.col() < square.col() {
                (rook.col() + 1, square.col())
            } else {
                (square.col() + 1, rook.col())
            };
            let row = square.row();
            let path_clear = (low..high).all(|col| {
                Square::new(row, col).map_or(false, |sq| board.piece_at(sq).is_none())
            });
            if !path_clear {
                continue;
            }

            // The king may not pass through or land on an attacked square.
            let passes = square.offset(0, step);
            let lands = square.offset(0, 2 * step);
            let safe = [passes, lands].iter().all(|sq| match sq {
                Some(sq) => !self.is_attacked(board, *sq, enemy),
                None => false,
            });
            if let (true, Some(dest)) = (safe, lands) {
                moves.push(Move::castle(square, dest));
            }
        }
    }
}
