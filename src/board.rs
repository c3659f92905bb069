// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Write};

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square, COLORS, COLS, ROWS};

const KING_COL: usize = 4;
const KINGSIDE_ROOK_COL: usize = 7;
const QUEENSIDE_ROOK_COL: usize = 0;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The authoritative game state: an 8x8 grid of pieces and the last move
/// played. Castling and en-passant eligibility live on the pieces themselves.
///
/// The side to move is not part of the board; `Game` tracks it, and search and
/// encoding take it as a parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; COLS]; ROWS],
    last_move: Option<Move>,
}

//
// Board construction and state getters
//

impl Board {
    /// The standard initial arrangement.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for &color in &COLORS {
            let back = color.back_row();
            let pawns = color.pawn_start_row();
            for col in 0..COLS {
                board.put(square(back, col), Piece::new(BACK_RANK[col], color));
                board.put(square(pawns, col), Piece::new(PieceKind::Pawn, color));
            }
        }

        board.link_castling_rooks();
        board
    }

    pub fn empty() -> Board {
        Board::default()
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.row()][square.col()].as_ref()
    }

    pub fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.row()][square.col()].as_mut()
    }

    /// Places a piece on a square, returning whatever was there before.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square.row()][square.col()].replace(piece)
    }

    /// Removes and returns the piece on a square.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()].take()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Every occupied square with its piece, row-major from the top-left.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter().enumerate().filter_map(move |(col, slot)| {
                slot.as_ref().map(|piece| (square(row, col), piece))
            })
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Associates each unmoved king on its home square with the unmoved rooks
    /// on their home squares.
    pub fn link_castling_rooks(&mut self) {
        for &color in &COLORS {
            let back = color.back_row();
            let home = square(back, KING_COL);
            let kingside = self.unmoved_rook(color, square(back, KINGSIDE_ROOK_COL));
            let queenside = self.unmoved_rook(color, square(back, QUEENSIDE_ROOK_COL));
            if let Some(king) = self.piece_at_mut(home) {
                if king.kind() == PieceKind::King && king.color() == color && !king.has_moved() {
                    king.link_rooks(kingside, queenside);
                }
            }
        }
    }

    fn unmoved_rook(&self, color: Color, sq: Square) -> Option<Square> {
        match self.piece_at(sq) {
            Some(p) if p.kind() == PieceKind::Rook && p.color() == color && !p.has_moved() => {
                Some(sq)
            }
            _ => None,
        }
    }

    /// The square of the rook `color` may castle with on the given side,
    /// ignoring attacks and blocking pieces. The king must be unmoved on its
    /// home square and still associated with an unmoved rook of its color.
    pub fn castle_rook(&self, color: Color, kingside: bool) -> Option<Square> {
        let home = square(color.back_row(), KING_COL);
        let king = self.piece_at(home)?;
        if king.kind() != PieceKind::King || king.color() != color || king.has_moved() {
            return None;
        }

        let (kingside_rook, queenside_rook) = king.rook_links();
        let rook_square = if kingside {
            kingside_rook
        } else {
            queenside_rook
        }?;
        self.unmoved_rook(color, rook_square)
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_rook(color, true).is_some()
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_rook(color, false).is_some()
    }

    /// The pawn, if any, that may be captured en passant on this ply.
    pub fn en_passant_pawn(&self) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.en_passant())
            .map(|(sq, _)| sq)
    }
}

//
// Move application and board manipulation
//

impl Board {
    /// Applies a move to the board. The move must already be known to be
    /// legal; this routine only performs the state change.
    pub fn apply(&mut self, mov: Move) {
        let source = mov.source();
        let destination = mov.destination();
        let mut piece = match self.take(source) {
            Some(piece) => piece,
            None => {
                warn!("ignoring move {}: no piece at {}", mov, source);
                return;
            }
        };
        let color = piece.color();

        // En-passant is the only capture where the captured piece does not
        // sit on the destination square.
        let target = if mov.is_en_passant() {
            square(source.row(), destination.col())
        } else {
            destination
        };
        if let Some(captured) = self.take(target) {
            if captured.kind() == PieceKind::Rook {
                self.unlink_rook(captured.color(), target);
            }
        }

        if mov.is_castle() {
            let row = source.row();
            let (rook_from, rook_to) = if mov.is_kingside_castle() {
                (KINGSIDE_ROOK_COL, destination.col() - 1)
            } else {
                (QUEENSIDE_ROOK_COL, destination.col() + 1)
            };

            if let Some(mut rook) = self.take(square(row, rook_from)) {
                rook.set_moved(true);
                self.put(square(row, rook_to), rook);
            }
        }

        match piece.kind() {
            PieceKind::Rook => self.unlink_rook(color, source),
            PieceKind::Pawn if destination.row() == color.promotion_row() => {
                let kind = mov.promotion_piece().unwrap_or(PieceKind::Queen);
                piece = Piece::new(kind, color);
            }
            _ => {}
        }

        let double_step = piece.kind() == PieceKind::Pawn
            && (destination.row() as i32 - source.row() as i32).abs() == 2;
        piece.set_moved(true);
        piece.clear_moves();
        self.put(destination, piece);
        self.last_move = Some(mov);

        if double_step {
            self.mark_en_passant_eligibility(destination);
        } else {
            self.clear_en_passant();
        }
    }

    /// Opens the single-ply en-passant window for the pawn on `square`,
    /// closing any other window that was open.
    pub fn mark_en_passant_eligibility(&mut self, square: Square) {
        self.clear_en_passant();
        if let Some(piece) = self.piece_at_mut(square) {
            piece.set_en_passant(piece.kind() == PieceKind::Pawn);
        }
    }

    fn clear_en_passant(&mut self) {
        for slot in self.squares.iter_mut().flat_map(|rank| rank.iter_mut()) {
            if let Some(piece) = slot {
                piece.set_en_passant(false);
            }
        }
    }

    fn unlink_rook(&mut self, color: Color, rook_square: Square) {
        if let Some(king_square) = self.king_square(color) {
            if let Some(king) = self.piece_at_mut(king_square) {
                king.unlink_rook(rook_square);
            }
        }
    }
}

//
// Board analysis (check detection, terminal positions)
//

impl Board {
    /// Returns whether the king of the given color is attacked. A board with
    /// no king of that color is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => MoveGenerator::new().is_attacked(self, king, color.toggle()),
            None => false,
        }
    }

    pub fn legal_moves(&self, color: Color) -> MoveVec {
        MoveGenerator::new().legal_moves(self, color)
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        MoveGenerator::new().has_legal_moves(self, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Resolves a move in compact notation against the legal moves of
    /// `color`, recovering its flags. Returns None if the text is malformed or
    /// names no legal move.
    pub fn move_from_uci(&self, text: &str, color: Color) -> Option<Move> {
        let notation = Move::from_uci(text)?;
        self.legal_moves(color)
            .iter()
            .copied()
            .find(|mov| mov.matches_notation(notation))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            write!(f, "{} ", ROWS - row)?;
            for slot in rank.iter() {
                match slot {
                    Some(piece) => write!(f, " {}", piece)?,
                    None => f.write_str(" .")?,
                }
            }
            f.write_char('\n')?;
        }

        f.write_str("   a b c d e f g h")
    }
}

// Coordinates built from loop bounds are always on the board.
fn square(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap_or_else(|| unreachable!("square ({}, {}) off the board", row, col))
}
