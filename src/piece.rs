// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

use crate::moves::Move;
use crate::types::{Color, PieceKind, Square};

/// Kind-specific state of a piece. Pawns carry their direction of travel and
/// whether they can currently be captured en passant; kings carry the squares
/// of the rooks they may still castle with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Pawn {
        direction: i32,
        en_passant: bool,
    },
    Knight,
    Bishop,
    Rook,
    Queen,
    King {
        kingside_rook: Option<Square>,
        queenside_rook: Option<Square>,
    },
}

impl Role {
    fn of(kind: PieceKind, color: Color) -> Role {
        match kind {
            PieceKind::Pawn => Role::Pawn {
                direction: color.pawn_direction(),
                en_passant: false,
            },
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook,
            PieceKind::Queen => Role::Queen,
            PieceKind::King => Role::King {
                kingside_rook: None,
                queenside_rook: None,
            },
        }
    }

    pub fn kind(&self) -> PieceKind {
        match self {
            Role::Pawn { .. } => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King { .. } => PieceKind::King,
        }
    }
}

/// A piece on the board. Pieces are owned by the board that contains them;
/// cloning a board clones every piece.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    role: Role,
    color: Color,
    moved: bool,
    // Legal moves computed by the last call to `MoveGenerator::calc_moves`.
    // Only meaningful until the board changes.
    moves: Vec<Move>,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            role: Role::of(kind, color),
            color,
            moved: false,
            moves: Vec::new(),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.role.kind()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Signed material value: positive for White, negative for Black.
    pub fn value(&self) -> f64 {
        self.kind().value() * self.color.sign()
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }

    /// Row delta of a single step, for pawns.
    pub fn direction(&self) -> Option<i32> {
        match self.role {
            Role::Pawn { direction, .. } => Some(direction),
            _ => None,
        }
    }

    /// Whether this piece is a pawn that just made a double step and may be
    /// captured en passant on the next ply.
    pub fn en_passant(&self) -> bool {
        match self.role {
            Role::Pawn { en_passant, .. } => en_passant,
            _ => false,
        }
    }

    pub fn set_en_passant(&mut self, value: bool) {
        if let Role::Pawn {
            ref mut en_passant, ..
        } = self.role
        {
            *en_passant = value;
        }
    }

    /// The squares of the rooks this king is still associated with, kingside
    /// first. Always `(None, None)` for anything but a king.
    pub fn rook_links(&self) -> (Option<Square>, Option<Square>) {
        match self.role {
            Role::King {
                kingside_rook,
                queenside_rook,
            } => (kingside_rook, queenside_rook),
            _ => (None, None),
        }
    }

    pub fn link_rooks(&mut self, kingside: Option<Square>, queenside: Option<Square>) {
        if let Role::King {
            ref mut kingside_rook,
            ref mut queenside_rook,
        } = self.role
        {
            *kingside_rook = kingside;
            *queenside_rook = queenside;
        }
    }

    /// Drops the association with the rook on `square`, if there is one.
    pub fn unlink_rook(&mut self, square: Square) {
        if let Role::King {
            ref mut kingside_rook,
            ref mut queenside_rook,
        } = self.role
        {
            if *kingside_rook == Some(square) {
                *kingside_rook = None;
            }
            if *queenside_rook == Some(square) {
                *queenside_rook = None;
            }
        }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn add_move(&mut self, mov: Move) {
        self.moves.push(mov);
    }

    pub fn clear_moves(&mut self) {
        self.moves.clear();
    }

    /// The single-letter code of this piece: uppercase for White, lowercase
    /// for Black.
    pub fn letter(&self) -> char {
        let chr = match self.kind() {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => chr.to_ascii_uppercase(),
            Color::Black => chr,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.letter())
    }
}
