// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a `Move` and its compact
//! string notation.
//!
//! A move is a source square, a destination square, an optional promotion
//! target and a small set of flags for the moves that do more than relocate a
//! single piece:
//!
//! | Flag               | Meaning                                          |
//! |--------------------|--------------------------------------------------|
//! | `EN_PASSANT`       | captures the pawn beside the source square       |
//! | `CASTLE`           | the king moves two files and the rook jumps over |
//! | `DOUBLE_PAWN_PUSH` | opens an en-passant window for the opponent      |
//!
//! The compact notation is four or five characters, e.g. `e2e4` or `e7e8q`. It
//! carries no flags; `Board::move_from_uci` recovers them from the legal set.
use regex::Regex;
use std::convert::TryFrom;
use std::fmt;

use crate::types::{PieceKind, Square};

bitflags! {
    pub struct MoveFlags: u8 {
        const EN_PASSANT = 0b0000_0001;
        const CASTLE = 0b0000_0010;
        const DOUBLE_PAWN_PUSH = 0b0000_0100;
    }
}

lazy_static! {
    static ref UCI_MOVE: Regex = Regex::new(r"^([a-h])([1-8])([a-h])([1-8])([qrbn])?$")
        .expect("move notation regex failed to compile");
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
}

impl Move {
    /// Constructs a new move from the source square to the destination square
    /// that is not en-passant, castling or a promotion.
    pub fn quiet(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    pub fn double_pawn_push(source: Square, destination: Square) -> Move {
        Move {
            flags: MoveFlags::DOUBLE_PAWN_PUSH,
            ..Move::quiet(source, destination)
        }
    }

    pub fn en_passant(source: Square, destination: Square) -> Move {
        Move {
            flags: MoveFlags::EN_PASSANT,
            ..Move::quiet(source, destination)
        }
    }

    /// Castles are encoded using the king's start and stop squares.
    pub fn castle(source: Square, destination: Square) -> Move {
        Move {
            flags: MoveFlags::CASTLE,
            ..Move::quiet(source, destination)
        }
    }

    pub fn promotion(source: Square, destination: Square, promoted: PieceKind) -> Move {
        Move {
            promotion: Some(promoted),
            ..Move::quiet(source, destination)
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_castle(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    pub fn is_kingside_castle(self) -> bool {
        self.is_castle() && self.destination.col() > self.source.col()
    }

    pub fn is_queenside_castle(self) -> bool {
        self.is_castle() && self.destination.col() < self.source.col()
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Whether `notation`, a move parsed from compact notation, names this
    /// move. A promotion written without a target letter names the queen
    /// promotion.
    pub fn matches_notation(self, notation: Move) -> bool {
        let wanted = match (self.promotion, notation.promotion) {
            (Some(_), None) => Some(PieceKind::Queen),
            (_, promotion) => promotion,
        };

        self.source == notation.source
            && self.destination == notation.destination
            && self.promotion == wanted
    }

    pub fn as_uci(self) -> String {
        let mut buf = String::with_capacity(5);
        buf.push(self.source.file_char());
        buf.push(self.source.rank_char());
        buf.push(self.destination.file_char());
        buf.push(self.destination.rank_char());
        if let Some(kind) = self.promotion {
            buf.push_str(&kind.to_string());
        }

        buf
    }

    /// Parses a move from compact notation. The result carries no flags.
    pub fn from_uci(text: &str) -> Option<Move> {
        let caps = UCI_MOVE.captures(text.trim())?;
        let char_at = |idx: usize| caps.get(idx).and_then(|m| m.as_str().chars().next());
        let source = Square::from_chars(char_at(1)?, char_at(2)?)?;
        let destination = Square::from_chars(char_at(3)?, char_at(4)?)?;
        let promotion = match char_at(5) {
            Some(c) => Some(PieceKind::try_from(c).ok()?),
            None => None,
        };

        Some(Move {
            source,
            destination,
            promotion,
            flags: MoveFlags::empty(),
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_uci())
    }
}
