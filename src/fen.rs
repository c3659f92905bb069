// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Position encoding. Boards are encoded in a FEN-shaped string that keeps only
//! the piece placement and the side to move; the castling, en-passant and
//! clock fields are always written as `- - 0 1`. This string is the key of the
//! opening book and what gets handed to an external engine.
//!
//! Because castling rights and the en-passant target are dropped, two positions
//! that differ only in those rights encode identically. Opening-book lookups
//! rely on that, so it is kept as is.
//!
//! Decoding accepts full FEN as well, and does honor the castling and
//! en-passant fields when they are present.
use pest::iterators::Pair;
use pest::Parser;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square, COLORS, COLS, ROWS};

pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const OMITTED_FIELDS: &str = "- - 0 1";

#[derive(Parser)]
#[grammar = "fen.pest"]
struct FenParser;

/// Possible errors that can arise when decoding a position string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    Syntax(String),
    BadRankLength(usize),
    TooManyKings(Color),
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::Syntax(msg) => write!(f, "malformed position: {}", msg),
            FenParseError::BadRankLength(row) => {
                write!(f, "rank {} does not sum to eight squares", ROWS - row)
            }
            FenParseError::TooManyKings(color) => write!(f, "more than one king for {}", color),
        }
    }
}

impl Error for FenParseError {}

/// Encodes a board and the side to move.
pub fn encode(board: &Board, color: Color) -> String {
    let mut out = String::with_capacity(72);
    for row in 0..ROWS {
        if row > 0 {
            out.push('/');
        }

        let mut empty = 0;
        for col in 0..COLS {
            match Square::new(row, col).and_then(|sq| board.piece_at(sq)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.letter());
                }
                None => empty += 1,
            }
        }

        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }

    out.push(' ');
    out.push_str(&color.to_string());
    out.push(' ');
    out.push_str(OMITTED_FIELDS);
    out
}

/// Rewrites an arbitrary FEN string into the form `encode` produces, by
/// keeping the placement and side fields and replacing the rest. Strings with
/// fewer than two fields are returned trimmed but otherwise untouched.
pub fn normalize(raw: &str) -> String {
    let mut fields = raw.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(placement), Some(side)) => format!("{} {} {}", placement, side, OMITTED_FIELDS),
        _ => raw.trim().to_owned(),
    }
}

/// Decodes a position string into a board and the side to move.
///
/// When the castling field is missing entirely, every king and rook standing
/// on its home square is assumed not to have moved.
pub fn decode(text: &str) -> Result<(Board, Color), FenParseError> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let fen = FenParser::parse(Rule::fen, &normalized)
        .map_err(|err| FenParseError::Syntax(err.to_string()))?
        .next()
        .ok_or_else(|| FenParseError::Syntax("empty input".to_owned()))?;

    let mut board = Board::empty();
    let mut side = Color::White;
    let mut castling = None;
    let mut en_passant = None;
    for field in fen.into_inner() {
        match field.as_rule() {
            Rule::placement => read_placement(&mut board, field)?,
            Rule::side => {
                side = if field.as_str() == "b" {
                    Color::Black
                } else {
                    Color::White
                }
            }
            Rule::castling => castling = Some(field.as_str()),
            Rule::en_passant => en_passant = Square::parse(field.as_str()),
            _ => {}
        }
    }

    for &color in &COLORS {
        let kings = board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind() == PieceKind::King)
            .count();
        if kings > 1 {
            return Err(FenParseError::TooManyKings(color));
        }
    }

    if let Some(rights) = castling {
        revoke_castling(&mut board, rights);
    }
    board.link_castling_rooks();

    if let Some(target) = en_passant {
        // The pawn that double-stepped sits one row past the target square.
        let (color, drow) = if target.row() == 5 {
            (Color::White, -1)
        } else {
            (Color::Black, 1)
        };
        if let Some(pawn) = target.offset(drow, 0) {
            let is_pawn = board
                .piece_at(pawn)
                .map_or(false, |p| p.kind() == PieceKind::Pawn && p.color() == color);
            if is_pawn {
                board.mark_en_passant_eligibility(pawn);
            }
        }
    }

    Ok((board, side))
}

fn read_placement(board: &mut Board, placement: Pair<Rule>) -> Result<(), FenParseError> {
    for (row, rank) in placement.into_inner().enumerate() {
        let mut col = 0;
        for token in rank.into_inner() {
            let chr = token.as_str().chars().next().unwrap_or('0');
            match token.as_rule() {
                Rule::empty => col += chr.to_digit(10).unwrap_or(0) as usize,
                Rule::piece => {
                    let square = Square::new(row, col).ok_or(FenParseError::BadRankLength(row))?;
                    let mut piece = Piece::try_from(chr)
                        .map_err(|_| FenParseError::Syntax(format!("unknown piece {}", chr)))?;
                    if piece.kind() == PieceKind::Pawn {
                        piece.set_moved(row != piece.color().pawn_start_row());
                    }
                    board.put(square, piece);
                    col += 1;
                }
                _ => {}
            }
        }

        if col != COLS {
            return Err(FenParseError::BadRankLength(row));
        }
    }

    Ok(())
}

// Marks the rooks (and kings) whose castle is absent from `rights` as moved,
// so that the association never forms for them.
fn revoke_castling(board: &mut Board, rights: &str) {
    for &color in &COLORS {
        let (kingside, queenside) = match color {
            Color::White => ('K', 'Q'),
            Color::Black => ('k', 'q'),
        };
        let back = color.back_row();
        for &(letter, col) in &[(kingside, COLS - 1), (queenside, 0)] {
            if rights.contains(letter) {
                continue;
            }

            if let Some(rook) = Square::new(back, col).and_then(|sq| board.piece_at_mut(sq)) {
                if rook.kind() == PieceKind::Rook && rook.color() == color {
                    rook.set_moved(true);
                }
            }
        }

        if !rights.contains(kingside) && !rights.contains(queenside) {
            if let Some(king) = board.king_square(color) {
                if let Some(piece) = board.piece_at_mut(king) {
                    piece.set_moved(true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, normalize, FenParseError, START_POSITION};
    use crate::board::Board;
    use crate::types::{Color, PieceKind, Square};

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn encode_start_position() {
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            encode(&Board::new(), Color::White)
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b - - 0 1",
            encode(&Board::new(), Color::Black)
        );
    }

    #[test]
    fn decode_start_position_matches_new() {
        let (board, side) = decode(START_POSITION).unwrap();
        assert_eq!(Color::White, side);
        assert_eq!(Board::new(), board);
    }

    #[test]
    fn decode_castling_rights() {
        let (board, _) = decode("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(board.can_castle_kingside(Color::White));
        assert!(!board.can_castle_queenside(Color::White));
        assert!(!board.can_castle_kingside(Color::Black));
        assert!(board.can_castle_queenside(Color::Black));

        let (board, _) = decode("r3k2r/8/8/8/8/8/8/R3K2R b - - 0 1").unwrap();
        assert!(!board.can_castle_kingside(Color::White));
        assert!(board.piece_at(sq("e8")).unwrap().has_moved());
    }

    #[test]
    fn decode_en_passant_target() {
        let (board, side) = decode("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").unwrap();
        assert_eq!(Color::White, side);
        assert_eq!(Some(sq("d5")), board.en_passant_pawn());
    }

    #[test]
    fn decode_abbreviated() {
        let (board, side) = decode("8/8/8/8/8/8/8/K6k b").unwrap();
        assert_eq!(Color::Black, side);
        assert_eq!(2, board.pieces().count());
        assert_eq!(
            PieceKind::King,
            board.piece_at(sq("h1")).unwrap().kind()
        );
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            Err(FenParseError::BadRankLength(0)),
            decode("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1").map(|_| ())
        );
        assert_eq!(
            Err(FenParseError::TooManyKings(Color::White)),
            decode("8/8/8/8/8/8/8/KK5k w - - 0 1").map(|_| ())
        );
        match decode("not a position") {
            Err(FenParseError::Syntax(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn encoding_ignores_castling_and_en_passant() {
        let (with_rights, _) = decode("r3k2r/8/8/8/4P3/8/8/R3K2R b KQkq e3 0 1").unwrap();
        let (without, _) = decode("r3k2r/8/8/8/4P3/8/8/R3K2R b - - 0 1").unwrap();
        assert_ne!(with_rights, without);
        assert_eq!(
            encode(&with_rights, Color::Black),
            encode(&without, Color::Black)
        );
    }

    #[test]
    fn normalize_book_keys() {
        assert_eq!(
            "8/8/8/8/8/8/8/K6k w - - 0 1",
            normalize("8/8/8/8/8/8/8/K6k w KQ e3 12 40")
        );
        assert_eq!(normalize("8/8/8/8/8/8/8/K6k w"), normalize("8/8/8/8/8/8/8/K6k  w - - 0 1"));
        assert_eq!("garbage", normalize("  garbage "));
    }
}
