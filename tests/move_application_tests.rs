// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use pawnstorm::{fen, Board, Color, Game, Move, PieceKind, Square};

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

fn mv(text: &str) -> Move {
    Move::from_uci(text).unwrap()
}

fn kind_at(board: &Board, name: &str) -> Option<(PieceKind, Color)> {
    board.piece_at(sq(name)).map(|p| (p.kind(), p.color()))
}

#[test]
fn smoke_test_opening_pawn() {
    let mut game = Game::new();

    // nothing fancy, move a pawn up one.
    game.play(mv("e2e3")).unwrap();

    // it should now be Black's turn to move.
    assert_eq!(Color::Black, game.next_player());
    assert_eq!(Some((PieceKind::Pawn, Color::White)), kind_at(game.board(), "e3"));
    assert_eq!(None, kind_at(game.board(), "e2"));
    assert_eq!(None, game.board().en_passant_pawn());
}

#[test]
fn kingside_castle_moves_the_rook() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = Move::castle(sq("e1"), sq("g1"));
    assert!(game.legal_moves().contains(&castle));

    game.play(mv("e1g1")).unwrap();
    let board = game.board();
    assert_eq!(Some((PieceKind::King, Color::White)), kind_at(board, "g1"));
    assert_eq!(Some((PieceKind::Rook, Color::White)), kind_at(board, "f1"));
    assert_eq!(None, kind_at(board, "h1"));
    assert_eq!(None, kind_at(board, "e1"));
    assert!(!board.can_castle_kingside(Color::White));
    assert!(!board.can_castle_queenside(Color::White));
    assert_eq!(Some(castle), game.last_move());
}

#[test]
fn queenside_castle_moves_the_rook() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    game.play(mv("e8c8")).unwrap();
    let board = game.board();
    assert_eq!(Some((PieceKind::King, Color::Black)), kind_at(board, "c8"));
    assert_eq!(Some((PieceKind::Rook, Color::Black)), kind_at(board, "d8"));
    assert_eq!(None, kind_at(board, "a8"));
    assert!(board.can_castle_kingside(Color::White));
}

#[test]
fn no_castling_through_check() {
    // the rook on f2 covers f1
    let (board, _) = fen::decode("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
    let moves = board.legal_moves(Color::White);
    assert!(!moves.contains(&Move::castle(sq("e1"), sq("g1"))));
    assert!(moves.contains(&Move::castle(sq("e1"), sq("c1"))));
}

#[test]
fn no_castling_into_check() {
    let (board, _) = fen::decode("r3k2r/8/8/8/8/8/6r1/R3K2R w KQkq - 0 1").unwrap();
    let moves = board.legal_moves(Color::White);
    assert!(!moves.contains(&Move::castle(sq("e1"), sq("g1"))));
}

#[test]
fn no_castling_out_of_check() {
    let (board, _) = fen::decode("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
    assert!(board.is_in_check(Color::White));
    let moves = board.legal_moves(Color::White);
    assert!(moves.iter().all(|m| !m.is_castle()));
}

#[test]
fn no_castling_through_pieces() {
    let (board, _) = fen::decode("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
    let moves = board.legal_moves(Color::White);
    assert!(moves.iter().all(|m| !m.is_castle()));
}

#[test]
fn captured_rook_cannot_castle() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1").unwrap();
    game.play(mv("g2h1")).unwrap();
    assert!(!game.board().can_castle_kingside(Color::White));
    assert!(game.board().can_castle_queenside(Color::White));
    assert!(game.legal_moves().iter().all(|m| !m.is_kingside_castle()));
}

#[test]
fn king_that_moved_cannot_castle() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    for text in &["e1f1", "a8a7", "f1e1", "a7a8"] {
        game.play(mv(text)).unwrap();
    }

    // back on its home square, but it has moved
    assert_eq!(Color::White, game.next_player());
    assert!(game.board().piece_at(sq("e1")).unwrap().has_moved());
    assert!(!game.board().can_castle_kingside(Color::White));
    assert!(!game.board().can_castle_queenside(Color::White));
    assert!(game.legal_moves().iter().all(|m| !m.is_castle()));
    assert!(game.board().can_castle_kingside(Color::Black));
}

#[test]
fn en_passant_capture_removes_the_pawn() {
    let mut game = Game::from_fen("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1").unwrap();
    game.play(mv("e2e4")).unwrap();
    assert_eq!(Some(sq("e4")), game.board().en_passant_pawn());

    let capture = Move::en_passant(sq("f4"), sq("e3"));
    assert!(game.legal_moves().contains(&capture));
    game.play(mv("f4e3")).unwrap();

    let board = game.board();
    assert_eq!(Some((PieceKind::Pawn, Color::Black)), kind_at(board, "e3"));
    assert_eq!(None, kind_at(board, "e4"));
    assert_eq!(None, kind_at(board, "f4"));
    assert_eq!(Some(capture), game.last_move());
}

#[test]
fn en_passant_reset() {
    let mut game = Game::from_fen("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1").unwrap();
    game.play(mv("e2e4")).unwrap();

    // black not taking the en passant opportunity
    game.play(mv("e8d8")).unwrap();
    game.play(mv("e1d1")).unwrap();

    // en passant no longer possible.
    assert_eq!(None, game.board().en_passant_pawn());
    assert!(game.play(mv("f4e3")).is_err());
}

#[test]
fn en_passant_from_fen() {
    let (board, color) = fen::decode("8/8/8/8/4Pp2/8/8/K6k b - e3 0 1").unwrap();
    assert!(board
        .legal_moves(color)
        .contains(&Move::en_passant(sq("f4"), sq("e3"))));
}

#[test]
fn single_step_does_not_open_en_passant() {
    let mut game = Game::from_fen("4k3/8/8/8/8/5p2/4P3/4K3 w - - 0 1").unwrap();
    game.play(mv("e2e3")).unwrap();
    assert_eq!(None, game.board().en_passant_pawn());
}

#[test]
fn promotion_defaults_to_queen() {
    let (mut board, _) = fen::decode("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    board.apply(Move::quiet(sq("e7"), sq("e8")));
    assert_eq!(Some((PieceKind::Queen, Color::White)), kind_at(&board, "e8"));
    assert_eq!(None, kind_at(&board, "e7"));

    let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    game.play(mv("e7e8")).unwrap();
    assert_eq!(Some((PieceKind::Queen, Color::White)), kind_at(game.board(), "e8"));
}

#[test]
fn underpromotion_with_capture() {
    let mut game = Game::from_fen("3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    game.play(mv("e7d8n")).unwrap();
    assert_eq!(Some((PieceKind::Knight, Color::White)), kind_at(game.board(), "d8"));
    assert_eq!(1, game.board().pieces_of(Color::Black).count());
}

#[test]
fn black_promotes_on_the_first_rank() {
    let (board, color) = fen::decode("4k3/8/8/8/8/8/3p4/K7 b - - 0 1").unwrap();
    let promotions: Vec<String> = board
        .legal_moves(color)
        .iter()
        .filter(|m| m.is_promotion())
        .map(|m| m.as_uci())
        .collect();
    assert_eq!(vec!["d2d1q", "d2d1r", "d2d1b", "d2d1n"], promotions);
}
