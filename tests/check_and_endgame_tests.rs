// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use pawnstorm::{fen, Color, Game, Move, Outcome};

#[test]
fn smoke_test_starting_position() {
    let (board, _) = fen::decode("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();

    // white is not in check.
    assert!(!board.is_in_check(Color::White));
    assert!(!board.is_checkmate(Color::White));
    assert!(!board.is_stalemate(Color::White));
}

#[test]
fn fools_mate_check() {
    let (board, _) = fen::decode("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1").unwrap();

    // white is checkmated
    assert!(board.is_in_check(Color::White));
    assert!(board.is_checkmate(Color::White));
    assert!(board.legal_moves(Color::White).is_empty());
}

#[test]
fn back_rank_mate() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    game.play(Move::from_uci("a1a8").unwrap()).unwrap();

    assert!(game.is_checkmate(Color::Black));
    assert!(game.legal_moves().is_empty());
    assert_eq!(Some(Outcome::Checkmate(Color::Black)), game.outcome());
}

#[test]
fn sliding_piece_pin() {
    let (board, _) = fen::decode("8/8/4q3/8/8/8/4P3/4K3 w - - 0 1").unwrap();

    // white is not checked, the white pawn is blocking the queen
    assert!(!board.is_in_check(Color::White));
}

#[test]
fn position_5_bug_1_absolute_pin() {
    let (board, _) = fen::decode("rnR2k1r/pp1qbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1").unwrap();

    // black is checked by the white rook
    assert!(board.is_in_check(Color::Black));
}

#[test]
fn stalemate_smoke() {
    let game = Game::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();

    // black's turn to move. black is not in check but black has no legal moves.
    assert!(!game.is_in_check(Color::Black));
    assert!(game.is_stalemate(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(Some(Outcome::Stalemate), game.outcome());
}

#[test]
fn queen_stalemate_in_corner() {
    let (board, _) = fen::decode("k7/8/8/8/8/8/5q2/7K w - - 0 1").unwrap();

    // g1, g2 and h2 are all covered by the queen
    assert!(!board.is_in_check(Color::White));
    assert!(board.is_stalemate(Color::White));
}

#[test]
fn no_king_is_never_in_check() {
    let (board, _) = fen::decode("8/8/8/8/8/8/8/q6k w - - 0 1").unwrap();
    assert!(!board.is_in_check(Color::White));
}
