// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use pawnstorm::{Color, Game, PieceKind, COLORS};

fn kings(game: &Game, color: Color) -> usize {
    game.board()
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind() == PieceKind::King)
        .count()
}

#[test]
fn random_play_never_exposes_the_mover() {
    let mut rng = StdRng::seed_from_u64(0xc4e55);
    for _ in 0..12 {
        let mut game = Game::new();
        for _ in 0..80 {
            let mover = game.next_player();
            let moves = game.legal_moves();
            for mov in moves.iter() {
                let mut scratch = game.board().clone();
                scratch.apply(*mov);
                assert!(
                    !scratch.is_in_check(mover),
                    "{} leaves {} in check in {}",
                    mov,
                    mover,
                    game.as_fen()
                );
            }

            let mov = match moves.choose(&mut rng) {
                Some(&mov) => mov,
                None => break,
            };
            game.play(mov).unwrap();

            for &color in &COLORS {
                assert_eq!(1, kings(&game, color));
            }
            assert!(!game.is_in_check(mover));
        }
    }
}

#[test]
fn random_play_agrees_with_terminal_queries() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..12 {
        let mut game = Game::new();
        for _ in 0..120 {
            let color = game.next_player();
            let moves = game.legal_moves();
            if moves.is_empty() {
                assert!(game.is_checkmate(color) || game.is_stalemate(color));
                assert!(game.outcome().is_some());
                break;
            }

            assert!(!game.is_checkmate(color));
            assert!(!game.is_stalemate(color));
            assert_eq!(None, game.outcome());
            let mov = *moves.choose(&mut rng).unwrap();
            game.play(mov).unwrap();
        }
    }
}
