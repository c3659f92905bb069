// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::types::Color;

/// Counts the distinct move sequences of length `depth` starting with `color`
/// to move. Each root move is counted on its own thread.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(color);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut child = board.clone();
            child.apply(mov);
            perft_serial(&child, color.toggle(), depth - 1)
        })
        .sum()
}

fn perft_serial(board: &Board, color: Color, depth: u32) -> u64 {
    let moves = board.legal_moves(color);
    if depth <= 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mov| {
            let mut child = board.clone();
            child.apply(mov);
            perft_serial(&child, color.toggle(), depth - 1)
        })
        .sum()
}

/// Perft broken down by root move, in generation order.
pub fn divide(board: &Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    board
        .legal_moves(color)
        .par_iter()
        .map(|&mov| {
            let mut child = board.clone();
            child.apply(mov);
            let count = if depth <= 1 {
                1
            } else {
                perft_serial(&child, color.toggle(), depth - 1)
            };
            (mov.as_uci(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{divide, perft};
    use crate::board::Board;
    use crate::types::Color;

    #[test]
    fn depth_zero_is_one() {
        assert_eq!(1, perft(&Board::new(), Color::White, 0));
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::new();
        let split = divide(&board, Color::White, 2);
        assert_eq!(20, split.len());
        assert!(split.iter().all(|(_, count)| *count == 20));
        let total: u64 = split.iter().map(|(_, count)| count).sum();
        assert_eq!(perft(&board, Color::White, 2), total);
    }
}
