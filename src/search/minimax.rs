// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::{BoardEvaluator, Score};
use crate::moves::Move;
use crate::search::searcher::report;
use crate::search::{DataRecorder, SearchResult, Searcher};
use crate::types::Color;

/// Exhaustive depth-limited minimax. Every legal move is searched to the full
/// depth; no branch is ever cut.
pub struct MinimaxSearcher<E> {
    evaluator: E,
    searching: Color,
    nodes_searched: u64,
    recorder: Option<Box<dyn DataRecorder>>,
}

impl<E: BoardEvaluator> MinimaxSearcher<E> {
    pub fn new() -> MinimaxSearcher<E> {
        MinimaxSearcher {
            evaluator: Default::default(),
            searching: Color::White,
            nodes_searched: 0,
            recorder: None,
        }
    }

    pub fn with_recorder(recorder: Box<dyn DataRecorder>) -> MinimaxSearcher<E> {
        MinimaxSearcher {
            recorder: Some(recorder),
            ..MinimaxSearcher::new()
        }
    }

    fn leaf(&self, board: &Board) -> Score {
        self.evaluator.evaluate(board) * self.searching.sign()
    }

    fn minimax(&mut self, board: &Board, to_move: Color, depth: u32) -> (Score, Option<Move>) {
        self.nodes_searched += 1;
        if depth == 0 {
            return (self.leaf(board), None);
        }

        // Checkmate and stalemate are both leaves.
        let moves = board.legal_moves(to_move);
        if moves.is_empty() {
            return (self.leaf(board), None);
        }

        let maximizing = to_move == self.searching;
        let mut best: Option<(Score, Move)> = None;
        for &mov in moves.iter() {
            let mut child = board.clone();
            child.apply(mov);
            let (score, _) = self.minimax(&child, to_move.toggle(), depth - 1);
            let improves = match best {
                None => true,
                Some((best_score, _)) if maximizing => score > best_score,
                Some((best_score, _)) => score < best_score,
            };

            if improves {
                best = Some((score, mov));
            }
        }

        match best {
            Some((score, mov)) => (score, Some(mov)),
            None => (self.leaf(board), None),
        }
    }
}

impl<E: BoardEvaluator> Searcher for MinimaxSearcher<E> {
    fn search(&mut self, board: &Board, color: Color, depth: u32) -> SearchResult {
        self.searching = color;
        self.nodes_searched = 0;
        let (score, best_move) = self.minimax(board, color, depth);
        let result = SearchResult {
            best_move,
            nodes_searched: self.nodes_searched,
            score,
        };

        report(
            self.recorder.as_deref(),
            "minimax",
            board,
            color,
            depth,
            &result,
        );
        result
    }
}

impl<E: BoardEvaluator> Default for MinimaxSearcher<E> {
    fn default() -> MinimaxSearcher<E> {
        MinimaxSearcher::new()
    }
}
