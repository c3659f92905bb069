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

/// Minimax with alpha-beta pruning. Chooses the same move and score as
/// `MinimaxSearcher` for the same evaluator and depth, while visiting at most
/// as many nodes.
pub struct AlphaBetaSearcher<E> {
    evaluator: E,
    searching: Color,
    nodes_searched: u64,
    recorder: Option<Box<dyn DataRecorder>>,
}

impl<E: BoardEvaluator> AlphaBetaSearcher<E> {
    pub fn new() -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher {
            evaluator: Default::default(),
            searching: Color::White,
            nodes_searched: 0,
            recorder: None,
        }
    }

    pub fn with_recorder(recorder: Box<dyn DataRecorder>) -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher {
            recorder: Some(recorder),
            ..AlphaBetaSearcher::new()
        }
    }

    fn leaf(&self, board: &Board) -> Score {
        self.evaluator.evaluate(board) * self.searching.sign()
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        to_move: Color,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> (Score, Option<Move>) {
        self.nodes_searched += 1;
        if depth == 0 {
            return (self.leaf(board), None);
        }

        let moves = board.legal_moves(to_move);
        if moves.is_empty() {
            return (self.leaf(board), None);
        }

        let maximizing = to_move == self.searching;
        let mut best: Option<(Score, Move)> = None;
        for &mov in moves.iter() {
            let mut child = board.clone();
            child.apply(mov);
            let (score, _) = self.alpha_beta(&child, to_move.toggle(), depth - 1, alpha, beta);
            let improves = match best {
                None => true,
                Some((best_score, _)) if maximizing => score > best_score,
                Some((best_score, _)) => score < best_score,
            };

            if improves {
                best = Some((score, mov));
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }

            if alpha >= beta {
                break;
            }
        }

        match best {
            Some((score, mov)) => (score, Some(mov)),
            None => (self.leaf(board), None),
        }
    }
}

impl<E: BoardEvaluator> Searcher for AlphaBetaSearcher<E> {
    fn search(&mut self, board: &Board, color: Color, depth: u32) -> SearchResult {
        self.searching = color;
        self.nodes_searched = 0;
        let (score, best_move) = self.alpha_beta(board, color, depth, Score::MIN, Score::MAX);
        let result = SearchResult {
            best_move,
            nodes_searched: self.nodes_searched,
            score,
        };

        report(
            self.recorder.as_deref(),
            "alphabeta",
            board,
            color,
            depth,
            &result,
        );
        result
    }
}

impl<E: BoardEvaluator> Default for AlphaBetaSearcher<E> {
    fn default() -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher::new()
    }
}
