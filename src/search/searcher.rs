// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::Score;
use crate::moves::Move;
use crate::search::{DataRecorder, Record};
use crate::types::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// The chosen move, or None if the root had no legal moves (or the search
    /// was asked for depth zero).
    pub best_move: Option<Move>,
    pub nodes_searched: u64,
    /// The score of the root, relative to the searching color.
    pub score: Score,
}

pub trait Searcher {
    /// Searches `depth` plies below `board` on behalf of `color`, which is also
    /// the color to move at the root.
    fn search(&mut self, board: &Board, color: Color, depth: u32) -> SearchResult;
}

/// Logs a finished root search and hands it to the recorder, if there is one.
pub(crate) fn report(
    recorder: Option<&dyn DataRecorder>,
    strategy: &str,
    board: &Board,
    color: Color,
    depth: u32,
    result: &SearchResult,
) {
    match result.best_move {
        Some(mov) => debug!(
            "{} depth {} for {}: {} scores {} after {} nodes",
            strategy, depth, color, mov, result.score, result.nodes_searched
        ),
        None => debug!(
            "{} depth {} for {}: no move, scores {} after {} nodes",
            strategy, depth, color, result.score, result.nodes_searched
        ),
    }

    if let Some(recorder) = recorder {
        let record = Record {
            fen: String::new(),
            strategy: strategy.to_owned(),
            depth,
            nodes: result.nodes_searched,
            score: result.score.value(),
            best_move: result.best_move.map(|m| m.as_uci()).unwrap_or_default(),
        };
        recorder.record(board, color, &record);
    }
}
