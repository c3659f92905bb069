// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move selection for computer players. A `Bot` turns a strategy name and a
//! depth into a move (or nothing); `ExternalEngine` asks an engine process for
//! one over a line-oriented channel. Every failure here is a missing move,
//! never an error, so a caller can always fall through to something else.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use crate::board::Board;
use crate::book::OpeningBook;
use crate::eval::{MaterialEvaluator, PositionalEvaluator};
use crate::fen;
use crate::moves::Move;
use crate::search::{AlphaBetaSearcher, MinimaxSearcher, Searcher};
use crate::types::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// A uniformly random legal move.
    Random,
    /// Minimax over material only.
    Minimax,
    /// Alpha-beta over material and placement.
    AlphaBeta,
    /// The opening book, falling back to a shallower alpha-beta search.
    Book,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Book => "book",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown strategy: {}", self.0)
    }
}

impl Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Strategy, UnknownStrategy> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "deepblue" | "deep_blue" => Ok(Strategy::AlphaBeta),
            "book" | "magnus" => Ok(Strategy::Book),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

pub static STRATEGIES: [Strategy; 4] = [
    Strategy::Random,
    Strategy::Minimax,
    Strategy::AlphaBeta,
    Strategy::Book,
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BotConfig {
    /// How many plies shallower the fallback search of the book strategy runs.
    /// The fallback never searches less than one ply.
    pub fallback_depth_reduction: u32,
    /// Passed to `OpeningBook::book_move`.
    pub book_randomness: f64,
}

impl Default for BotConfig {
    fn default() -> BotConfig {
        BotConfig {
            fallback_depth_reduction: 1,
            book_randomness: 0.0,
        }
    }
}

pub struct Bot<R = StdRng> {
    book: Option<Arc<OpeningBook>>,
    config: BotConfig,
    rng: R,
}

impl Bot<StdRng> {
    pub fn new(book: Option<Arc<OpeningBook>>, config: BotConfig) -> Bot<StdRng> {
        Bot::with_rng(book, config, StdRng::from_entropy())
    }
}

impl<R: Rng> Bot<R> {
    pub fn with_rng(book: Option<Arc<OpeningBook>>, config: BotConfig, rng: R) -> Bot<R> {
        Bot { book, config, rng }
    }

    /// Selects a move by strategy name. Unknown names select nothing.
    pub fn select_move(
        &mut self,
        board: &Board,
        color: Color,
        strategy_name: &str,
        depth: u32,
    ) -> Option<Move> {
        match strategy_name.parse::<Strategy>() {
            Ok(strategy) => self.select(board, color, strategy, depth),
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    pub fn select(
        &mut self,
        board: &Board,
        color: Color,
        strategy: Strategy,
        depth: u32,
    ) -> Option<Move> {
        match strategy {
            Strategy::Random => board.legal_moves(color).choose(&mut self.rng).copied(),
            Strategy::Minimax => MinimaxSearcher::<MaterialEvaluator>::new()
                .search(board, color, depth)
                .best_move,
            Strategy::AlphaBeta => AlphaBetaSearcher::<PositionalEvaluator>::new()
                .search(board, color, depth)
                .best_move,
            Strategy::Book => self.book_or_search(board, color, depth),
        }
    }

    fn book_or_search(&mut self, board: &Board, color: Color, depth: u32) -> Option<Move> {
        if let Some(book) = &self.book {
            let mov = book.book_move(board, color, self.config.book_randomness, &mut self.rng);
            if mov.is_some() {
                return mov;
            }
        }

        let fallback = depth
            .saturating_sub(self.config.fallback_depth_reduction)
            .max(1);
        debug!("no book move for {}, searching {} plies", color, fallback);
        AlphaBetaSearcher::<PositionalEvaluator>::new()
            .search(board, color, fallback)
            .best_move
    }
}

/// An engine process reached over a pair of line streams. The engine is sent
///
/// ```text
/// position fen <encoded position>
/// go depth <n>
/// ```
///
/// and lines are read back until one starts with `bestmove`, after which the
/// engine is told to `quit`. Anything else the engine prints is ignored.
pub struct ExternalEngine<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ExternalEngine<R, W> {
    pub fn new(reader: R, writer: W) -> ExternalEngine<R, W> {
        ExternalEngine { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Asks the engine for a move. I/O failures, a closed stream, and replies
    /// that are malformed or illegal all come back as None.
    pub fn best_move(&mut self, board: &Board, color: Color, depth: u32) -> Option<Move> {
        let reply = match self.exchange(board, color, depth) {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                warn!("engine closed its output without a best move");
                return None;
            }
            Err(err) => {
                warn!("engine unavailable: {}", err);
                return None;
            }
        };

        let mov = board.move_from_uci(&reply, color);
        if mov.is_none() {
            warn!("engine replied with unusable move {:?}", reply);
        }
        mov
    }

    fn exchange(&mut self, board: &Board, color: Color, depth: u32) -> io::Result<Option<String>> {
        writeln!(self.writer, "position fen {}", fen::encode(board, color))?;
        writeln!(self.writer, "go depth {}", depth)?;
        self.writer.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let mut words = line.split_whitespace();
            if words.next() == Some("bestmove") {
                let reply = words.next().unwrap_or("").to_owned();
                let _ = writeln!(self.writer, "quit").and_then(|_| self.writer.flush());
                return Ok(Some(reply));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BotConfig, Strategy, UnknownStrategy, STRATEGIES};

    #[test]
    fn strategy_names() {
        assert_eq!(Ok(Strategy::Random), "random".parse());
        assert_eq!(Ok(Strategy::Minimax), "minimax".parse());
        assert_eq!(Ok(Strategy::AlphaBeta), "alphabeta".parse());
        assert_eq!(Ok(Strategy::AlphaBeta), "deepblue".parse());
        assert_eq!(Ok(Strategy::AlphaBeta), "deep_blue".parse());
        assert_eq!(Ok(Strategy::Book), "book".parse());
        assert_eq!(Ok(Strategy::Book), " Magnus ".parse());
        assert_eq!(
            Err(UnknownStrategy("stockfish".to_owned())),
            "stockfish".parse::<Strategy>()
        );
    }

    #[test]
    fn names_parse_back() {
        for &strategy in &STRATEGIES {
            assert_eq!(Ok(strategy), strategy.name().parse());
        }
    }

    #[test]
    fn default_config() {
        let config = BotConfig::default();
        assert_eq!(1, config.fallback_depth_reduction);
        assert_eq!(0.0, config.book_randomness);
    }
}
