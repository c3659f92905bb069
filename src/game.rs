// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::board::Board;
use crate::fen::{self, FenParseError};
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{Color, Square};

/// Errors that can arise when playing a move through a `Game`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The move is not in the mover's legal set. The board is unchanged.
    IllegalMove(Move),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::IllegalMove(mov) => write!(f, "illegal move: {}", mov),
        }
    }
}

impl Error for GameError {}

/// How a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The given color has been checkmated.
    Checkmate(Color),
    Stalemate,
}

/// Tracks a game in progress: the live board and whose turn it is.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    next_player: Color,
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            next_player: Color::White,
        }
    }

    pub fn from_fen(text: &str) -> Result<Game, FenParseError> {
        let (board, next_player) = fen::decode(text)?;
        Ok(Game { board, next_player })
    }

    pub fn as_fen(&self) -> String {
        fen::encode(&self.board, self.next_player)
    }

    pub fn reset(&mut self) {
        *self = Game::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Color {
        self.next_player
    }

    pub fn next_turn(&mut self) {
        self.next_player = self.next_player.toggle();
    }

    pub fn last_move(&self) -> Option<Move> {
        self.board.last_move()
    }

    pub fn legal_moves(&self) -> MoveVec {
        self.board.legal_moves(self.next_player)
    }

    /// Refreshes the move list of the piece on `square`, for callers that
    /// highlight the destinations of a selected piece.
    pub fn calc_moves(&mut self, square: Square) {
        MoveGenerator::new().calc_moves(&mut self.board, square);
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.board.is_checkmate(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        self.board.is_stalemate(color)
    }

    /// Plays a move for the side to move and passes the turn. The move may
    /// come from compact notation without flags; it is matched against the
    /// legal set and the legal move is what gets applied.
    pub fn play(&mut self, mov: Move) -> Result<(), GameError> {
        let legal = self
            .legal_moves()
            .iter()
            .copied()
            .find(|&candidate| candidate == mov || candidate.matches_notation(mov))
            .ok_or(GameError::IllegalMove(mov))?;

        debug!("{} plays {}", self.next_player, legal);
        self.board.apply(legal);
        self.next_turn();
        Ok(())
    }

    /// The outcome of the game if the side to move has no legal moves.
    pub fn outcome(&self) -> Option<Outcome> {
        let color = self.next_player;
        if self.board.has_legal_moves(color) {
            None
        } else if self.board.is_in_check(color) {
            Some(Outcome::Checkmate(color))
        } else {
            Some(Outcome::Stalemate)
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
