// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![allow(dead_code)]

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate pest_derive;

mod board;
pub mod book;
pub mod bot;
pub mod eval;
pub mod fen;
mod game;
mod move_generator;
mod moves;
mod perft;
mod piece;
pub mod search;
mod types;

pub use board::Board;
pub use book::OpeningBook;
pub use bot::{Bot, BotConfig, ExternalEngine, Strategy};
pub use game::{Game, GameError, Outcome};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveFlags};
pub use perft::{divide, perft};
pub use piece::{Piece, Role};
pub use types::{Color, PieceKind, Square, COLORS, PIECE_KINDS, PROMOTION_KINDS};
