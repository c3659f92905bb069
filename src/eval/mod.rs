// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;

mod material;
mod positional;
mod score;

pub use material::MaterialEvaluator;
pub use positional::PositionalEvaluator;
pub use score::Score;

/// A static evaluation of a board. Evaluations are from White's point of view
/// and depend only on the pieces on the board.
pub trait BoardEvaluator: Default {
    fn evaluate(&self, board: &Board) -> Score;
}
