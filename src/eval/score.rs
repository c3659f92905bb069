// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::{Add, Mul, Neg};

/// Score is the output of a board evaluation function: a pawn-denominated
/// number, positive when the position favors White. Searchers turn it into a
/// score relative to the side they search for by multiplying with the side's
/// sign.
///
/// There are no mate scores; a checkmated side simply has less material than
/// it would after any alternative, and the king's value dwarfs everything else.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Score(pub f64);

impl Score {
    /// The lower edge of the root search window.
    pub const MIN: Score = Score(-1e9);

    /// The upper edge of the root search window.
    pub const MAX: Score = Score(1e9);

    pub fn value(self) -> f64 {
        self.0
    }

    /// The larger of two scores, preferring `self` on a tie.
    pub fn max(self, other: Score) -> Score {
        if other > self {
            other
        } else {
            self
        }
    }

    /// The smaller of two scores, preferring `self` on a tie.
    pub fn min(self, other: Score) -> Score {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score(self.0 + other.0)
    }
}

impl Mul<f64> for Score {
    type Output = Score;

    fn mul(self, factor: f64) -> Score {
        Score(self.0 * factor)
    }
}
