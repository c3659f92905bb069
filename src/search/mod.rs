// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod alpha_beta;
mod data;
mod minimax;
mod searcher;

pub use alpha_beta::AlphaBetaSearcher;
pub use data::{CsvDataRecorder, DataRecorder, Record};
pub use minimax::MinimaxSearcher;
pub use searcher::{SearchResult, Searcher};
