// Copyright 2017-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The opening book is a JSON object mapping encoded positions to objects that
//! map moves in compact notation to the number of times they were played:
//!
//! ```json
//! {
//!   "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1": { "e2e4": 412, "d2d4": 380 }
//! }
//! ```
//!
//! Keys are normalized on load with the same rule the position encoder uses,
//! so keys that differ only in castling, en-passant or clock fields end up in
//! one entry with their counts summed. Moves keep the order in which they
//! first appear in the file; that order breaks ties when picking greedily.
use hashbrown::HashMap;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::board::Board;
use crate::fen;
use crate::moves::Move;
use crate::types::Color;

#[derive(Debug)]
pub enum BookError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BookError::Io(err) => write!(f, "failed to read opening book: {}", err),
            BookError::Json(err) => write!(f, "malformed opening book: {}", err),
        }
    }
}

impl Error for BookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BookError::Io(err) => Some(err),
            BookError::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for BookError {
    fn from(err: io::Error) -> BookError {
        BookError::Io(err)
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> BookError {
        BookError::Json(err)
    }
}

/// A table from normalized position keys to the moves played there, in
/// first-seen order, with their counts.
#[derive(Clone, Debug, Default)]
pub struct OpeningBook {
    table: HashMap<String, Vec<(String, u64)>>,
}

impl OpeningBook {
    pub fn new() -> OpeningBook {
        OpeningBook {
            table: HashMap::new(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<OpeningBook, BookError> {
        let file = File::open(path.as_ref())?;
        let book = OpeningBook::from_reader(BufReader::new(file))?;
        info!(
            "loaded opening book {} with {} positions",
            path.as_ref().display(),
            book.len()
        );
        Ok(book)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<OpeningBook, BookError> {
        Ok(serde_json::from_reader::<_, OpeningBook>(reader)?)
    }

    pub fn from_json_str(text: &str) -> Result<OpeningBook, BookError> {
        Ok(serde_json::from_str::<OpeningBook>(text)?)
    }

    /// Adds `count` observations of `mov` at the position `key`. The key may be
    /// any FEN string; it is normalized first.
    pub fn add(&mut self, key: &str, mov: &str, count: u64) {
        let entries = self.table.entry(fen::normalize(key)).or_insert_with(Vec::new);
        match entries.iter_mut().find(|(existing, _)| existing == mov) {
            Some(entry) => entry.1 += count,
            None => entries.push((mov.to_owned(), count)),
        }
    }

    /// Number of distinct positions in the book.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The raw entries recorded for a position, without any legality check.
    pub fn candidates(&self, key: &str) -> Option<&[(String, u64)]> {
        self.table.get(&fen::normalize(key)).map(|e| e.as_slice())
    }

    /// Picks a book move for `color` on `board`, or None if the position is not
    /// in the book or none of its moves are legal here.
    ///
    /// A `randomness` of zero picks the most-played move. Anything above zero
    /// (clamped to one) draws at random, blending each move's share of the
    /// observed games with a uniform share; see `selection_weights`.
    pub fn book_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        color: Color,
        randomness: f64,
        rng: &mut R,
    ) -> Option<Move> {
        let key = fen::encode(board, color);
        let entries = match self.table.get(&key) {
            Some(entries) => entries,
            None => {
                debug!("book miss: {} is not in the book", key);
                return None;
            }
        };

        let legal = board.legal_moves(color);
        let mut candidates: Vec<(Move, u64)> = Vec::with_capacity(entries.len());
        for (text, count) in entries {
            let notation = match Move::from_uci(text) {
                Some(notation) => notation,
                None => {
                    warn!("ignoring unparsable book move {} at {}", text, key);
                    continue;
                }
            };

            let mov = match legal.iter().copied().find(|m| m.matches_notation(notation)) {
                Some(mov) => mov,
                None => continue,
            };

            // "e7e8" and "e7e8q" name the same move
            match candidates.iter_mut().find(|(existing, _)| *existing == mov) {
                Some(candidate) => candidate.1 += count,
                None => candidates.push((mov, *count)),
            }
        }

        if candidates.is_empty() {
            debug!("book miss: no legal book move at {}", key);
            return None;
        }

        let chosen = choose(&candidates, randomness, rng);
        if let Some(mov) = chosen {
            debug!("book move {} at {}", mov, key);
        }
        chosen
    }
}

/// The probability of drawing each of `counts` at the given randomness:
/// `(1 - r) * count / total + r / n`. When every count is zero the frequency
/// share is uniform as well.
pub fn selection_weights(counts: &[u64], randomness: f64) -> Vec<f64> {
    let randomness = clamp_randomness(randomness);
    let n = counts.len() as f64;
    let total: u64 = counts.iter().sum();
    counts
        .iter()
        .map(|&count| {
            let frequency = if total == 0 {
                1.0 / n
            } else {
                count as f64 / total as f64
            };
            (1.0 - randomness) * frequency + randomness / n
        })
        .collect()
}

fn clamp_randomness(randomness: f64) -> f64 {
    if randomness.is_nan() {
        0.0
    } else {
        randomness.max(0.0).min(1.0)
    }
}

fn choose<R: Rng + ?Sized>(candidates: &[(Move, u64)], randomness: f64, rng: &mut R) -> Option<Move> {
    if clamp_randomness(randomness) == 0.0 {
        let mut best = candidates.first()?;
        for candidate in candidates.iter().skip(1) {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }

        return Some(best.0);
    }

    let counts: Vec<u64> = candidates.iter().map(|&(_, count)| count).collect();
    let weights = selection_weights(&counts, randomness);
    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(candidates[dist.sample(rng)].0),
        Err(err) => {
            warn!("bad book weights {:?}: {}", weights, err);
            None
        }
    }
}

//
// Deserialization
//
// Both levels of the document are read with hand-written visitors so that the
// moves keep their document order and colliding keys are merged as they are
// read.
//

impl<'de> Deserialize<'de> for OpeningBook {
    fn deserialize<D>(deserializer: D) -> Result<OpeningBook, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BookVisitor)
    }
}

struct BookVisitor;

impl<'de> Visitor<'de> for BookVisitor {
    type Value = OpeningBook;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from positions to move counts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<OpeningBook, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut book = OpeningBook::new();
        while let Some(key) = access.next_key::<String>()? {
            let MoveCounts(counts) = access.next_value()?;
            for (mov, count) in counts {
                book.add(&key, &mov, count);
            }
        }

        Ok(book)
    }
}

struct MoveCounts(Vec<(String, u64)>);

impl<'de> Deserialize<'de> for MoveCounts {
    fn deserialize<D>(deserializer: D) -> Result<MoveCounts, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MoveCountsVisitor)
    }
}

struct MoveCountsVisitor;

impl<'de> Visitor<'de> for MoveCountsVisitor {
    type Value = MoveCounts;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from moves to non-negative counts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<MoveCounts, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut counts = Vec::new();
        while let Some((mov, count)) = access.next_entry::<String, u64>()? {
            counts.push((mov, count));
        }

        Ok(MoveCounts(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::{selection_weights, BookError, OpeningBook};
    use crate::board::Board;
    use crate::fen;
    use crate::types::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn load_keeps_document_order() {
        let book = OpeningBook::from_json_str(&format!(
            r#"{{ "{}": {{ "g1f3": 3, "e2e4": 9, "d2d4": 9 }} }}"#,
            START
        ))
        .unwrap();
        let moves: Vec<&str> = book
            .candidates(START)
            .unwrap()
            .iter()
            .map(|(m, _)| m.as_str())
            .collect();
        assert_eq!(vec!["g1f3", "e2e4", "d2d4"], moves);
    }

    #[test]
    fn colliding_keys_merge() {
        let book = OpeningBook::from_json_str(
            r#"{
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1": { "e2e4": 2, "d2d4": 1 },
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1": { "c2c4": 4, "e2e4": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(1, book.len());
        assert_eq!(
            &[
                ("e2e4".to_owned(), 7),
                ("d2d4".to_owned(), 1),
                ("c2c4".to_owned(), 4)
            ][..],
            book.candidates(START).unwrap()
        );
    }

    #[test]
    fn greedy_takes_most_played_then_first_seen() {
        let mut book = OpeningBook::new();
        book.add(START, "d2d4", 5);
        book.add(START, "e2e4", 9);
        book.add(START, "c2c4", 9);
        for _ in 0..10 {
            let mov = book.book_move(&Board::new(), Color::White, 0.0, &mut rng());
            assert_eq!("e2e4", mov.unwrap().as_uci());
        }
    }

    #[test]
    fn illegal_and_malformed_entries_are_skipped() {
        let mut book = OpeningBook::new();
        book.add(START, "e2e5", 100);
        book.add(START, "castle", 50);
        book.add(START, "b1c3", 1);
        let mov = book.book_move(&Board::new(), Color::White, 0.0, &mut rng());
        assert_eq!("b1c3", mov.unwrap().as_uci());

        let mut book = OpeningBook::new();
        book.add(START, "e2e5", 100);
        assert_eq!(None, book.book_move(&Board::new(), Color::White, 0.0, &mut rng()));
    }

    #[test]
    fn unseen_position_misses() {
        let mut book = OpeningBook::new();
        book.add(START, "e2e4", 1);
        assert_eq!(None, book.book_move(&Board::new(), Color::Black, 0.0, &mut rng()));
        assert_eq!(None, OpeningBook::new().book_move(&Board::new(), Color::White, 1.0, &mut rng()));
    }

    #[test]
    fn random_draws_stay_in_the_book() {
        let (board, color) = fen::decode(START).unwrap();
        let mut book = OpeningBook::new();
        book.add(START, "e2e4", 1);
        book.add(START, "d2d4", 0);
        let mut rng = rng();
        for _ in 0..50 {
            let mov = book.book_move(&board, color, 0.5, &mut rng).unwrap().as_uci();
            assert!(mov == "e2e4" || mov == "d2d4");
        }
    }

    #[test]
    fn weights_blend_frequency_and_uniform() {
        assert_eq!(vec![0.75, 0.25], selection_weights(&[3, 1], 0.0));
        assert_eq!(vec![0.5, 0.5], selection_weights(&[3, 1], 1.0));
        assert_eq!(vec![0.5, 0.5], selection_weights(&[3, 1], 7.0));
        assert_eq!(vec![0.625, 0.375], selection_weights(&[3, 1], 0.5));
        assert_eq!(vec![0.5, 0.5], selection_weights(&[0, 0], 0.3));
    }

    #[test]
    fn load_errors() {
        match OpeningBook::from_json_str("{ \"a\": [1, 2] }") {
            Err(BookError::Json(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match OpeningBook::load("/nonexistent/pawnstorm/book.json") {
            Err(BookError::Io(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
