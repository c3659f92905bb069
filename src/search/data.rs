// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Write;
use std::sync::Mutex;

use csv::Writer;

use crate::board::Board;
use crate::fen;
use crate::types::Color;

/// One completed root search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub strategy: String,
    pub depth: u32,
    pub nodes: u64,
    pub score: f64,
    pub best_move: String,
}

pub trait DataRecorder {
    fn record(&self, board: &Board, color: Color, rec: &Record);
}

/// Writes records as CSV rows, flushing after each one.
pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Option<W> {
        let writer = self.writer.into_inner().ok()?;
        writer.into_inner().ok()
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, board: &Board, color: Color, rec: &Record) {
        let mut copy = rec.clone();
        copy.fen = fen::encode(board, color);
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(_) => {
                warn!("search data writer is poisoned, dropping record");
                return;
            }
        };

        if let Err(err) = writer.serialize(&copy) {
            warn!("failed to record search data: {}", err);
            return;
        }

        if let Err(err) = writer.flush() {
            warn!("failed to flush search data: {}", err);
        }
    }
}
