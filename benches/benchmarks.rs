// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use criterion::black_box;
use criterion::Criterion;
use pawnstorm::eval::{BoardEvaluator, PositionalEvaluator};
use pawnstorm::fen;
use pawnstorm::search::{AlphaBetaSearcher, MinimaxSearcher, Searcher};
use pawnstorm::{perft, Board, Color, MoveGenerator, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("board clone", |b| {
        let board = Board::new();
        b.iter(|| black_box(&board).clone())
    });

    c.bench_function("is attacked e4 kiwipete", |b| {
        let (board, _) = fen::decode(KIWIPETE).unwrap();
        let square = Square::parse("e4").unwrap();
        let gen = MoveGenerator::new();
        b.iter(|| gen.is_attacked(black_box(&board), square, Color::Black))
    });

    c.bench_function("legal moves start", |b| {
        let board = Board::new();
        b.iter(|| black_box(&board).legal_moves(Color::White))
    });

    c.bench_function("legal moves kiwipete", |b| {
        let (board, color) = fen::decode(KIWIPETE).unwrap();
        b.iter(|| black_box(&board).legal_moves(color))
    });

    c.bench_function("positional eval start", |b| {
        let board = Board::new();
        let evaluator = PositionalEvaluator::new();
        b.iter(|| evaluator.evaluate(black_box(&board)))
    });

    c.bench_function("perft 3 start", |b| {
        let board = Board::new();
        b.iter(|| perft(black_box(&board), Color::White, 3))
    });

    c.bench_function("minimax depth 2 start", |b| {
        let board = Board::new();
        b.iter(|| MinimaxSearcher::<PositionalEvaluator>::new().search(black_box(&board), Color::White, 2))
    });

    c.bench_function("alphabeta depth 2 start", |b| {
        let board = Board::new();
        b.iter(|| AlphaBetaSearcher::<PositionalEvaluator>::new().search(black_box(&board), Color::White, 2))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
