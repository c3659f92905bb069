// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Times move selection for every bot strategy on the starting position and on
//! positions reached by seeded random play, and writes a CSV summary.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate serde_derive;

use std::fs::File;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::{App, Arg};
use csv::Writer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use pawnstorm::bot::STRATEGIES;
use pawnstorm::{Bot, BotConfig, Game, OpeningBook, Strategy};

#[derive(Serialize)]
struct Summary {
    position_index: usize,
    bot: String,
    iterations: usize,
    mean_s: f64,
    median_s: f64,
    stdev_s: f64,
    min_s: f64,
    max_s: f64,
}

fn main() {
    env_logger::init();
    let matches = App::new("pawnstorm-bench")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Move selection benchmarks for pawnstorm's bots")
        .arg(
            Arg::with_name("iterations")
                .help("Timed selections per bot per position")
                .long("iterations")
                .short("n")
                .default_value("10")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("positions")
                .help("Number of positions, including the starting position")
                .long("positions")
                .short("p")
                .default_value("5")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("plies")
                .help("Random plies played to reach each extra position")
                .long("plies")
                .default_value("8")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("depth")
                .help("Search depth for the searching bots")
                .long("depth")
                .short("d")
                .default_value("2")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .help("Seed for position generation and the bots")
                .long("seed")
                .default_value("0")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("book")
                .help("Opening book for the book bot")
                .long("book")
                .default_value("book.json")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the CSV summary")
                .long("output")
                .short("o")
                .default_value("bench_results.csv")
                .takes_value(true),
        )
        .get_matches();

    let iterations = value_t_or_exit!(matches, "iterations", usize);
    let positions = value_t_or_exit!(matches, "positions", usize);
    let plies = value_t_or_exit!(matches, "plies", usize);
    let depth = value_t_or_exit!(matches, "depth", u32);
    let seed = value_t_or_exit!(matches, "seed", u64);
    let output = matches.value_of("output").unwrap();
    let book = match OpeningBook::load(matches.value_of("book").unwrap()) {
        Ok(book) => Some(Arc::new(book)),
        Err(err) => {
            println!("running without an opening book: {}", err);
            None
        }
    };

    let games = generate_positions(positions, plies, seed);
    let mut bot = Bot::with_rng(book, BotConfig::default(), StdRng::seed_from_u64(seed));
    let mut rows = vec![];
    println!(
        "benchmarking bots on {} positions with {} iterations each",
        games.len(),
        iterations
    );
    for (index, game) in games.iter().enumerate() {
        println!("position {}/{}: {}", index + 1, games.len(), game.as_fen());
        for &strategy in &STRATEGIES {
            let times = time_strategy(&mut bot, game, strategy, depth, iterations);
            let row = summarize(index, strategy, &times);
            println!(
                "  {:>10} -> mean {:.4}s median {:.4}s max {:.4}s",
                strategy, row.mean_s, row.median_s, row.max_s
            );
            rows.push(row);
        }
    }

    if let Err(err) = write_rows(output, &rows) {
        println!("failed to write {}: {}", output, err);
        process::exit(1);
    }
    println!("saved results to {}", output);
}

fn generate_positions(count: usize, plies: usize, seed: u64) -> Vec<Game> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut games = vec![Game::new()];
    for _ in 1..count {
        let mut game = Game::new();
        for _ in 0..plies {
            let mov = match game.legal_moves().choose(&mut rng) {
                Some(&mov) => mov,
                None => break,
            };

            if game.play(mov).is_err() {
                break;
            }
        }
        games.push(game);
    }

    games
}

fn time_strategy(
    bot: &mut Bot<StdRng>,
    game: &Game,
    strategy: Strategy,
    depth: u32,
    iterations: usize,
) -> Vec<f64> {
    (0..iterations)
        .map(|_| {
            let start = Instant::now();
            let _ = bot.select(game.board(), game.next_player(), strategy, depth);
            start.elapsed().as_secs_f64()
        })
        .collect()
}

fn summarize(position_index: usize, strategy: Strategy, times: &[f64]) -> Summary {
    let count = times.len();
    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mean = if count == 0 {
        0.0
    } else {
        sorted.iter().sum::<f64>() / count as f64
    };
    let median = match count {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    };
    let stdev = if count > 1 {
        let variance = sorted.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    Summary {
        position_index,
        bot: strategy.name().to_owned(),
        iterations: count,
        mean_s: mean,
        median_s: median,
        stdev_s: stdev,
        min_s: sorted.first().copied().unwrap_or(0.0),
        max_s: sorted.last().copied().unwrap_or(0.0),
    }
}

fn write_rows(path: &str, rows: &[Summary]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(File::create(path)?);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
