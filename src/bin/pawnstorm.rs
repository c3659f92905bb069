// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::fs::File;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use pawnstorm::eval::PositionalEvaluator;
use pawnstorm::fen;
use pawnstorm::search::{AlphaBetaSearcher, CsvDataRecorder, Searcher};
use pawnstorm::{perft, Board, Bot, BotConfig, Color, OpeningBook};

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(true)
        .index(1)
}

fn depth_arg() -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("d")
        .long("depth")
        .default_value("3")
        .takes_value(true)
}

fn book_arg() -> Arg<'static, 'static> {
    Arg::with_name("book")
        .help("Opening book to consult")
        .value_name("FILE")
        .long("book")
        .default_value("book.json")
        .takes_value(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg()),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Select a move with one of the bot strategies")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("strategy")
                        .help("random, minimax, alphabeta or book")
                        .value_name("STRATEGY")
                        .short("s")
                        .long("strategy")
                        .default_value("book")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("randomness")
                        .help("Randomness of book move selection, from 0 to 1")
                        .value_name("R")
                        .short("r")
                        .long("randomness")
                        .default_value("0")
                        .takes_value(true),
                )
                .arg(book_arg()),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Evaluate a board position")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("data")
                        .help("CSV file to append search records to")
                        .value_name("FILE")
                        .long("data")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Print the normalized encoding of a board position")
                .arg(fen_arg()),
        )
        .subcommand(
            SubCommand::with_name("book")
                .about("List the opening book entries for a board position")
                .arg(fen_arg())
                .arg(book_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("search", Some(matches)) => run_search(matches),
        ("evaluate", Some(matches)) => run_evaluate(matches),
        ("encode", Some(matches)) => run_encode(matches),
        ("book", Some(matches)) => run_book(matches),
        _ => unreachable!(),
    }
}

fn parse_position(matches: &ArgMatches) -> (Board, Color) {
    let text = matches.value_of("FEN").unwrap();
    match fen::decode(text) {
        Ok(position) => position,
        Err(err) => {
            println!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn load_book(matches: &ArgMatches) -> Option<OpeningBook> {
    let path = matches.value_of("book").unwrap();
    match OpeningBook::load(path) {
        Ok(book) => Some(book),
        Err(err) => {
            warn!("running without an opening book: {}", err);
            None
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let (board, color) = parse_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    println!("fen:   {}", matches.value_of("FEN").unwrap());
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&board, color, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_search(matches: &ArgMatches) -> ! {
    let (board, color) = parse_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    let randomness = value_t_or_exit!(matches, "randomness", f64);
    let strategy = matches.value_of("strategy").unwrap();
    let config = BotConfig {
        book_randomness: randomness,
        ..BotConfig::default()
    };

    let mut bot = Bot::new(load_book(matches).map(Arc::new), config);
    let start = Instant::now();
    let result = bot.select_move(&board, color, strategy, depth);
    let duration = start.elapsed();
    match result {
        Some(mov) => {
            println!("{}", mov);
            info!("{} took {} ms", strategy, duration.as_millis());
            process::exit(0);
        }
        None => {
            println!("no move");
            process::exit(1);
        }
    }
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let (board, color) = parse_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    println!("fen:   {}", matches.value_of("FEN").unwrap());
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    println!();

    let mut searcher = match matches.value_of("data") {
        Some(path) => {
            let file = File::create(path).unwrap_or_else(|err| {
                println!("failed to create {}: {}", path, err);
                process::exit(1);
            });
            AlphaBetaSearcher::<PositionalEvaluator>::with_recorder(Box::new(
                CsvDataRecorder::new(file),
            ))
        }
        None => AlphaBetaSearcher::<PositionalEvaluator>::new(),
    };

    let result = searcher.search(&board, color, depth);
    match result.best_move {
        Some(mov) => println!("best move: {}", mov),
        None => println!("best move: none"),
    }
    println!("    score: {}", result.score);
    println!("    nodes: {}", result.nodes_searched);
    process::exit(0);
}

fn run_encode(matches: &ArgMatches) -> ! {
    let (board, color) = parse_position(matches);
    println!("{}", fen::encode(&board, color));
    process::exit(0);
}

fn run_book(matches: &ArgMatches) -> ! {
    let (board, color) = parse_position(matches);
    let key = fen::encode(&board, color);
    let book = match load_book(matches) {
        Some(book) => book,
        None => {
            println!("no opening book");
            process::exit(1);
        }
    };

    println!("key: {}", key);
    match book.candidates(&key) {
        Some(entries) => {
            for (mov, count) in entries {
                let legal = board.move_from_uci(mov, color).is_some();
                println!("{:>6} {:>8}{}", mov, count, if legal { "" } else { " (illegal)" });
            }
        }
        None => println!("not in book"),
    }
    process::exit(0);
}
