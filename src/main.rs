// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod parser;

mod utils;

use anyhow::Error;
use clap::{App, Arg};
use config::Config;
use controller::{Controller, SearchBy, SessionRatings, ToTable};
use engine::Engine;
use movie_lens::MovieLensController;
use parser::Statement;
use simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

macro_rules! prompt {
    ($ed:ident) => {{
        use rustyline::error::ReadlineError;

        match $ed.readline(PROMPT) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

const MAX_SESSION_MOVIES: usize = 10;
const DEFAULT_RECOMMENDATIONS: usize = 5;

const SCORE_MIN: f64 = 1.0;
const SCORE_MAX: f64 = 5.0;
const SCORE_STEP: f64 = 0.5;

fn print_help() {
    println!("Movie recommendation help:");
    println!("h | help             Shows this help");
    println!("v | version          Show the current version");
    println!("q | quit             Quit");
    println!("ratings              Show the ratings gathered this session");
    println!("reset                Drop every session rating");
    println!("recommend            Shortcut for recommend({})", DEFAULT_RECOMMENDATIONS);
    println!();
    println!("movie(id(318))       Look up a movie by id");
    println!("movie(name(heat))    Look up movies by title (substring)");
    println!("rate(318, 4.5)       Rate a movie for this session");
    println!("unrate(318)          Drop the session rating(s) for a movie");
    println!("recommend(5)         Fit the model and show the top 5 picks");
}

fn rate_movie(
    controller: &MovieLensController,
    session: &mut SessionRatings<i32>,
    movie_id: i32,
    score: f64,
) {
    if let Err(e) = utils::validate_score(score) {
        log::error!("{}", e);
        return;
    }

    let movie = match controller.items_by(&SearchBy::id(&movie_id.to_string())) {
        Ok(mut movies) => movies.remove(0),
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    if session.contains(&movie_id) {
        log::warn!(
            "Movie id({}) was already rated this session, keeping both rows",
            movie_id
        );
    } else if session.distinct_count() >= MAX_SESSION_MOVIES {
        println!("You can rate at most {} movies per session", MAX_SESSION_MOVIES);
        return;
    }

    session.rate(movie_id, score);
    println!("Rated '{}' with {:.1}", movie.title, score);
}

fn run_recommendation(
    engine: &Engine<'_, MovieLensController>,
    session: &SessionRatings<i32>,
    count: usize,
) {
    if session.is_empty() {
        log::warn!("No session ratings yet, this will be a pure cold-start recommendation");
    }

    match engine.recommend(session, count) {
        Ok(outcome) => {
            match outcome.rmse {
                Some(rmse) => println!("Root-mean-square error = {:.2}", rmse),
                None => println!("Root-mean-square error is undefined (empty test subset)"),
            }

            if outcome.items.is_empty() {
                println!("Nothing left to recommend");
            } else {
                println!("Top {} recommendations for you:", outcome.items.len());
                println!("{}", utils::recommendations_table(&outcome.items));
            }
        }

        Err(e) => println!("{}", e),
    }
}

fn session_prompt(controller: &MovieLensController, config: &Config) -> Result<(), Error> {
    let engine = Engine::with_config(controller, config.engine.clone());
    let mut session = SessionRatings::new();
    let mut rl = rustyline::Editor::<()>::new();

    println!("Rate up to {} movies, then ask for recommendations", MAX_SESSION_MOVIES);

    loop {
        let line: String = prompt!(rl)?;

        match line.trim() {
            "?" | "h" | "help" => print_help(),

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            "ratings" => {
                if session.is_empty() {
                    println!("No ratings this session yet");
                } else {
                    println!("{}", utils::session_table(controller, &session));
                }
            }

            "reset" => {
                session = SessionRatings::new();
                println!("Session ratings cleared");
            }

            "recommend" => run_recommendation(&engine, &session, DEFAULT_RECOMMENDATIONS),

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(Statement::QueryMovie(searchby)) => match controller.items_by(&searchby) {
                    Ok(movies) => {
                        for movie in movies {
                            println!("{}", movie.to_table());
                        }
                    }
                    Err(e) => println!("{}", e),
                },

                Some(Statement::Rate(movie_id, score)) => {
                    rate_movie(controller, &mut session, movie_id, score)
                }

                Some(Statement::Unrate(movie_id)) => {
                    let removed = session.retract(&movie_id);
                    if removed == 0 {
                        println!("No session rating for id({})", movie_id);
                    } else {
                        println!("Removed {} rating(s) for id({})", removed, movie_id);
                    }
                }

                Some(Statement::Recommend(count)) => {
                    run_recommendation(&engine, &session, count)
                }

                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    let matches = App::new("movie-recommender")
        .version(VERSION)
        .about("ALS movie recommendations for a brand-new user")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::with_name("data")
                .short("d")
                .long("data")
                .takes_value(true)
                .help("Directory holding movies.csv and ratings.csv"),
        )
        .get_matches();

    TermLogger::init(LevelFilter::Info, LogConfig::default(), TerminalMode::Mixed)?;

    let mut config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dir) = matches.value_of("data") {
        config.data.dir = dir.into();
    }

    println!("Welcome to movie-recommender {}", VERSION);
    log::info!("Loading MovieLens data from {}", config.data.dir.display());

    let controller = MovieLensController::with_dir(&config.data.dir)?;
    session_prompt(&controller, &config)
}
