//! Command-line entry point over `detect_core`: loads an indicator file,
//! replays a token stream, and prints hits or a compiled DFA's internals.
//!
//! Performs no algorithmic work of its own — a loader, a token-feed loop,
//! and a pretty-printer over the library.

mod token_file;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use detect_core::{dump, Collection, LoadError, Navigator, Token};
use thiserror::Error;

use token_file::TokenFileError;

#[derive(Debug, Parser)]
#[command(name = "detect_cli", about = "Compiles and runs compound-event indicators")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile an indicator file and replay a token stream against it.
    Scan {
        /// Path to the indicators JSON document.
        #[arg(long)]
        indicators: PathBuf,
        /// Path to a token file (JSON array or tab-delimited lines). Reads
        /// stdin if omitted.
        #[arg(long)]
        tokens: Option<PathBuf>,
    },
    /// Print one indicator's term tree, navigator and compiled FSM.
    Dump {
        /// Path to the indicators JSON document.
        #[arg(long)]
        indicators: PathBuf,
        /// The id of the indicator to dump.
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    TokenFile(#[from] TokenFileError),
    #[error("no indicator with id {0:?}")]
    UnknownIndicator(String),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("detect_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Scan { indicators, tokens } => scan(&indicators, tokens.as_deref()),
        Command::Dump { indicators, id } => dump_indicator(&indicators, &id),
    }
}

fn scan(indicators_path: &std::path::Path, tokens_path: Option<&std::path::Path>) -> Result<(), CliError> {
    let indicators = detect_core::load_indicators_file(indicators_path)?;
    let mut collection = Collection::compile(indicators);

    let mut fed = token_file::read_tokens(tokens_path)?;
    if fed.last().is_none_or(|t| !t.is_end()) {
        fed.push(Token::end());
    }

    for token in &fed {
        collection.update(token);
    }

    let mut hits: Vec<&str> = collection.get_hits().iter().map(|i| i.id.as_str()).collect();
    hits.sort_unstable();
    if hits.is_empty() {
        println!("no hits");
    } else {
        for id in hits {
            println!("{id}");
        }
    }
    Ok(())
}

fn dump_indicator(indicators_path: &std::path::Path, id: &str) -> Result<(), CliError> {
    let indicators = detect_core::load_indicators_file(indicators_path)?;
    let indicator = indicators
        .get(id)
        .ok_or_else(|| CliError::UnknownIndicator(id.to_string()))?;

    let nav = Navigator::build(&indicator.term);

    println!("== term tree ==");
    println!("{}", dump::dump_term(&indicator.term));

    println!("== navigator ==");
    println!("{}", dump::dump_navigator(&nav));

    println!("== compiled fsm ==");
    match detect_core::dfa::compile(&nav) {
        Some(compiled) => println!("{}", dump::dump_dfa(&compiled)),
        None => println!("(degenerate: no reachable hit state)"),
    }

    Ok(())
}
