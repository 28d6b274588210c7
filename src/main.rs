use std::{fs::File, io::{self, BufReader}, path::PathBuf};

use clap::Parser;
use kaleido::driver::driver::Driver;
use tracing_subscriber::filter::LevelFilter;

/// An interactive interpreter for a small expression language.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Source file to interpret; reads from stdin when omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let max_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .compact()
        .init();

    match args.file {
        Some(path) => {
            let file = File::open(&path).expect("Failed to read file!");
            Driver::new(BufReader::new(file)).run();
        }
        None => {
            Driver::new(io::stdin().lock()).run();
        }
    }
}
