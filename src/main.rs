mod args;
mod draw;

use std::error::Error;

use clap::Parser;
use log::{debug, warn, LevelFilter};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    match draw::run_raffle(&args) {
        Ok(outcome) if outcome.errors.is_empty() => {}
        Ok(outcome) => {
            warn!("Draw refused: {} error(s)", outcome.errors.len());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("An error occured: {}", e);
            let mut cause = e.source();
            while let Some(c) = cause {
                eprintln!("  caused by: {}", c);
                cause = c.source();
            }
            std::process::exit(2);
        }
    }
}
