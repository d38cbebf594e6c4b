//! Shuttle Ledger CLI
//!
//! Command-line tool replaying game-event feeds into the points and
//! inventory ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- events.csv > leaderboard.csv
//! cargo run -- --strategy sync events.csv > leaderboard.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 events.csv > leaderboard.csv
//! ```
//!
//! The program reads ledger events (registrations, game results, purchases,
//! equips) from the input CSV feed, settles them through the ledger engine
//! using the selected replay strategy, and writes the final leaderboard to
//! stdout.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, output failure, etc.)

use shuttle_ledger::cli;
use shuttle_ledger::strategy;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
