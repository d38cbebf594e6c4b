use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay game-event feeds into the points and inventory ledger
#[derive(Parser, Debug)]
#[command(name = "shuttle-ledger")]
#[command(about = "Replay game-event feeds into the points and inventory ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger events
    #[arg(value_name = "INPUT", help = "Path to the input CSV event feed")]
    pub input_file: PathBuf,

    /// Replay strategy to use for processing events
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Replay strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of events per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of events per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent batches (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of batches processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available replay strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses the CLI arguments if provided, otherwise defaults. Zero values
    /// are replaced with defaults by `BatchConfig::new`, with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "events.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "events.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "events.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[rstest]
    #[case::batch_size(&["program", "--batch-size", "2000", "events.csv"], Some(2000), None)]
    #[case::max_concurrent(&["program", "--max-concurrent", "8", "events.csv"], None, Some(8))]
    #[case::no_options(&["program", "events.csv"], None, None)]
    #[case::all_options(
        &["program", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "events.csv"],
        Some(2000),
        Some(8)
    )]
    fn test_config_options(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] max_concurrent: Option<usize>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.max_concurrent_batches, max_concurrent);
    }

    #[rstest]
    #[case::all_defaults(&["program", "events.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "events.csv"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "events.csv"], 1000, 8)]
    #[case::all_custom(
        &["program", "--batch-size", "2000", "--max-concurrent", "8", "events.csv"],
        2000,
        8
    )]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "events.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
