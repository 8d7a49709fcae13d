//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::example::ExampleArgs;
use crate::commands::save::SaveArgs;
use crate::commands::sum::SumArgs;
use crate::commands::watch::WatchArgs;

/// Time interval calculator.
///
/// Adds up lines such as "5:00 - 8:05am", "-2:00 - 3:00pm" (subtracted) and
/// "9:45 -" (still running) and reports how far the total is from a target.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Total the intervals once and compare against the target.
    Sum(SumArgs),

    /// Recalculate on a timer and announce when the target is reached.
    Watch(WatchArgs),

    /// Store the input and target as the session.
    Save(SaveArgs),

    /// Print the saved session.
    Show,

    /// Discard the saved session.
    Clear,

    /// Print sample input.
    Example(ExampleArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_line_after_separator() {
        let cli = Cli::parse_from(["tally", "sum", "--target", "0", "--", "-2:00 - 3:00pm"]);
        let Some(Commands::Sum(args)) = cli.command else {
            panic!("expected sum command");
        };
        assert_eq!(args.input.lines, ["-2:00 - 3:00pm"]);
        assert_eq!(args.input.target.unwrap().minutes(), 0);
    }

    #[test]
    fn test_at_and_file_flags() {
        let cli = Cli::parse_from([
            "tally", "watch", "--file", "-", "--at", "10:15am", "--ticks", "1",
        ]);
        let Some(Commands::Watch(args)) = cli.command else {
            panic!("expected watch command");
        };
        assert_eq!(args.input.at.unwrap().to_string(), "10:15");
        assert_eq!(args.ticks, Some(1));
    }

    #[test]
    fn test_invalid_target_is_a_usage_error() {
        let err = Cli::try_parse_from(["tally", "sum", "--target", "lots", "9 - 10"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_oversized_target_is_a_usage_error() {
        let err = Cli::try_parse_from(["tally", "sum", "--target", "1e300", "9 - 10"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
