use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_cli::commands::{clear, example, save, show, sum, watch};
use tally_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Sum(args)) => sum::run(&mut stdout, args, &config)?,
        Some(Commands::Watch(args)) => watch::run(&mut stdout, args, &config)?,
        Some(Commands::Save(args)) => save::run(&mut stdout, args, &config)?,
        Some(Commands::Show) => show::run(&mut stdout, &config)?,
        Some(Commands::Clear) => clear::run(&mut stdout, &config)?,
        Some(Commands::Example(args)) => example::run(&mut stdout, args, &config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
