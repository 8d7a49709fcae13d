//! Example command: a day's worth of sample input.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::session::{self, Session};

/// Sample lines covering a plain range, a negative range, mixed meridiems
/// and an open-ended range.
pub const EXAMPLE_LINES: [&str; 6] = [
    "5:00 \u{2013} 8:05am",
    "10:15 \u{2013} 11:00am",
    "-7:00 \u{2013} 8:06am",
    "8:20 \u{2013} 9:40am",
    "7:00am \u{2013} 2:30pm",
    "9:45 \u{2013}",
];

#[derive(Debug, Args)]
pub struct ExampleArgs {
    /// Replace the saved session with the example.
    #[arg(long)]
    pub save: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ExampleArgs, config: &Config) -> Result<()> {
    for line in EXAMPLE_LINES {
        writeln!(writer, "{line}")?;
    }

    if args.save {
        session::save(&config.session_path, &Session::new(EXAMPLE_LINES.join("\n"), None))?;
        tracing::info!(path = %config.session_path.display(), "example saved as session");
    }
    Ok(())
}
