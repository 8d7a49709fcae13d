//! Show command for printing the saved session.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::session::{self, Session};

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    match session::load(&config.session_path)? {
        Some(saved) => write!(writer, "{}", format_session(&saved))?,
        None => writeln!(writer, "No saved session.")?,
    }
    Ok(())
}

fn format_session(saved: &Session) -> String {
    let mut output = String::new();

    writeln!(output, "Saved at: {}", saved.saved_at.format("%Y-%m-%d %H:%M:%S UTC")).unwrap();
    match saved.target_hours {
        Some(target) => writeln!(output, "Target: {target} hours").unwrap(),
        None => writeln!(output, "Target: (config default)").unwrap(),
    }
    let auto_update = if saved.auto_update { "on" } else { "off" };
    writeln!(output, "Auto-update: {auto_update}").unwrap();
    writeln!(output).unwrap();

    for line in saved.lines() {
        writeln!(output, "{line}").unwrap();
    }
    output
}
