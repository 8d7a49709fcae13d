//! Clear command for discarding the saved session.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::session;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    if session::clear(&config.session_path)? {
        writeln!(writer, "Cleared saved session.")?;
    } else {
        writeln!(writer, "No saved session.")?;
    }
    Ok(())
}
