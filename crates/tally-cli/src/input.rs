//! Where interval lines, the target and the current instant come from.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Args;
use tally_core::{ClockTime, TargetHours};

use crate::Config;
use crate::session;

/// Input options shared by `sum`, `watch` and `save`.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Interval lines such as "5:00 - 8:05am". Put them after `--` when a
    /// line starts with a hyphen.
    #[arg(value_name = "LINE")]
    pub lines: Vec<String>,

    /// Read lines from a file, or `-` for stdin.
    #[arg(short, long, value_name = "PATH", conflicts_with = "lines")]
    pub file: Option<PathBuf>,

    /// Target hours, overriding the saved session and the config.
    #[arg(short, long, value_name = "HOURS")]
    pub target: Option<TargetHours>,

    /// Use this as the current time (HH:MM or H:MM am/pm) instead of the clock.
    #[arg(long, value_name = "TIME")]
    pub at: Option<ClockTime>,
}

/// Origin of the interval lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Lines(Vec<String>),
    File(PathBuf),
    Stdin,
    /// The saved session's text, used when nothing else is given.
    Session,
}

/// Everything the engine needs apart from the current instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub lines: Vec<String>,
    pub target: TargetHours,
    /// False only when the lines came from a session with auto-update off.
    pub auto_update: bool,
}

impl InputArgs {
    pub fn source(&self) -> InputSource {
        match &self.file {
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(path.clone()),
            None if self.lines.is_empty() => InputSource::Session,
            None => InputSource::Lines(self.lines.clone()),
        }
    }

    /// The `--at` override, or the local wall-clock time.
    pub fn now(&self) -> ClockTime {
        self.at.unwrap_or_else(local_now)
    }

    pub fn load(&self, config: &Config) -> Result<Inputs> {
        load_inputs(&self.source(), self.target, config)
    }
}

pub fn local_now() -> ClockTime {
    Local::now().time().into()
}

/// Reads the lines from `source` and settles on a target.
///
/// Target precedence: explicit flag, then the saved session, then config.
/// The session file is only read when one of those needs it.
pub fn load_inputs(
    source: &InputSource,
    target: Option<TargetHours>,
    config: &Config,
) -> Result<Inputs> {
    let needs_session = *source == InputSource::Session || target.is_none();
    let saved = if needs_session {
        session::load(&config.session_path)?
    } else {
        None
    };

    let lines = match source {
        InputSource::Lines(lines) => lines.clone(),
        InputSource::File(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            split_lines(&content)
        }
        InputSource::Stdin => read_stdin()?,
        InputSource::Session => match &saved {
            Some(session) => session.lines().map(str::to_string).collect(),
            None => bail!(
                "no input given and no saved session; pass lines, --file, or run `tally save`"
            ),
        },
    };

    let auto_update = match (source, &saved) {
        (InputSource::Session, Some(session)) => session.auto_update,
        _ => true,
    };

    let target = target
        .or_else(|| saved.as_ref().and_then(|s| s.target_hours))
        .unwrap_or(config.target_hours);

    Ok(Inputs {
        lines,
        target,
        auto_update,
    })
}

pub fn read_stdin() -> Result<Vec<String>> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read stdin")?;
    Ok(split_lines(&content))
}

fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
