//! Sum command: total the intervals once and compare against the target.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tally_core::{AggregateResult, LineContribution, LineStatus, breakdown, summarize};

use crate::Config;
use crate::input::InputArgs;
use crate::session::{self, Session};

#[derive(Debug, Args)]
pub struct SumArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// List what each line contributed.
    #[arg(long)]
    pub breakdown: bool,

    /// Save the input and target as the session.
    #[arg(long)]
    pub save: bool,
}

/// JSON output: the aggregate plus, optionally, the per-line breakdown.
#[derive(Debug, Serialize)]
struct SumReport<'a> {
    #[serde(flatten)]
    result: &'a AggregateResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<&'a [LineContribution]>,
}

pub fn run<W: Write>(writer: &mut W, args: &SumArgs, config: &Config) -> Result<()> {
    let inputs = args.input.load(config)?;
    let now = args.input.now();
    tracing::debug!(lines = inputs.lines.len(), target = %inputs.target, %now, "summing intervals");

    let result = summarize(&inputs.lines, inputs.target, now);
    let lines = args.breakdown.then(|| breakdown(&inputs.lines, now));

    if args.json {
        let report = SumReport {
            result: &result,
            lines: lines.as_deref(),
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize result")?;
        writeln!(writer, "{json}")?;
    } else {
        write!(writer, "{}", format_result(&result, lines.as_deref()))?;
    }

    if args.save {
        let mut saved = Session::new(inputs.lines.join("\n"), Some(inputs.target));
        saved.auto_update = session::auto_update(&config.session_path)?;
        session::save(&config.session_path, &saved)?;
    }

    Ok(())
}

/// Renders the human-readable result.
pub fn format_result(result: &AggregateResult, lines: Option<&[LineContribution]>) -> String {
    let mut output = String::new();

    if let Some(lines) = lines {
        for line in lines {
            let label = match line.status {
                LineStatus::Blank => continue,
                LineStatus::Skipped => "skipped".to_string(),
                LineStatus::Counted { minutes, .. } => format_signed_clock(minutes),
            };
            writeln!(output, "{label:>8}  {}", line.text.trim()).unwrap();
        }
        output.push('\n');
    }

    writeln!(output, "Total: {}", result.total_display).unwrap();
    writeln!(output, "{}", result.remaining_display).unwrap();
    output
}

/// Formats signed minutes as `+H:MM` / `-H:MM`.
fn format_signed_clock(minutes: i64) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("{sign}{}:{:02}", abs / 60, abs % 60)
}
