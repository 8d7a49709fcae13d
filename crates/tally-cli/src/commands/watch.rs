//! Watch command: recompute on a timer so open-ended ranges keep counting.
//!
//! The input source is re-read on every tick, so lines edited in the file
//! (or re-saved with `tally save`) show up on the next recalculation.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveTime};
use clap::Args;
use tally_core::{AggregateResult, TargetHours, format_hours_minutes, summarize};

use crate::Config;
use crate::input::{InputArgs, InputSource, Inputs, load_inputs, read_stdin};
use crate::session;

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Seconds between recalculations (defaults to the configured interval).
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Stop after this many recalculations.
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,
}

/// Fires a single notice the first time the target is reached.
///
/// A notice needs a previous observation with time still remaining, so a
/// target that is already met on the first tick stays silent.
#[derive(Debug, Default)]
pub struct TargetNotifier {
    last_remaining: Option<i64>,
    notified: bool,
}

impl TargetNotifier {
    /// Records `result` and returns the notice text if it just crossed the target.
    pub fn observe(&mut self, result: &AggregateResult) -> Option<String> {
        let previous = self.last_remaining.replace(result.remaining_minutes);
        if self.notified {
            return None;
        }

        match previous {
            Some(before) if before > 0 && result.target_reached() => {
                self.notified = true;
                Some(target_notice(result.remaining_minutes))
            }
            _ => None,
        }
    }

    /// Forgets all history, as if the input had been cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Text of the target-reached notice.
pub fn target_notice(remaining_minutes: i64) -> String {
    if remaining_minutes == 0 {
        "You've reached your target hours!".to_string()
    } else {
        format!(
            "You've exceeded your target by {}!",
            format_hours_minutes(remaining_minutes)
        )
    }
}

/// One status line per recalculation.
pub fn status_line(updated_at: NaiveTime, result: &AggregateResult) -> String {
    format!(
        "[{}] {} | {}",
        updated_at.format("%H:%M:%S"),
        result.total_display,
        result.remaining_display
    )
}

pub fn run<W: Write>(writer: &mut W, args: &WatchArgs, config: &Config) -> Result<()> {
    let interval = Duration::from_secs(args.interval.unwrap_or(config.update_interval_secs));

    // stdin can only be drained once; keep what it gave us for every tick
    let source = match args.input.source() {
        InputSource::Stdin => InputSource::Lines(read_stdin()?),
        other => other,
    };

    let mut notifier = TargetNotifier::default();
    let mut tick: u64 = 0;

    loop {
        let inputs = if tick > 0 && session_cleared(&source, config)? {
            notifier.reset();
            cleared_inputs(args.input.target, config)
        } else {
            load_inputs(&source, args.input.target, config)?
        };
        let result = summarize(&inputs.lines, inputs.target, args.input.now());
        tracing::debug!(
            tick,
            total = result.total_minutes,
            remaining = result.remaining_minutes,
            "recalculated"
        );

        writeln!(writer, "{}", status_line(Local::now().time(), &result))?;
        if let Some(notice) = notifier.observe(&result) {
            writeln!(writer, "{notice}")?;
        }
        writer.flush()?;

        tick += 1;
        if !inputs.auto_update {
            writeln!(writer, "Auto-update is off for the saved session; stopping.")?;
            break;
        }
        if args.ticks.is_some_and(|max| tick >= max) {
            break;
        }

        thread::sleep(interval);
    }

    Ok(())
}

/// Whether the session being watched has been removed since the first tick.
fn session_cleared(source: &InputSource, config: &Config) -> Result<bool> {
    if *source != InputSource::Session {
        return Ok(false);
    }
    let cleared = session::load(&config.session_path)?.is_none();
    if cleared {
        tracing::debug!(
            path = %config.session_path.display(),
            "session cleared; counting from zero"
        );
    }
    Ok(cleared)
}

/// Empty input that keeps the timer running until a session is saved again.
fn cleared_inputs(target: Option<TargetHours>, config: &Config) -> Inputs {
    Inputs {
        lines: Vec::new(),
        target: target.unwrap_or(config.target_hours),
        auto_update: true,
    }
}
