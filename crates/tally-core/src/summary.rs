//! Aggregation of line durations and comparison against a target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::ClockTime;
use crate::line::line_minutes;

/// Errors for target hours that cannot be compared against.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TargetError {
    /// The target text is not a number.
    #[error("invalid target hours: {input:?} is not a number")]
    NotNumeric { input: String },

    /// The target is negative, NaN, infinite or too large to count in minutes.
    #[error("invalid target hours: {hours} (must be between 0 and 1e12)")]
    InvalidTarget { hours: f64 },
}

/// A validated target duration in hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TargetHours(f64);

impl TargetHours {
    /// Ten hours, the target used when nothing else is configured.
    pub const DEFAULT: Self = Self(10.0);

    /// Largest accepted target. Its minute count stays far from `i64` limits.
    pub const MAX_HOURS: f64 = 1.0e12;

    pub fn new(hours: f64) -> Result<Self, TargetError> {
        if !(0.0..=Self::MAX_HOURS).contains(&hours) {
            return Err(TargetError::InvalidTarget { hours });
        }
        Ok(Self(hours))
    }

    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }

    /// The target rounded to whole minutes.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "targets are validated to at most MAX_HOURS"
    )]
    pub fn minutes(self) -> i64 {
        (self.0 * 60.0).round() as i64
    }
}

impl Default for TargetHours {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for TargetHours {
    type Error = TargetError;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::new(hours)
    }
}

impl From<TargetHours> for f64 {
    fn from(target: TargetHours) -> Self {
        target.0
    }
}

impl FromStr for TargetHours {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours: f64 = s.trim().parse().map_err(|_| TargetError::NotNumeric {
            input: s.to_string(),
        })?;
        Self::new(hours)
    }
}

impl fmt::Display for TargetHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Totals for one run over the input lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Exact signed sum of every line's contribution.
    pub total_minutes: i64,
    /// Target minutes minus `total_minutes`; zero or below means reached.
    pub remaining_minutes: i64,
    pub total_display: String,
    pub remaining_display: String,
}

impl AggregateResult {
    pub fn new(total_minutes: i64, target: TargetHours) -> Self {
        let remaining_minutes = target.minutes() - total_minutes;
        Self {
            total_minutes,
            remaining_minutes,
            total_display: format_total(total_minutes),
            remaining_display: format_remaining(remaining_minutes),
        }
    }

    pub const fn target_reached(&self) -> bool {
        self.remaining_minutes <= 0
    }
}

/// Sums the lines and compares the total against a validated target.
pub fn summarize<I>(lines: I, target: TargetHours, now: ClockTime) -> AggregateResult
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let total_minutes = lines
        .into_iter()
        .map(|line| line_minutes(line.as_ref(), now))
        .sum();
    AggregateResult::new(total_minutes, target)
}

/// Validates `target_hours`, then sums the lines.
///
/// This is the engine's entry point: a pure function of its arguments.
pub fn calculate<I>(
    lines: I,
    target_hours: f64,
    now: ClockTime,
) -> Result<AggregateResult, TargetError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let target = TargetHours::new(target_hours)?;
    Ok(summarize(lines, target, now))
}

/// Formats an absolute minute count as `"H hours and M minutes"`.
pub fn format_hours_minutes(minutes: i64) -> String {
    let minutes = minutes.unsigned_abs();
    format!("{} hours and {} minutes", minutes / 60, minutes % 60)
}

/// Formats a total, prefixed with `-` when it is negative.
pub fn format_total(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { "-" } else { "" };
    format!("{sign}{}", format_hours_minutes(total_minutes))
}

/// Describes how far the total is from the target.
pub fn format_remaining(remaining_minutes: i64) -> String {
    match remaining_minutes {
        0 => "Target reached!".to_string(),
        m if m > 0 => format!("{} remaining", format_hours_minutes(m)),
        m => format!("Target exceeded by {}", format_hours_minutes(m)),
    }
}
