//! Range classification: bounded (`A - B`) versus open-ended (`A -`).
//!
//! Both patterns are searched for anywhere in the line, leftmost match wins.
//! Text around the match is ignored, so `"meeting 9 - 10"` still counts.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::clock::{Meridiem, TimeToken};

/// Start time followed by a hyphen and nothing else.
static OPEN_ENDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+):?([0-9]*)(?:\s*(am|pm))?\s*-\s*$").expect("valid open-ended regex")
});

/// Start time, hyphen, end time.
static BOUNDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+):?([0-9]*)(?:\s*(am|pm))?\s*-\s*([0-9]+):?([0-9]*)(?:\s*(am|pm))?")
        .expect("valid bounded range regex")
});

/// Shape of one interval expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// Explicit start and end, e.g. `5:00 - 8:05am`.
    Bounded { start: TimeToken, end: TimeToken },
    /// Start only, still running, e.g. `9:45 -`.
    OpenEnded { start: TimeToken },
}

impl RangeKind {
    pub const fn start(&self) -> TimeToken {
        match self {
            Self::Bounded { start, .. } | Self::OpenEnded { start } => *start,
        }
    }

    pub const fn is_open_ended(&self) -> bool {
        matches!(self, Self::OpenEnded { .. })
    }
}

/// Classifies a normalized line, or returns `None` if it holds no range.
///
/// The open-ended form is tried first so that `9:45 -` is never read as a
/// bounded range with a missing end.
pub fn classify(text: &str) -> Option<RangeKind> {
    if let Some(caps) = OPEN_ENDED_RE.captures(text) {
        let start = token(&caps, 1, 2, 3)?;
        return Some(RangeKind::OpenEnded { start });
    }

    let caps = BOUNDED_RE.captures(text)?;
    let start = token(&caps, 1, 2, 3)?;
    let end = token(&caps, 4, 5, 6)?;
    Some(RangeKind::Bounded { start, end })
}

/// Builds a token from the hour, minute and meridiem capture groups.
///
/// An empty minute group means `:00`. Digit runs too long for `u32` make the
/// whole line unparsable.
fn token(caps: &Captures<'_>, hour: usize, minute: usize, meridiem: usize) -> Option<TimeToken> {
    let hour: u32 = caps.get(hour)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(minute).map(|m| m.as_str()) {
        None | Some("") => 0,
        Some(digits) => digits.parse().ok()?,
    };

    let marker = caps
        .get(meridiem)
        .and_then(|m| m.as_str().parse::<Meridiem>().ok());

    let token = TimeToken::new(hour, minute);
    Some(marker.map_or(token, |m| token.with_meridiem(m)))
}
