//! Signed duration of a classified, meridiem-resolved line.

use crate::clock::{ClockTime, MINUTES_PER_DAY};
use crate::meridiem::Meridiems;
use crate::range::RangeKind;

/// Start and effective end of a range on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: ClockTime,
    /// The typed end for bounded ranges, the current instant for open-ended ones.
    pub end: ClockTime,
}

impl Span {
    /// Minutes from `start` to `end`, wrapping past midnight when `end` is
    /// earlier in the day. Never negative.
    pub fn minutes(self) -> i64 {
        let start = self.start.minutes_since_midnight();
        let mut end = self.end.minutes_since_midnight();
        if end < start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }
}

/// Converts a range to 24-hour times.
///
/// Returns `None` if either end resolves outside 0-23 hours or 0-59 minutes.
pub fn span(range: &RangeKind, meridiems: Meridiems, now: ClockTime) -> Option<Span> {
    let start = range.start().to_clock(meridiems.start)?;
    let end = match range {
        RangeKind::Bounded { end, .. } => end.to_clock(meridiems.end?)?,
        RangeKind::OpenEnded { .. } => now,
    };
    Some(Span { start, end })
}

/// Applies the line's negation marker.
pub const fn signed(minutes: i64, negative: bool) -> i64 {
    if negative { -minutes } else { minutes }
}
