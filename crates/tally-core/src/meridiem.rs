//! Meridiem resolution for the start and end of a range.
//!
//! Resolution is a text-wide search rather than a per-token association:
//! the start takes the *first* am/pm marker found anywhere in the line, and
//! the end takes the first marker that follows a hyphen. A line with a
//! single marker (`5:00 - 8:05am`) therefore applies it to both ends, which
//! is what people mean in the overwhelmingly common case.
//!
//! Markers typed directly on a [`TimeToken`](crate::clock::TimeToken) are
//! not consulted; only the search result counts.

use std::sync::LazyLock;

use regex::Regex;

use crate::clock::{ClockTime, Meridiem};
use crate::range::RangeKind;

/// First `digits[:digits] am|pm` anywhere in the line.
static START_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+):?([0-9]*)\s*(am|pm)").expect("valid start meridiem regex")
});

/// First `- digits[:digits] am|pm`, i.e. a marker on a time after a hyphen.
static END_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-\s*([0-9]+):?([0-9]*)\s*(am|pm)").expect("valid end meridiem regex")
});

/// Resolved meridiems for one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meridiems {
    pub start: Meridiem,
    /// `None` for open-ended ranges, whose end is the current instant.
    pub end: Option<Meridiem>,
}

/// Resolves the meridiems for a classified line.
///
/// Without any marker, a bounded start defaults to `am` while an open-ended
/// start takes the meridiem of `now`. A bounded end without a marker after
/// its hyphen defaults to `am`.
pub fn resolve(text: &str, range: &RangeKind, now: ClockTime) -> Meridiems {
    let start_marker = first_marker(&START_MARKER_RE, text);

    match range {
        RangeKind::OpenEnded { .. } => Meridiems {
            start: start_marker.unwrap_or_else(|| now.meridiem()),
            end: None,
        },
        RangeKind::Bounded { .. } => Meridiems {
            start: start_marker.unwrap_or(Meridiem::Am),
            end: Some(first_marker(&END_MARKER_RE, text).unwrap_or(Meridiem::Am)),
        },
    }
}

fn first_marker(re: &Regex, text: &str) -> Option<Meridiem> {
    re.captures(text)?.get(3)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::classify;

    fn resolve_line(text: &str, now: ClockTime) -> Meridiems {
        let range = classify(text).unwrap();
        resolve(text, &range, now)
    }

    fn morning() -> ClockTime {
        ClockTime::new(10, 15).unwrap()
    }

    fn evening() -> ClockTime {
        ClockTime::new(19, 0).unwrap()
    }

    #[test]
    fn single_trailing_marker_applies_to_both_ends() {
        let meridiems = resolve_line("5:00 - 8:05pm", morning());
        assert_eq!(meridiems.start, Meridiem::Pm);
        assert_eq!(meridiems.end, Some(Meridiem::Pm));
    }

    #[test]
    fn distinct_markers_are_kept() {
        let meridiems = resolve_line("11:00pm - 2:00am", morning());
        assert_eq!(meridiems.start, Meridiem::Pm);
        assert_eq!(meridiems.end, Some(Meridiem::Am));
    }

    #[test]
    fn start_marker_only_leaves_end_am() {
        let meridiems = resolve_line("1pm - 3", morning());
        assert_eq!(meridiems.start, Meridiem::Pm);
        assert_eq!(meridiems.end, Some(Meridiem::Am));
    }

    #[test]
    fn no_markers_default_to_am() {
        let meridiems = resolve_line("9 - 11", evening());
        assert_eq!(meridiems.start, Meridiem::Am);
        assert_eq!(meridiems.end, Some(Meridiem::Am));
    }

    #[test]
    fn open_ended_without_marker_follows_now() {
        assert_eq!(resolve_line("9:45 -", morning()).start, Meridiem::Am);
        assert_eq!(resolve_line("6:30 -", evening()).start, Meridiem::Pm);
        assert_eq!(resolve_line("6:30 -", evening()).end, None);
    }

    #[test]
    fn open_ended_marker_overrides_now() {
        assert_eq!(resolve_line("9:45am -", evening()).start, Meridiem::Am);
    }

    #[test]
    fn markers_are_case_insensitive() {
        let meridiems = resolve_line("7:00 AM - 2:30 PM", morning());
        assert_eq!(meridiems.start, Meridiem::Am);
        assert_eq!(meridiems.end, Some(Meridiem::Pm));
    }

    #[test]
    fn start_search_ignores_token_position() {
        // The first marker belongs to the end time, but the start still takes it.
        let meridiems = resolve_line("8 - 9pm, then 10am", morning());
        assert_eq!(meridiems.start, Meridiem::Pm);
        assert_eq!(meridiems.end, Some(Meridiem::Pm));
    }
}
