//! Per-line pipeline: normalize, classify, resolve meridiems, measure.

use serde::Serialize;

use crate::clock::ClockTime;
use crate::duration::{self, Span};
use crate::meridiem;
use crate::normalize::normalize;
use crate::range::classify;

/// Whether a counted line had an explicit end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeShape {
    Bounded,
    OpenEnded,
}

/// A line that parsed into a measurable interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine {
    pub negative: bool,
    pub shape: RangeShape,
    pub span: Span,
    /// Signed contribution to the total.
    pub minutes: i64,
}

/// Runs one raw line through every stage.
///
/// Blank and unparsable lines yield `None`; they are not errors.
pub fn parse_line(raw: &str, now: ClockTime) -> Option<ParsedLine> {
    let line = normalize(raw)?;

    let Some(range) = classify(&line.text) else {
        tracing::debug!(line = %raw, "skipping line without a time range");
        return None;
    };

    let meridiems = meridiem::resolve(&line.text, &range, now);
    let Some(span) = duration::span(&range, meridiems, now) else {
        tracing::debug!(line = %raw, ?meridiems, "skipping line with out-of-range time");
        return None;
    };

    let shape = if range.is_open_ended() {
        RangeShape::OpenEnded
    } else {
        RangeShape::Bounded
    };
    let minutes = duration::signed(span.minutes(), line.negative);
    tracing::trace!(line = %raw, start = %span.start, end = %span.end, minutes, "parsed line");

    Some(ParsedLine {
        negative: line.negative,
        shape,
        span,
        minutes,
    })
}

/// Signed minutes one line contributes; zero when it is blank or unparsable.
pub fn line_minutes(raw: &str, now: ClockTime) -> i64 {
    parse_line(raw, now).map_or(0, |parsed| parsed.minutes)
}

/// Outcome of a single line in a [`breakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineStatus {
    /// Empty or whitespace only.
    Blank,
    /// Text that holds no usable range.
    Skipped,
    Counted { shape: RangeShape, minutes: i64 },
}

/// One input line and what it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineContribution {
    /// Zero-based position in the input.
    pub index: usize,
    pub text: String,
    #[serde(flatten)]
    pub status: LineStatus,
}

impl LineContribution {
    pub const fn minutes(&self) -> i64 {
        match self.status {
            LineStatus::Counted { minutes, .. } => minutes,
            LineStatus::Blank | LineStatus::Skipped => 0,
        }
    }
}

/// Reports every line's contribution, in input order.
///
/// The counted minutes sum to the same total [`crate::summarize`] reports.
pub fn breakdown<I>(lines: I, now: ClockTime) -> Vec<LineContribution>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let text = line.as_ref();
            let status = if text.trim().is_empty() {
                LineStatus::Blank
            } else {
                match parse_line(text, now) {
                    Some(parsed) => LineStatus::Counted {
                        shape: parsed.shape,
                        minutes: parsed.minutes,
                    },
                    None => LineStatus::Skipped,
                }
            };
            LineContribution {
                index,
                text: text.to_string(),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    #[test]
    fn test_bounded_line() {
        let parsed = parse_line("5:00 - 8:05am", at(12, 0)).unwrap();
        assert_eq!(parsed.shape, RangeShape::Bounded);
        assert!(!parsed.negative);
        assert_eq!(parsed.minutes, 185);
    }

    #[test]
    fn test_negative_line_uses_global_meridiem() {
        // The start search finds "3:00pm", so this is 2pm-3pm, not 2am-3pm.
        let parsed = parse_line("-2:00 - 3:00pm", at(12, 0)).unwrap();
        assert!(parsed.negative);
        assert_eq!(parsed.span.start, at(14, 0));
        assert_eq!(parsed.minutes, -60);
    }

    #[test]
    fn test_mixed_meridiems() {
        assert_eq!(line_minutes("7:00am \u{2013} 2:30pm", at(12, 0)), 450);
    }

    #[test]
    fn test_overnight_line() {
        assert_eq!(line_minutes("11:00pm - 2:00am", at(12, 0)), 180);
    }

    #[test]
    fn test_open_ended_line() {
        let parsed = parse_line("9:45 \u{2013}", at(10, 15)).unwrap();
        assert_eq!(parsed.shape, RangeShape::OpenEnded);
        assert_eq!(parsed.minutes, 30);
    }

    #[test]
    fn test_open_ended_started_after_now_wraps() {
        // 10pm start seen at 9pm runs through the night: 23 hours.
        assert_eq!(line_minutes("10pm -", at(21, 0)), 23 * 60);
    }

    #[test]
    fn test_blank_and_unparsable_lines_contribute_zero() {
        assert_eq!(line_minutes("", at(12, 0)), 0);
        assert_eq!(line_minutes("lunch break", at(12, 0)), 0);
        assert_eq!(line_minutes("13pm - 2pm", at(12, 0)), 0);
        assert_eq!(parse_line("-", at(12, 0)), None);
    }

    #[test]
    fn test_negation_flips_sign_only() {
        let now = at(16, 20);
        for line in ["5:00 - 8:05am", "11:00pm - 2:00am", "9:45 -", "1 - 4pm", "12 - 12:30pm"] {
            let positive = line_minutes(line, now);
            let negative = line_minutes(&format!("-{line}"), now);
            assert_eq!(negative, -positive, "negating {line:?}");
        }
    }

    #[test]
    fn test_breakdown_reports_each_line() {
        let lines = ["5:00 - 8:05am", "", "notes", "-7:00 - 8:06am"];
        let report = breakdown(lines, at(12, 0));

        assert_eq!(report.len(), 4);
        assert_eq!(
            report[0].status,
            LineStatus::Counted {
                shape: RangeShape::Bounded,
                minutes: 185
            }
        );
        assert_eq!(report[1].status, LineStatus::Blank);
        assert_eq!(report[2].status, LineStatus::Skipped);
        assert_eq!(report[3].minutes(), -66);
        assert_eq!(report[3].index, 3);
        assert_eq!(report.iter().map(LineContribution::minutes).sum::<i64>(), 119);
    }

    #[test]
    fn test_breakdown_serializes_flat() {
        let report = breakdown(["9:45 -"], at(10, 15));
        let json = serde_json::to_value(&report[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "index": 0,
                "text": "9:45 -",
                "status": "counted",
                "shape": "open_ended",
                "minutes": 30
            })
        );
    }
}
