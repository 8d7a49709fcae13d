//! Interval parsing and aggregation engine.
//!
//! Turns free-form lines such as `5:00 - 8:05am`, `-2:00 - 3:00pm` or
//! `9:45 -` into a signed total of minutes and compares it to a target.
//! Each line passes through:
//! - [`normalize`]: trimming, dash unification, negation marker
//! - [`range`]: bounded versus open-ended classification
//! - [`meridiem`]: am/pm resolution by text-wide search
//! - [`duration`]: 24-hour conversion, overnight wrap, sign
//! - [`summary`]: totals, target comparison, display strings
//!
//! Nothing here reads the system clock; the current instant is always a
//! parameter, so identical inputs give identical results.

pub mod clock;
pub mod duration;
mod line;
pub mod meridiem;
pub mod normalize;
pub mod range;
pub mod summary;

pub use clock::{ClockTime, Meridiem, ParseClockError, TimeToken};
pub use line::{
    LineContribution, LineStatus, ParsedLine, RangeShape, breakdown, line_minutes, parse_line,
};
pub use range::RangeKind;
pub use summary::{
    AggregateResult, TargetError, TargetHours, calculate, format_hours_minutes, format_remaining,
    format_total, summarize,
};
