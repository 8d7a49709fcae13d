//! Clock-time value types shared by the parsing stages.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes in one day, added when an interval crosses midnight.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Accepts `14:05`, `2:05pm`, `2 pm` and `9`.
static CLOCK_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?$").expect("valid clock time regex")
});

/// Error returned when a string cannot be read as a time of day.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseClockError {
    #[error("invalid time of day: {0:?} (expected HH:MM or H:MM am/pm)")]
    Format(String),

    #[error("time of day out of range: {0:?}")]
    OutOfRange(String),

    #[error("unknown meridiem: {0:?}")]
    Meridiem(String),
}

/// The am/pm designation of a 12-hour clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Returns the meridiem a 24-hour clock hour falls in.
    #[must_use]
    pub const fn for_hour(hour24: u32) -> Self {
        if hour24 < 12 { Self::Am } else { Self::Pm }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("am") {
            Ok(Self::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Ok(Self::Pm)
        } else {
            Err(ParseClockError::Meridiem(s.to_string()))
        }
    }
}

/// A time as the user typed it, before meridiem resolution.
///
/// `hour` is whatever digits were written (usually 1-12); `meridiem` is the
/// marker written directly after the digits, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToken {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Option<Meridiem>,
}

impl TimeToken {
    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            meridiem: None,
        }
    }

    #[must_use]
    pub const fn with_meridiem(mut self, meridiem: Meridiem) -> Self {
        self.meridiem = Some(meridiem);
        self
    }

    /// Converts the token to a 24-hour time under the given meridiem.
    ///
    /// `pm` adds twelve hours except to 12, `am` maps 12 to 0, anything else
    /// is kept as typed. Returns `None` when the result is not a valid time
    /// of day (e.g. `13pm`, `9:75`).
    #[must_use]
    pub fn to_clock(self, meridiem: Meridiem) -> Option<ClockTime> {
        let hour = match meridiem {
            Meridiem::Pm if self.hour != 12 => self.hour.checked_add(12)?,
            Meridiem::Am if self.hour == 12 => 0,
            _ => self.hour,
        };
        ClockTime::new(hour, self.minute)
    }
}

/// A wall-clock time of day on the 24-hour clock.
///
/// Always holds an hour in 0-23 and a minute in 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a time of day, or `None` if either field is out of range.
    #[must_use]
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: u8::try_from(hour).ok()?,
            minute: u8::try_from(minute).ok()?,
        })
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }

    #[must_use]
    pub fn minutes_since_midnight(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    #[must_use]
    pub fn meridiem(self) -> Meridiem {
        Meridiem::for_hour(self.hour())
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: u8::try_from(time.hour()).unwrap_or(0),
            minute: u8::try_from(time.minute()).unwrap_or(0),
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = CLOCK_TIME_RE
            .captures(trimmed)
            .ok_or_else(|| ParseClockError::Format(s.to_string()))?;

        let out_of_range = || ParseClockError::OutOfRange(s.to_string());
        let hour: u32 = caps[1].parse().map_err(|_| out_of_range())?;
        let minute: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| out_of_range())?,
            None => 0,
        };
        let token = TimeToken::new(hour, minute);

        match caps.get(3) {
            Some(m) => {
                if !(1..=12).contains(&hour) {
                    return Err(out_of_range());
                }
                token.to_clock(m.as_str().parse()?).ok_or_else(out_of_range)
            }
            None => Self::new(hour, minute).ok_or_else(out_of_range),
        }
    }
}
