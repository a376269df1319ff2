//! ISO-8601 text <-> [`Instant`] conversion.
//!
//! The accepted grammar is `YYYY-MM-DDTHH:mm[:ss[.fff]][(+|-)hhmm]`, matched at
//! the start of the input. Anything after the matched prefix is ignored, which is
//! how a trailing `Z` ends up meaning "already UTC".
//!
//! ```rust
//! use cultura::temporal::parse;
//!
//! let instant = parse("2013-01-31T12:34:56.78+0530").unwrap();
//! assert_eq!(instant.to_iso_string(), "2013-01-31T07:04:56.780Z");
//! assert!(parse("not-a-date").is_none());
//! ```

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{formatter::Formatter, instant::Instant};

lazy_static! {
    static ref ISO_8601_REGEX: Regex = Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2})(?::([0-9]*)(\.[0-9]*)?)?(?:([+-])([0-9]{2})([0-9]{2}))?"
    )
    .unwrap();
}

/// Fields captured from one date string, before they are folded into an [`Instant`].
struct ParsedComponents {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
    offset: Option<UtcOffset>,
}

struct UtcOffset {
    ahead_of_utc: bool,
    hours: i64,
    minutes: i64,
}

impl UtcOffset {
    /// Minutes to add to the wall-clock time to reach UTC.
    fn correction_minutes(&self) -> i64 {
        let minutes = self.hours * 60 + self.minutes;
        if self.ahead_of_utc { -minutes } else { minutes }
    }
}

impl ParsedComponents {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i64>().ok());

        // An empty seconds run (`12:34:`) counts as zero seconds.
        let second = match caps.get(6).map(|m| m.as_str()) {
            None | Some("") => 0,
            Some(digits) => digits.parse::<i64>().ok()?,
        };
        let millisecond = caps
            .get(7)
            .map(|m| fraction_millis(&m.as_str()[1..]))
            .unwrap_or(0);
        let offset = match (caps.get(8), number(9), number(10)) {
            (Some(sign), Some(hours), Some(minutes)) => Some(UtcOffset {
                ahead_of_utc: sign.as_str() == "+",
                hours,
                minutes,
            }),
            _ => None,
        };

        Some(ParsedComponents {
            year: number(1)?,
            month: number(2)?,
            day: number(3)?,
            hour: number(4)?,
            minute: number(5)?,
            second,
            millisecond,
            offset,
        })
    }

    fn into_instant(self) -> Option<Instant> {
        let wall_clock = Instant::from_utc_components(
            self.year,
            self.month - 1,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        )?;
        match self.offset {
            Some(offset) => wall_clock.checked_add_minutes(offset.correction_minutes()),
            None => Some(wall_clock),
        }
    }
}

/// Truncates a decimal fraction of a second to whole milliseconds.
fn fraction_millis(digits: &str) -> i64 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
}

/// Parses a restricted ISO-8601 date string into a UTC [`Instant`].
///
/// Returns `None` when the text does not start with a recognizable date.
/// Calendar fields are not range checked; out-of-range values roll over
/// (see [`Instant::from_utc_components`]).
pub fn parse(text: &str) -> Option<Instant> {
    let caps = ISO_8601_REGEX.captures(text)?;
    ParsedComponents::from_captures(&caps)?.into_instant()
}

/// A value that can be formatted as a date: raw ISO-8601 text or an [`Instant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Text(String),
    Instant(Instant),
}

impl DateInput {
    /// Resolves to an instant, parsing text on the way. Unparseable text is `None`.
    pub fn resolve(&self) -> Option<Instant> {
        match self {
            DateInput::Text(text) => parse(text),
            DateInput::Instant(instant) => Some(*instant),
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<Instant> for DateInput {
    fn from(value: Instant) -> Self {
        DateInput::Instant(value)
    }
}

/// Formats a date for display with the given formatter.
///
/// Text input goes through [`parse`] first; a failed parse is handed to the
/// formatter as `None`, and what that renders as is up to the formatter.
pub fn format<F: Formatter + ?Sized>(value: impl Into<DateInput>, formatter: &F) -> String {
    formatter.format_instant(value.into().resolve())
}

/// Pairs [`parse`] and [`format`] with one formatter.
#[derive(Debug, Clone)]
pub struct TemporalCodec<F> {
    formatter: F,
}

impl<F: Formatter> TemporalCodec<F> {
    pub fn new(formatter: F) -> Self {
        TemporalCodec { formatter }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    pub fn parse(&self, text: &str) -> Option<Instant> {
        parse(text)
    }

    pub fn format(&self, value: impl Into<DateInput>) -> String {
        format(value, &self.formatter)
    }
}
