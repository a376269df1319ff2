//! The `Instant` value type and the calendar arithmetic behind it.
//!
//! An [`Instant`] is a count of milliseconds since `1970-01-01T00:00:00Z`.
//! Conversions to and from calendar fields use the proleptic Gregorian calendar
//! and never consult the local timezone.

use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// An absolute, UTC-normalized point in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

/// Calendar fields of an [`Instant`], read in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeParts {
    pub year: i64,
    /// One-based month (1 = January).
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    /// Day of the week, 0 = Sunday.
    pub weekday: u32,
}

impl Instant {
    pub const UNIX_EPOCH: Instant = Instant(0);

    pub const fn from_millis(millis: i64) -> Self {
        Instant(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Builds an instant from UTC calendar fields.
    ///
    /// `month_zero_based` counts from 0 (January). No field is range checked:
    /// values outside their usual range roll over into the next larger unit,
    /// so month 12 of 2013 is January 2014 and day 32 of January is
    /// February 1st. Returns `None` only when the result does not fit in an
    /// `i64` millisecond count.
    pub fn from_utc_components(
        year: i64,
        month_zero_based: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
    ) -> Option<Self> {
        let total_months = year.checked_mul(12)?.checked_add(month_zero_based)?;
        let norm_year = total_months.div_euclid(12);
        let norm_month = total_months.rem_euclid(12) as u32 + 1;

        let days = days_from_civil(norm_year, norm_month, 1)?.checked_add(day.checked_sub(1)?)?;
        let time = hour
            .checked_mul(MILLIS_PER_HOUR)?
            .checked_add(minute.checked_mul(MILLIS_PER_MINUTE)?)?
            .checked_add(second.checked_mul(MILLIS_PER_SECOND)?)?
            .checked_add(millisecond)?;

        days.checked_mul(MILLIS_PER_DAY)?
            .checked_add(time)
            .map(Instant)
    }

    /// Shifts the instant by a signed number of minutes.
    pub fn checked_add_minutes(self, minutes: i64) -> Option<Self> {
        minutes
            .checked_mul(MILLIS_PER_MINUTE)
            .and_then(|delta| self.0.checked_add(delta))
            .map(Instant)
    }

    /// Splits the instant into UTC calendar fields.
    pub fn components(self) -> DateTimeParts {
        let days = self.0.div_euclid(MILLIS_PER_DAY);
        let rem = self.0.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        DateTimeParts {
            year,
            month,
            day,
            hour: (rem / MILLIS_PER_HOUR) as u32,
            minute: ((rem % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE) as u32,
            second: ((rem % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND) as u32,
            millisecond: (rem % MILLIS_PER_SECOND) as u32,
            // 1970-01-01 was a Thursday.
            weekday: (days + 4).rem_euclid(7) as u32,
        }
    }

    /// Renders `YYYY-MM-DDTHH:mm:ss.fffZ`, switching to the expanded
    /// `±YYYYYY` year form outside 0..=9999.
    pub fn to_iso_string(self) -> String {
        let p = self.components();
        let year = if (0..=9999).contains(&p.year) {
            format!("{:04}", p.year)
        } else if p.year < 0 {
            format!("-{:06}", -(p.year as i128))
        } else {
            format!("+{:06}", p.year)
        };
        format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year, p.month, p.day, p.hour, p.minute, p.second, p.millisecond
        )
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl From<Instant> for i64 {
    fn from(value: Instant) -> Self {
        value.0
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        crate::temporal::parse(&text)
            .ok_or_else(|| de::Error::custom(format!("unrecognized date `{}`", text)))
    }
}

/// Days since the epoch of a proleptic Gregorian date, `None` on overflow.
pub(crate) fn days_from_civil(year: i64, month: u32, day: u32) -> Option<i64> {
    let adjusted_year = year.checked_sub(if month <= 2 { 1 } else { 0 })?;
    let era = adjusted_year.div_euclid(400);
    let yoe = adjusted_year.rem_euclid(400);
    let month = i64::from(month);
    let day = i64::from(day);
    let doy = (153 * (month + if month > 2 { -3 } else { 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era.checked_mul(146_097)?
        .checked_add(doe)?
        .checked_sub(719_468)
}

pub(crate) fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096).div_euclid(365);
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2).div_euclid(153);
    let day = (doy - (153 * mp + 2).div_euclid(5) + 1) as u32;
    let month = (mp + if mp < 10 { 3 } else { -9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
