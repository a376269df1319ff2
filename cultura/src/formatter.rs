//! Locale-aware rendering of instants.
//!
//! Cultures without calendar overrides are rendered from the CLDR data
//! compiled into `icu`. Cultures loaded with a `calendar` section use their
//! own patterns, written with the Globalize/.NET custom date format tokens:
//!
//! | Token          | Output                                   |
//! |----------------|------------------------------------------|
//! | `yyyy`, `yy`   | four-digit year, two-digit year          |
//! | `MMMM`, `MMM`  | month name, abbreviated month name       |
//! | `MM`, `M`      | month number, zero padded or not         |
//! | `dddd`, `ddd`  | day name, abbreviated day name           |
//! | `dd`, `d`      | day of month, zero padded or not         |
//! | `HH`, `H`      | hour (0-23)                              |
//! | `hh`, `h`      | hour (1-12)                              |
//! | `mm`, `m`      | minute                                   |
//! | `ss`, `s`      | second                                   |
//! | `f`..`fff`     | fraction of a second                     |
//! | `tt`, `t`      | AM/PM designator, or its first character |
//!
//! Text inside single quotes, and any character after `\`, is copied as is.

use icu::{
    calendar::{Date, Iso},
    datetime::{DateTimeFormatter, DateTimeFormatterPreferences, NoCalendarFormatter, fieldsets},
    locale::Locale,
    time::Time,
};
use tracing::debug;

use crate::{
    context::CultureContext,
    culture::{CalendarInfo, Culture, PatternKind},
    instant::{DateTimeParts, Instant},
};

/// Turns an instant into display text.
pub trait Formatter {
    /// Formats `instant`; `None` stands for a date that could not be parsed.
    fn format_instant(&self, instant: Option<Instant>) -> String;
}

impl<T: Formatter + ?Sized> Formatter for &T {
    fn format_instant(&self, instant: Option<Instant>) -> String {
        (**self).format_instant(instant)
    }
}

/// Formats with one of the active culture's named patterns, in UTC.
///
/// The culture is read from the [`CultureContext`] on every call, so switching
/// cultures affects the next format without rebuilding the formatter. A missing
/// instant formats as the empty string.
#[derive(Debug, Clone, Default)]
pub struct PatternFormatter {
    context: CultureContext,
    pattern: PatternKind,
}

impl PatternFormatter {
    pub fn new(context: CultureContext) -> Self {
        PatternFormatter {
            context,
            pattern: PatternKind::default(),
        }
    }

    pub fn with_pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn pattern(&self) -> PatternKind {
        self.pattern
    }

    pub fn context(&self) -> &CultureContext {
        &self.context
    }
}

impl Formatter for PatternFormatter {
    fn format_instant(&self, instant: Option<Instant>) -> String {
        let Some(instant) = instant else {
            return String::new();
        };
        format_for_culture(instant, &self.context.active(), self.pattern)
    }
}

/// Renders `instant` with `culture`'s named pattern `kind`.
///
/// A calendar override wins over locale data. When neither applies (no locale
/// data for the name, or a year outside what the locale data covers) the
/// invariant calendar is used.
pub fn format_for_culture(instant: Instant, culture: &Culture, kind: PatternKind) -> String {
    if let Some(calendar) = &culture.calendar {
        return format_with_pattern(instant, calendar, calendar.patterns.get(kind));
    }
    format_with_locale(instant, &culture.name, kind).unwrap_or_else(|| {
        debug!(culture = %culture.name, %instant, "no locale rendering, using invariant pattern");
        let invariant = CalendarInfo::invariant();
        format_with_pattern(instant, invariant, invariant.patterns.get(kind))
    })
}

/// Renders `instant` from the CLDR data for the locale called `name`.
pub fn format_with_locale(instant: Instant, name: &str, kind: PatternKind) -> Option<String> {
    let locale: Locale = name.replace('_', "-").parse().ok()?;
    let parts = instant.components();
    let date = Date::try_new_iso(
        i32::try_from(parts.year).ok()?,
        u8::try_from(parts.month).ok()?,
        u8::try_from(parts.day).ok()?,
    )
    .ok()?;
    let time = Time::try_new(
        u8::try_from(parts.hour).ok()?,
        u8::try_from(parts.minute).ok()?,
        u8::try_from(parts.second).ok()?,
        0,
    )
    .ok()?;

    let text = match kind {
        PatternKind::ShortDate | PatternKind::LongDate => locale_date(&locale, &date, kind)?,
        PatternKind::ShortTime => locale_time(&locale, &time, false)?,
        PatternKind::LongTime => locale_time(&locale, &time, true)?,
        PatternKind::FullShort => format!(
            "{} {}",
            locale_date(&locale, &date, kind)?,
            locale_time(&locale, &time, false)?
        ),
        PatternKind::FullLong => format!(
            "{} {}",
            locale_date(&locale, &date, kind)?,
            locale_time(&locale, &time, true)?
        ),
    };
    Some(text)
}

fn locale_date(locale: &Locale, date: &Date<Iso>, kind: PatternKind) -> Option<String> {
    let prefs: DateTimeFormatterPreferences = locale.clone().into();
    let text = match kind {
        PatternKind::ShortDate => DateTimeFormatter::try_new(prefs, fieldsets::YMD::short())
            .ok()?
            .format(date)
            .to_string(),
        PatternKind::LongDate => DateTimeFormatter::try_new(prefs, fieldsets::YMD::long())
            .ok()?
            .format(date)
            .to_string(),
        // full patterns lead with the weekday
        _ => DateTimeFormatter::try_new(prefs, fieldsets::YMDE::long())
            .ok()?
            .format(date)
            .to_string(),
    };
    Some(text)
}

fn locale_time(locale: &Locale, time: &Time, with_seconds: bool) -> Option<String> {
    let prefs: DateTimeFormatterPreferences = locale.clone().into();
    let text = if with_seconds {
        NoCalendarFormatter::try_new(prefs, fieldsets::T::medium())
            .ok()?
            .format(time)
            .to_string()
    } else {
        NoCalendarFormatter::try_new(prefs, fieldsets::T::short())
            .ok()?
            .format(time)
            .to_string()
    };
    Some(text)
}

/// Renders `instant` with a custom `pattern` using `calendar`'s names.
pub fn format_with_pattern(instant: Instant, calendar: &CalendarInfo, pattern: &str) -> String {
    let parts = instant.components();
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\'' => {
                i += 1;
                while i < chars.len() && chars[i] != '\'' {
                    out.push(chars[i]);
                    i += 1;
                }
                // skip closing quote
                i += 1;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                }
                i += 2;
            }
            'y' | 'M' | 'd' | 'H' | 'h' | 'm' | 's' | 'f' | 't' => {
                let mut run = 1;
                while i + run < chars.len() && chars[i + run] == ch {
                    run += 1;
                }
                push_field(&mut out, ch, run, &parts, calendar);
                i += run;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    out
}

fn push_field(
    out: &mut String,
    token: char,
    run: usize,
    parts: &DateTimeParts,
    calendar: &CalendarInfo,
) {
    let name = |names: &[String], index: u32| names.get(index as usize).cloned().unwrap_or_default();
    let number = |value: u32, padded: bool| {
        if padded {
            format!("{:02}", value)
        } else {
            value.to_string()
        }
    };

    let text = match token {
        'y' if run >= 3 => format!("{:04}", parts.year),
        'y' => number(parts.year.rem_euclid(100) as u32, run == 2),
        'M' if run >= 4 => name(&calendar.month_names, parts.month - 1),
        'M' if run == 3 => name(&calendar.month_names_abbr, parts.month - 1),
        'M' => number(parts.month, run == 2),
        'd' if run >= 4 => name(&calendar.day_names, parts.weekday),
        'd' if run == 3 => name(&calendar.day_names_abbr, parts.weekday),
        'd' => number(parts.day, run == 2),
        'H' => number(parts.hour, run >= 2),
        'h' => {
            let hour = match parts.hour % 12 {
                0 => 12,
                h => h,
            };
            number(hour, run >= 2)
        }
        'm' => number(parts.minute, run >= 2),
        's' => number(parts.second, run >= 2),
        'f' => {
            let mut digits = format!("{:03}", parts.millisecond);
            if run > 3 {
                digits.push_str(&"0".repeat(run - 3));
            } else {
                digits.truncate(run);
            }
            digits
        }
        't' => {
            let designator = if parts.hour < 12 {
                &calendar.am_designator
            } else {
                &calendar.pm_designator
            };
            if run == 1 {
                designator.chars().take(1).collect()
            } else {
                designator.clone()
            }
        }
        _ => std::iter::repeat(token).take(run).collect(),
    };
    out.push_str(&text);
}
