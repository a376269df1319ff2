//! Culture definitions: names, optional calendar overrides and message catalogs.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Name of the culture that is active before anything is switched, and that
/// never needs loading.
pub const DEFAULT_CULTURE: &str = "en";

/// A named locale configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    /// Culture name, e.g. `en`, `de-CH`.
    pub name: String,

    #[serde(default)]
    pub english_name: String,

    /// Custom patterns and names. Without them dates are rendered from the
    /// locale data for [`name`](Self::name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarInfo>,

    /// Translated messages keyed by message id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
}

impl Culture {
    /// Creates a culture called `name` that reuses `base`'s calendar data and
    /// starts with no messages.
    pub fn derived_from(base: &Culture, name: impl Into<String>) -> Self {
        Culture {
            name: name.into(),
            english_name: String::new(),
            calendar: base.calendar.clone(),
            messages: BTreeMap::new(),
        }
    }

    /// The base language subtag, e.g. `de` for `de-CH`.
    pub fn language(&self) -> Option<String> {
        parse_culture_name(&self.name)
            .ok()
            .map(|id| id.language.as_str().to_string())
    }

    /// Merges `messages` into this culture; existing keys are overwritten.
    pub fn extend_messages<I, K, V>(&mut self, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.messages
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// The custom pattern for `kind`, if this culture overrides locale data.
    pub fn pattern(&self, kind: PatternKind) -> Option<&str> {
        self.calendar.as_ref().map(|c| c.patterns.get(kind))
    }
}

/// Calendar display data for a culture (Gregorian only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub patterns: DatePatterns,
    /// Full month names, January first.
    pub month_names: Vec<String>,
    pub month_names_abbr: Vec<String>,
    /// Full day names, Sunday first.
    pub day_names: Vec<String>,
    pub day_names_abbr: Vec<String>,
    #[serde(default)]
    pub am_designator: String,
    #[serde(default)]
    pub pm_designator: String,
}

impl CalendarInfo {
    /// English names with culture-neutral patterns.
    pub fn invariant() -> &'static CalendarInfo {
        &INVARIANT_CALENDAR
    }
}

/// The standard named date/time patterns of a culture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePatterns {
    #[serde(rename = "d")]
    pub short_date: String,
    #[serde(rename = "D")]
    pub long_date: String,
    #[serde(rename = "t")]
    pub short_time: String,
    #[serde(rename = "T")]
    pub long_time: String,
    #[serde(rename = "f")]
    pub full_short: String,
    #[serde(rename = "F")]
    pub full_long: String,
}

impl DatePatterns {
    pub fn get(&self, kind: PatternKind) -> &str {
        match kind {
            PatternKind::ShortDate => &self.short_date,
            PatternKind::LongDate => &self.long_date,
            PatternKind::ShortTime => &self.short_time,
            PatternKind::LongTime => &self.long_time,
            PatternKind::FullShort => &self.full_short,
            PatternKind::FullLong => &self.full_long,
        }
    }
}

/// Selects one of the named patterns in [`DatePatterns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternKind {
    ShortDate,
    LongDate,
    ShortTime,
    LongTime,
    FullShort,
    #[default]
    FullLong,
}

impl FromStr for PatternKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(PatternKind::ShortDate),
            "D" => Ok(PatternKind::LongDate),
            "t" => Ok(PatternKind::ShortTime),
            "T" => Ok(PatternKind::LongTime),
            "f" => Ok(PatternKind::FullShort),
            "F" => Ok(PatternKind::FullLong),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown date pattern `{}` (expected one of d, D, t, T, f, F)",
                other
            ))),
        }
    }
}

impl Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatternKind::ShortDate => "d",
            PatternKind::LongDate => "D",
            PatternKind::ShortTime => "t",
            PatternKind::LongTime => "T",
            PatternKind::FullShort => "f",
            PatternKind::FullLong => "F",
        };
        f.write_str(s)
    }
}

/// Validates a culture name, accepting `_` as a subtag separator.
pub fn parse_culture_name(name: &str) -> Result<LanguageIdentifier, Error> {
    if name.trim().is_empty() {
        return Err(Error::InvalidCultureName(name.to_string()));
    }
    name.replace('_', "-")
        .parse::<LanguageIdentifier>()
        .map_err(|_| Error::InvalidCultureName(name.to_string()))
}

/// Returns a copy of a built-in culture.
pub fn builtin(name: &str) -> Option<Culture> {
    BUILTIN_CULTURES.get(name).cloned()
}

/// Names of all built-in cultures, sorted.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_CULTURES.keys().copied()
}

/// The default culture's data.
pub fn default_culture() -> Culture {
    BUILTIN_CULTURES[DEFAULT_CULTURE].clone()
}

lazy_static! {
    /// Cultures that ship with the crate. Their display text comes from the
    /// CLDR data compiled into `icu`, so they carry no calendar tables.
    static ref BUILTIN_CULTURES: BTreeMap<&'static str, Culture> = [
        ("en", "English"),
        ("de", "German"),
        ("fr", "French"),
        ("es", "Spanish"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("ru", "Russian"),
    ]
    .into_iter()
    .map(|(name, english_name)| {
        let culture = Culture {
            name: name.to_string(),
            english_name: english_name.to_string(),
            calendar: None,
            messages: BTreeMap::new(),
        };
        (name, culture)
    })
    .collect();

    /// Culture-neutral calendar used when locale data cannot render a date.
    static ref INVARIANT_CALENDAR: CalendarInfo = {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let months = [
            "January", "February", "March", "April", "May", "June", "July",
            "August", "September", "October", "November", "December",
        ];
        let days = [
            "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
        ];
        CalendarInfo {
            patterns: DatePatterns {
                short_date: "yyyy-MM-dd".to_string(),
                long_date: "dddd, dd MMMM yyyy".to_string(),
                short_time: "HH:mm".to_string(),
                long_time: "HH:mm:ss".to_string(),
                full_short: "dddd, dd MMMM yyyy HH:mm".to_string(),
                full_long: "dddd, dd MMMM yyyy HH:mm:ss".to_string(),
            },
            month_names: owned(&months),
            month_names_abbr: months.iter().map(|m| m.chars().take(3).collect::<String>()).collect(),
            day_names: owned(&days),
            day_names_abbr: days.iter().map(|d| d.chars().take(3).collect::<String>()).collect(),
            am_designator: "AM".to_string(),
            pm_designator: "PM".to_string(),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_cultures() {
        let names: Vec<_> = builtin_names().collect();
        assert_eq!(names, vec!["de", "en", "es", "fr", "it", "ja", "ru"]);

        let de = builtin("de").unwrap();
        assert_eq!(de.english_name, "German");
        assert!(de.calendar.is_none());
        assert_eq!(de.pattern(PatternKind::ShortDate), None);
        assert!(de.messages.is_empty());

        assert!(builtin("xx").is_none());
    }

    #[test]
    fn test_every_builtin_is_a_valid_name() {
        for name in builtin_names() {
            let culture = builtin(name).unwrap();
            assert!(parse_culture_name(&culture.name).is_ok(), "{}", name);
            assert!(!culture.english_name.is_empty(), "{}", name);
        }
    }

    #[test]
    fn test_invariant_calendar() {
        let invariant = CalendarInfo::invariant();
        assert_eq!(invariant.month_names.len(), 12);
        assert_eq!(invariant.month_names_abbr[0], "Jan");
        assert_eq!(invariant.day_names_abbr.len(), 7);
        assert_eq!(invariant.patterns.get(PatternKind::ShortDate), "yyyy-MM-dd");
        assert_eq!(invariant.am_designator, "AM");
    }

    #[test]
    fn test_default_culture() {
        let en = default_culture();
        assert_eq!(en.name, DEFAULT_CULTURE);
        assert_eq!(en.english_name, "English");
    }

    #[test]
    fn test_parse_culture_name() {
        assert_eq!(parse_culture_name("de_CH").unwrap().to_string(), "de-CH");
        assert!(parse_culture_name("").is_err());
        assert!(parse_culture_name("not a culture").is_err());
    }

    #[test]
    fn test_derived_culture_keeps_calendar_override() {
        let de_ch = Culture::derived_from(&builtin("de").unwrap(), "de-CH");
        assert_eq!(de_ch.language().as_deref(), Some("de"));
        assert!(de_ch.calendar.is_none());
        assert!(de_ch.messages.is_empty());

        let mut custom = builtin("en").unwrap();
        custom.calendar = Some(CalendarInfo::invariant().clone());
        let derived = Culture::derived_from(&custom, "en-GB");
        assert_eq!(derived.pattern(PatternKind::ShortTime), Some("HH:mm"));
    }

    #[test]
    fn test_extend_messages_overwrites() {
        let mut culture = default_culture();
        culture.extend_messages([("hello", "Hello"), ("bye", "Bye")]);
        culture.extend_messages([("hello", "Hi")]);
        assert_eq!(culture.messages["hello"], "Hi");
        assert_eq!(culture.messages["bye"], "Bye");
    }

    #[test]
    fn test_pattern_kind_from_str() {
        assert_eq!("d".parse::<PatternKind>().unwrap(), PatternKind::ShortDate);
        assert_eq!("F".parse::<PatternKind>().unwrap(), PatternKind::FullLong);
        assert!("x".parse::<PatternKind>().is_err());
        assert_eq!(PatternKind::LongTime.to_string(), "T");
        assert_eq!(PatternKind::default(), PatternKind::FullLong);
    }

    #[test]
    fn test_culture_json_roundtrip() {
        let fr = builtin("fr").unwrap();
        let json = serde_json::to_string(&fr).unwrap();
        assert!(!json.contains("calendar"));
        let back: Culture = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fr);

        let mut custom = fr.clone();
        custom.calendar = Some(CalendarInfo::invariant().clone());
        let json = serde_json::to_string(&custom).unwrap();
        assert!(json.contains("\"d\":\"yyyy-MM-dd\""));
        assert_eq!(serde_json::from_str::<Culture>(&json).unwrap(), custom);
    }
}
