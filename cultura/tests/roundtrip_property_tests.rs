use cultura::{CalendarInfo, Instant, Localizer, PatternKind, format_with_pattern, parse};
use proptest::prelude::*;

// 0001-01-01T00:00:00.000Z ..= 9998-12-31T23:59:59.999Z, leaving a day of
// headroom on both sides for offsets.
const MIN_MILLIS: i64 = -62_135_596_800_000;
const MAX_MILLIS: i64 = 253_370_764_799_999;

fn instant_strategy() -> impl Strategy<Value = Instant> {
    (MIN_MILLIS..=MAX_MILLIS).prop_map(Instant::from_millis)
}

fn offset_strategy() -> impl Strategy<Value = (bool, i64, i64)> {
    (any::<bool>(), 0i64..24, 0i64..60)
}

/// Writes `instant` as the wall-clock time of a zone `sign hh:mm` away from UTC.
fn local_text(instant: Instant, ahead: bool, hours: i64, minutes: i64) -> String {
    let shift = (hours * 60 + minutes) * if ahead { 1 } else { -1 };
    let local = instant.checked_add_minutes(shift).expect("in range");
    let wall = format_with_pattern(local, CalendarInfo::invariant(), "yyyy-MM-dd'T'HH:mm:ss.fff");
    format!(
        "{}{}{:02}{:02}",
        wall,
        if ahead { '+' } else { '-' },
        hours,
        minutes
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn iso_string_roundtrips(instant in instant_strategy()) {
        prop_assert_eq!(parse(&instant.to_iso_string()), Some(instant));
    }

    #[test]
    fn whole_seconds_roundtrip_without_fraction(instant in instant_strategy()) {
        let whole = Instant::from_millis(instant.as_millis().div_euclid(1_000) * 1_000);
        let iso = whole.to_iso_string();
        let without_fraction = format!("{}Z", &iso[..19]);
        prop_assert_eq!(parse(&without_fraction), Some(whole));
    }

    #[test]
    fn offsets_normalize_to_utc(instant in instant_strategy(), (ahead, hours, minutes) in offset_strategy()) {
        let text = local_text(instant, ahead, hours, minutes);
        prop_assert_eq!(parse(&text), Some(instant), "text: {}", text);
    }

    #[test]
    fn non_dates_are_none(text in "[^0-9].{0,40}") {
        prop_assert_eq!(parse(&text), None);
    }

    #[test]
    fn format_then_parse_is_idempotent(instant in instant_strategy()) {
        let localizer = Localizer::new();
        let text = format_with_pattern(instant, CalendarInfo::invariant(), "yyyy-MM-dd'T'HH:mm:ss.fff");
        let reparsed = localizer.parse_date(&text);
        prop_assert_eq!(reparsed, Some(instant));
        prop_assert_eq!(
            localizer.format_date_with(text.as_str(), PatternKind::ShortDate),
            localizer.format_date_with(instant, PatternKind::ShortDate)
        );
    }
}

#[test]
fn documented_examples() {
    let cases = [
        ("2013-01-31T12:34", "2013-01-31T12:34:00.000Z"),
        ("2013-01-31T12:34:56", "2013-01-31T12:34:56.000Z"),
        ("2013-01-31T12:34:56.78", "2013-01-31T12:34:56.780Z"),
        ("2013-01-31T12:34:56.78+0100", "2013-01-31T11:34:56.780Z"),
        ("2013-01-31T12:34:56.78+0530", "2013-01-31T07:04:56.780Z"),
        ("2013-01-31T12:34:56.78-0330", "2013-01-31T16:04:56.780Z"),
        ("2013-01-31T12:34:56-0330", "2013-01-31T16:04:56.000Z"),
        ("2013-01-31T12:34:56Z", "2013-01-31T12:34:56.000Z"),
    ];
    for (input, expected) in cases {
        let parsed = parse(input).unwrap_or_else(|| panic!("failed to parse {}", input));
        assert_eq!(parsed.to_iso_string(), expected, "input: {}", input);
    }
    assert_eq!(parse("not-a-date"), None);
}
