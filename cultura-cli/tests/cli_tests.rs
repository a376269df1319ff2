use std::fs;

use cultura_cli::{CultureEntry, ParsedDate, collect_cultures, parse_dates};
use tempfile::TempDir;

#[test]
fn test_parse_dates_reports_each_input() {
    let inputs = vec![
        "2013-01-31T12:34:56.78+0100".to_string(),
        "not-a-date".to_string(),
    ];
    let parsed: Vec<ParsedDate> = parse_dates(&inputs);
    assert_eq!(parsed.len(), 2);

    assert_eq!(parsed[0].input, "2013-01-31T12:34:56.78+0100");
    assert_eq!(
        parsed[0].instant.unwrap().to_iso_string(),
        "2013-01-31T11:34:56.780Z"
    );
    assert_eq!(parsed[0].millis, Some(1_359_632_096_780));

    assert!(parsed[1].instant.is_none());
    assert!(parsed[1].millis.is_none());
}

#[test]
fn test_parsed_date_json_shape() {
    let parsed = parse_dates(&["2013-01-31T12:34Z".to_string(), "nope".to_string()]);
    let v = serde_json::to_value(&parsed).unwrap();
    assert_eq!(v[0]["instant"], "2013-01-31T12:34:00.000Z");
    assert_eq!(v[0]["millis"], 1_359_635_640_000i64);
    assert!(v[1]["instant"].is_null());
    assert!(v[1]["millis"].is_null());
}

#[tokio::test]
async fn test_collect_cultures_builtins_only() {
    let cultures = collect_cultures(None).await.unwrap();
    let names: Vec<_> = cultures.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["de", "en", "es", "fr", "it", "ja", "ru"]);
    assert!(cultures.iter().all(|c| c.source == "builtin" && !c.custom_patterns));
}

#[tokio::test]
async fn test_collect_cultures_includes_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("en-GB.json"),
        r#"{ "name": "en-GB", "english_name": "English (United Kingdom)" }"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("fr.json"),
        r#"{ "name": "fr", "english_name": "French (custom)" }"#,
    )
    .unwrap();

    let cultures = collect_cultures(temp_dir.path().to_str()).await.unwrap();
    let en_gb: &CultureEntry = cultures.iter().find(|c| c.name == "en-GB").unwrap();
    assert_eq!(en_gb.english_name, "English (United Kingdom)");
    assert!(en_gb.source.ends_with("en-GB.json"));

    let fr: Vec<_> = cultures.iter().filter(|c| c.name == "fr").collect();
    assert_eq!(fr.len(), 1);
    assert_eq!(fr[0].english_name, "French (custom)");
    assert_eq!(cultures.len(), 8);
}

#[tokio::test]
async fn test_collect_cultures_missing_directory_fails() {
    let err = collect_cultures(Some("/nonexistent/cultures")).await.unwrap_err();
    assert!(err.contains("I/O error"), "{}", err);
}
