use std::sync::Arc;

use cultura::{
    BuiltinCultureLoader, CultureLoader, DirectoryCultureLoader, Instant, Localizer, PatternKind,
    parse,
};
use serde::Serialize;
use tracing::debug;

/// One line of `parse --json` output.
#[derive(Debug, Serialize)]
pub struct ParsedDate {
    pub input: String,
    pub instant: Option<Instant>,
    pub millis: Option<i64>,
}

pub fn parse_dates(inputs: &[String]) -> Vec<ParsedDate> {
    inputs
        .iter()
        .map(|input| {
            let instant = parse(input);
            ParsedDate {
                input: input.clone(),
                instant,
                millis: instant.map(Instant::as_millis),
            }
        })
        .collect()
}

/// Run the parse command: print each input as a normalized UTC timestamp.
pub fn run_parse_command(inputs: Vec<String>, json_output: bool) -> Result<(), String> {
    let parsed = parse_dates(&inputs);
    let failures = parsed.iter().filter(|p| p.instant.is_none()).count();

    if json_output {
        let body = serde_json::to_string_pretty(&parsed).map_err(|e| e.to_string())?;
        println!("{}", body);
    } else {
        for date in &parsed {
            match date.instant {
                Some(instant) => println!("{}", instant),
                None => eprintln!("invalid date: {}", date.input),
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} input(s) could not be parsed", failures));
    }
    Ok(())
}

/// Run the format command: render one date with a culture's named pattern.
pub async fn run_format_command(
    input: String,
    culture: String,
    pattern: String,
    cultures_dir: Option<String>,
) -> Result<(), String> {
    let pattern: PatternKind = pattern.parse().map_err(|e: cultura::Error| e.to_string())?;
    let loader: Arc<dyn CultureLoader> = match cultures_dir {
        Some(dir) => Arc::new(DirectoryCultureLoader::new(dir)),
        None => Arc::new(BuiltinCultureLoader),
    };

    let localizer = Localizer::with_loader(loader);
    localizer
        .culture(&culture)
        .wait()
        .await
        .map_err(|e| e.to_string())?;
    debug!(culture = %localizer.active_culture(), %pattern, "formatting");

    let Some(instant) = localizer.parse_date(&input) else {
        return Err(format!("invalid date: {}", input));
    };
    println!("{}", localizer.format_date_with(instant, pattern));
    Ok(())
}
