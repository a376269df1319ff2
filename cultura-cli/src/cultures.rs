use cultura::{
    CultureLoader, DirectoryCultureLoader,
    culture::{builtin, builtin_names},
};
use serde::Serialize;

/// One row of the `cultures` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CultureEntry {
    pub name: String,
    pub english_name: String,
    /// `builtin`, or the file the culture was read from.
    pub source: String,
    /// Whether the culture brings its own date patterns.
    pub custom_patterns: bool,
}

/// Collect the built-in cultures plus the cultures in `cultures_dir`.
///
/// A file named like a built-in culture replaces that entry, the same way
/// `format --cultures-dir` prefers the file.
pub async fn collect_cultures(cultures_dir: Option<&str>) -> Result<Vec<CultureEntry>, String> {
    let mut entries: Vec<CultureEntry> = builtin_names()
        .filter_map(builtin)
        .map(|c| CultureEntry {
            name: c.name,
            english_name: c.english_name,
            source: "builtin".to_string(),
            custom_patterns: false,
        })
        .collect();

    if let Some(dir) = cultures_dir {
        let loader = DirectoryCultureLoader::new(dir);
        for name in loader.culture_names().await.map_err(|e| e.to_string())? {
            let culture = loader.load(&name).await.map_err(|e| e.to_string())?;
            let entry = CultureEntry {
                source: loader.culture_path(&name).display().to_string(),
                custom_patterns: culture.calendar.is_some(),
                name: culture.name,
                english_name: culture.english_name,
            };
            entries.retain(|e| e.name != entry.name);
            entries.push(entry);
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Run the cultures command: list the available cultures.
pub async fn run_cultures_command(json_output: bool, cultures_dir: Option<String>) -> Result<(), String> {
    let cultures = collect_cultures(cultures_dir.as_deref()).await?;

    if json_output {
        let text = serde_json::to_string_pretty(&cultures).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    for culture in &cultures {
        println!("{:<6} {:<24} {}", culture.name, culture.english_name, culture.source);
    }
    Ok(())
}
