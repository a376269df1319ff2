use cultura::{Localizer, LocalizerConfig};

/// Run the translate command: look keys up with the culture named in a config file.
pub async fn run_translate_command(keys: Vec<String>, config: String) -> Result<(), String> {
    let config = LocalizerConfig::read_from(&config).map_err(|e| format!("{}: {}", config, e))?;

    let localizer = Localizer::new();
    if let Some(handle) = localizer.apply_config(config) {
        handle.wait().await.map_err(|e| e.to_string())?;
    }

    for translation in localizer.translate_all(&keys) {
        println!("{}", translation);
    }
    Ok(())
}
