//! Host-supplied localization settings.
//!
//! ```toml
//! [culture]
//! name = "de"
//!
//! [culture.messages]
//! greeting = "Hallo"
//! ```

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Settings a [`crate::Localizer`] is built from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// Culture to activate at startup. Without one, translation returns keys unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<CultureConfig>,
}

/// The startup culture and its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultureConfig {
    pub name: String,

    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl LocalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the startup culture, keeping any messages already configured.
    pub fn with_culture(mut self, name: impl Into<String>) -> Self {
        let messages = self.culture.take().map(|c| c.messages).unwrap_or_default();
        self.culture = Some(CultureConfig {
            name: name.into(),
            messages,
        });
        self
    }

    /// Adds a message for the startup culture. Ignored until a culture is set.
    pub fn with_message(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(culture) = self.culture.as_mut() {
            culture.messages.insert(key.into(), value.into());
        }
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s).map_err(Error::Parse)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        toml::from_str(s).map_err(Error::TomlParse)
    }

    /// Reads a `.json` or `.toml` config file.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            extension => Err(Error::UnsupportedFormat(format!(
                "Unsupported config file extension: {:?}.",
                extension
            ))),
        }
    }

    pub fn culture_name(&self) -> Option<&str> {
        self.culture.as_ref().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builder() {
        let config = LocalizerConfig::new()
            .with_message("ignored", "no culture yet")
            .with_culture("fr")
            .with_message("greeting", "Bonjour");
        assert_eq!(config.culture_name(), Some("fr"));
        let culture = config.culture.unwrap();
        assert_eq!(culture.messages.len(), 1);
        assert_eq!(culture.messages["greeting"], "Bonjour");
    }

    #[test]
    fn test_from_json_without_messages() {
        let config = LocalizerConfig::from_json_str(r#"{ "culture": { "name": "de" } }"#).unwrap();
        assert_eq!(config.culture_name(), Some("de"));
        assert!(config.culture.unwrap().messages.is_empty());

        let empty = LocalizerConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, LocalizerConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config = LocalizerConfig::from_toml_str(
            r#"
            [culture]
            name = "de"

            [culture.messages]
            greeting = "Hallo"
            "#,
        )
        .unwrap();
        assert_eq!(config.culture.unwrap().messages["greeting"], "Hallo");
    }

    #[test]
    fn test_read_from_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let json = temp_dir.path().join("l10n.json");
        fs::write(&json, r#"{ "culture": { "name": "ja" } }"#).unwrap();
        assert_eq!(
            LocalizerConfig::read_from(&json).unwrap().culture_name(),
            Some("ja")
        );

        let yaml = temp_dir.path().join("l10n.yaml");
        fs::write(&yaml, "culture: {}").unwrap();
        assert!(matches!(
            LocalizerConfig::read_from(&yaml),
            Err(Error::UnsupportedFormat(_))
        ));

        assert!(matches!(
            LocalizerConfig::read_from(temp_dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
