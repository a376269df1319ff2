//! The culture/message store consulted by translation helpers.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    culture::{self, Culture, DEFAULT_CULTURE, parse_culture_name},
    error::Error,
};

/// An opaque `key -> text` dictionary per culture.
pub trait MessageCatalog {
    /// Looks up the translation of `key` for `culture`.
    ///
    /// Returns `None` when there is no translation; callers usually fall back to
    /// the key itself.
    fn lookup(&self, key: &str, culture: &str) -> Option<&str>;
}

/// In-memory set of cultures, keyed by culture name.
#[derive(Debug, Clone)]
pub struct CultureRegistry {
    cultures: BTreeMap<String, Culture>,
}

impl Default for CultureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CultureRegistry {
    /// Creates a registry pre-populated with the built-in cultures.
    pub fn new() -> Self {
        let cultures = culture::builtin_names()
            .filter_map(culture::builtin)
            .map(|c| (c.name.clone(), c))
            .collect();
        CultureRegistry { cultures }
    }

    /// Creates a registry with no cultures at all.
    pub fn empty() -> Self {
        CultureRegistry {
            cultures: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Culture> {
        self.cultures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cultures.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cultures.keys().map(String::as_str)
    }

    /// Adds or replaces a culture, returning the previous one with that name.
    ///
    /// Messages already registered for the culture are kept unless `culture`
    /// carries a translation for the same key.
    pub fn insert(&mut self, mut culture: Culture) -> Option<Culture> {
        debug!(culture = %culture.name, "registering culture");
        if let Some(existing) = self.cultures.get(&culture.name) {
            let mut merged = existing.messages.clone();
            merged.append(&mut culture.messages);
            culture.messages = merged;
        }
        self.cultures.insert(culture.name.clone(), culture)
    }

    /// Merges `messages` into the culture called `name`.
    ///
    /// A culture that is not registered yet inherits the calendar override of
    /// its base language if known, otherwise that of the default culture.
    pub fn add_culture_info<I, K, V>(&mut self, name: &str, messages: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let language = parse_culture_name(name)?;
        if !self.cultures.contains_key(name) {
            let base = self
                .cultures
                .get(language.language.as_str())
                .cloned()
                .or_else(|| culture::builtin(language.language.as_str()))
                .unwrap_or_else(|| {
                    self.cultures
                        .get(DEFAULT_CULTURE)
                        .cloned()
                        .unwrap_or_else(culture::default_culture)
                });
            debug!(culture = name, base = %base.name, "creating culture");
            self.cultures
                .insert(name.to_string(), Culture::derived_from(&base, name));
        }
        if let Some(culture) = self.cultures.get_mut(name) {
            culture.extend_messages(messages);
        }
        Ok(())
    }
}

impl MessageCatalog for CultureRegistry {
    fn lookup(&self, key: &str, culture: &str) -> Option<&str> {
        if let Some(found) = self
            .cultures
            .get(culture)
            .and_then(|c| non_empty_message(c, key))
        {
            return Some(found);
        }
        let language = parse_culture_name(culture).ok()?;
        let base = language.language.as_str();
        if base == culture {
            return None;
        }
        self.cultures
            .get(base)
            .and_then(|c| non_empty_message(c, key))
    }
}

fn non_empty_message<'a>(culture: &'a Culture, key: &str) -> Option<&'a str> {
    culture
        .messages
        .get(key)
        .map(String::as_str)
        .filter(|s| !s.is_empty())
}

impl<T: MessageCatalog + ?Sized> MessageCatalog for &T {
    fn lookup(&self, key: &str, culture: &str) -> Option<&str> {
        (**self).lookup(key, culture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_builtins() {
        let registry = CultureRegistry::new();
        assert!(registry.contains("en"));
        assert!(registry.contains("fr"));
        assert!(CultureRegistry::empty().names().next().is_none());
    }

    #[test]
    fn test_add_culture_info_and_lookup() {
        let mut registry = CultureRegistry::new();
        registry
            .add_culture_info("de", [("greeting", "Hallo")])
            .unwrap();
        assert_eq!(registry.lookup("greeting", "de"), Some("Hallo"));
        assert_eq!(registry.lookup("greeting", "fr"), None);
        assert_eq!(registry.lookup("missing", "de"), None);
    }

    #[test]
    fn test_add_culture_info_creates_culture_from_base_language() {
        let mut registry = CultureRegistry::new();
        let mut custom = culture::builtin("de").unwrap();
        custom.calendar = Some(culture::CalendarInfo::invariant().clone());
        registry.insert(custom);

        registry
            .add_culture_info("de-CH", [("greeting", "Grüezi")])
            .unwrap();
        let de_ch = registry.get("de-CH").unwrap();
        assert_eq!(de_ch.name, "de-CH");
        assert!(de_ch.calendar.is_some());
        assert_eq!(registry.lookup("greeting", "de-CH"), Some("Grüezi"));
    }

    #[test]
    fn test_unknown_language_gets_plain_culture() {
        let mut registry = CultureRegistry::new();
        registry
            .add_culture_info("sv", [("greeting", "Hej")])
            .unwrap();
        let sv = registry.get("sv").unwrap();
        assert!(sv.calendar.is_none());
        assert_eq!(registry.lookup("greeting", "sv"), Some("Hej"));
    }

    #[test]
    fn test_add_culture_info_rejects_invalid_name() {
        let mut registry = CultureRegistry::new();
        let err = registry
            .add_culture_info("not a culture", [("k", "v")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCultureName(_)));
    }

    #[test]
    fn test_lookup_falls_back_to_base_language() {
        let mut registry = CultureRegistry::new();
        registry.add_culture_info("de", [("greeting", "Hallo")]).unwrap();
        registry
            .add_culture_info("de-AT", [("farewell", "Servus")])
            .unwrap();
        assert_eq!(registry.lookup("farewell", "de-AT"), Some("Servus"));
        assert_eq!(registry.lookup("greeting", "de-AT"), Some("Hallo"));
        assert_eq!(registry.lookup("greeting", "de-CH"), Some("Hallo"));
    }

    #[test]
    fn test_empty_translation_is_falsy() {
        let mut registry = CultureRegistry::new();
        registry.add_culture_info("fr", [("blank", "")]).unwrap();
        assert_eq!(registry.lookup("blank", "fr"), None);
    }

    #[test]
    fn test_insert_keeps_existing_messages() {
        let mut registry = CultureRegistry::new();
        registry.add_culture_info("it", [("a", "uno"), ("b", "due")]).unwrap();

        let mut reloaded = culture::builtin("it").unwrap();
        reloaded.extend_messages([("b", "DUE")]);
        assert!(registry.insert(reloaded).is_some());

        assert_eq!(registry.lookup("a", "it"), Some("uno"));
        assert_eq!(registry.lookup("b", "it"), Some("DUE"));
    }
}
