//! The host-facing bundle of localization helpers.

use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

use tracing::debug;

use crate::{
    catalog::{CultureRegistry, MessageCatalog},
    config::LocalizerConfig,
    context::CultureContext,
    culture::PatternKind,
    error::Error,
    formatter::{Formatter, PatternFormatter},
    instant::Instant,
    loader::{BuiltinCultureLoader, CultureLoader, CultureSwitcher, SwitchHandle},
    temporal::{DateInput, TemporalCodec},
};

/// Translation, culture switching and date helpers over one shared culture state.
///
/// Clones share the registry, the active culture and the configured language.
///
/// ```rust,no_run
/// use cultura::{Localizer, LocalizerConfig};
///
/// let config = LocalizerConfig::new()
///     .with_culture("en")
///     .with_message("greeting", "Hello");
/// let localizer = Localizer::from_config(config);
///
/// assert_eq!(localizer.translate("greeting"), "Hello");
/// assert_eq!(localizer.translate("unknown.key"), "unknown.key");
/// println!("{}", localizer.format_date("2013-01-31T12:34:56+0100"));
/// ```
#[derive(Clone)]
pub struct Localizer {
    registry: Arc<RwLock<CultureRegistry>>,
    switcher: CultureSwitcher,
    codec: TemporalCodec<PatternFormatter>,
    language: Arc<RwLock<Option<String>>>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    /// Creates a localizer with the built-in cultures and no configured language.
    pub fn new() -> Self {
        Self::with_loader(Arc::new(BuiltinCultureLoader))
    }

    pub fn with_loader(loader: Arc<dyn CultureLoader>) -> Self {
        let registry = Arc::new(RwLock::new(CultureRegistry::new()));
        let context = CultureContext::default();
        let switcher = CultureSwitcher::new(registry.clone(), context.clone(), loader);
        Localizer {
            registry,
            switcher,
            codec: TemporalCodec::new(PatternFormatter::new(context)),
            language: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a localizer and applies `config` without waiting for the
    /// startup culture to finish loading.
    pub fn from_config(config: LocalizerConfig) -> Self {
        let localizer = Self::new();
        localizer.apply_config(config);
        localizer
    }

    /// Activates the configured culture with its messages, if any.
    pub fn apply_config(&self, config: LocalizerConfig) -> Option<SwitchHandle> {
        let culture = config.culture?;
        Some(self.set_language(&culture.name, culture.messages))
    }

    /// Language used by [`translate`](Self::translate), if one was set.
    pub fn language(&self) -> Option<String> {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Name of the culture dates are currently formatted with.
    pub fn active_culture(&self) -> String {
        self.switcher.context().active_name()
    }

    pub fn context(&self) -> &CultureContext {
        self.switcher.context()
    }

    /// Translates `key` for the configured language, falling back to `key`
    /// itself when no language is set or no translation exists.
    pub fn translate(&self, key: &str) -> String {
        let Some(language) = self.language() else {
            return key.to_string();
        };
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry
            .lookup(key, &language)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Translates each key in order.
    pub fn translate_all<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| self.translate(key.as_ref()))
            .collect()
    }

    /// Registers messages for a culture, creating the culture if needed.
    pub fn add_culture_info<I, K, V>(&self, name: &str, messages: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_culture_info(name, messages)
    }

    /// Switches the culture used for date formatting.
    pub fn culture(&self, name: &str) -> SwitchHandle {
        self.switcher.switch(name)
    }

    /// Switches culture, makes `name` the translation language and, once the
    /// culture is available, registers `messages` for it.
    pub fn set_language(&self, name: &str, messages: BTreeMap<String, String>) -> SwitchHandle {
        debug!(culture = name, messages = messages.len(), "setting language");
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = Some(name.to_string());
        self.switcher.switch_with_messages(name, messages)
    }

    /// Formats a date (ISO-8601 text or instant) with the active culture's
    /// full date/time pattern. Unparseable text formats as the empty string.
    pub fn format_date(&self, value: impl Into<DateInput>) -> String {
        self.codec.format(value)
    }

    /// Formats a date with one of the active culture's named patterns.
    pub fn format_date_with(&self, value: impl Into<DateInput>, pattern: PatternKind) -> String {
        let formatter = self.codec.formatter().clone().with_pattern(pattern);
        formatter.format_instant(value.into().resolve())
    }

    pub fn parse_date(&self, text: &str) -> Option<Instant> {
        self.codec.parse(text)
    }
}
