#![forbid(unsafe_code)]
//! Culture switching, message translation and ISO-8601 dates for Rust applications.
//!
//! At the center is a small codec that turns restricted ISO-8601 strings
//! (`YYYY-MM-DDTHH:mm[:ss[.fff]][(+|-)hhmm]`) into UTC instants and renders
//! instants back through a culture-aware formatter. Around it sit the pieces a
//! host application needs to use it: a culture registry with message catalogs,
//! an explicit active-culture context and asynchronous culture loading.
//!
//! # Quick Start
//!
//! ```rust
//! use cultura::{Localizer, PatternKind, parse};
//!
//! // Parsing is pure and never fails loudly
//! let instant = parse("2013-01-31T12:34:56.78+0100").unwrap();
//! assert_eq!(instant.to_iso_string(), "2013-01-31T11:34:56.780Z");
//! assert!(parse("not-a-date").is_none());
//!
//! // Formatting follows the active culture
//! let localizer = Localizer::new();
//! assert_eq!(localizer.format_date_with(instant, PatternKind::ShortDate), "1/31/13");
//! ```
//!
//! # Features
//!
//! - Pure ISO-8601 parsing with offset normalization and calendar roll-over
//! - Message catalogs with base-language fallback
//! - Locale display text from CLDR data (`icu`), with pattern overrides from JSON files
//! - Culture switching as an awaitable background task

pub mod catalog;
pub mod config;
pub mod context;
pub mod culture;
pub mod error;
pub mod formatter;
pub mod instant;
pub mod loader;
pub mod localizer;
pub mod temporal;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{CultureRegistry, MessageCatalog},
    config::{CultureConfig, LocalizerConfig},
    context::CultureContext,
    culture::{CalendarInfo, Culture, DEFAULT_CULTURE, PatternKind},
    error::Error,
    formatter::{
        Formatter, PatternFormatter, format_for_culture, format_with_locale, format_with_pattern,
    },
    instant::Instant,
    loader::{BuiltinCultureLoader, CultureLoader, CultureSwitcher, DirectoryCultureLoader, SwitchHandle},
    localizer::Localizer,
    temporal::{DateInput, TemporalCodec, format, parse},
};
