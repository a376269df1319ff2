//! CLI library for testing purposes

pub mod cultures;
pub mod dates;
pub mod translate;

pub use cultures::{CultureEntry, collect_cultures};
pub use dates::{ParsedDate, parse_dates};
