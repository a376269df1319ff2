//! All error types for the cultura crate.
//!
//! These are returned from the fallible operations (culture loading, config
//! reading, catalog registration). Date parsing is not one of them: an
//! unrecognized date string yields `None`, never an `Error`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown culture `{0}`")]
    UnknownCulture(String),

    #[error("invalid culture name `{0}`")]
    InvalidCultureName(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to load culture `{name}`: {message}")]
    CultureLoad { name: String, message: String },
}

impl Error {
    /// Creates a new culture load error
    pub fn culture_load(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CultureLoad {
            name: name.into(),
            message: message.into(),
        }
    }
}
