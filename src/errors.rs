//! Error types for the Omni pipeline.

use thiserror::Error;

use crate::text_location::TextLocation;

/// Main error type for Omni operations.
#[derive(Error, Debug)]
pub enum OmniError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Parse error at {location}: {message}")]
    Parse { location: TextLocation, message: String },

    #[error("Invalid directive payload at {location}: {message}")]
    Directive { location: TextLocation, message: String },

    #[error("Handler for `{event}` returned an unexpected {outcome} result")]
    UnexpectedOutcome { event: String, outcome: &'static str },

    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("Field `{0}` cannot be merged from a JSON block")]
    ReservedField(String),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Omni operations.
pub type Result<T> = std::result::Result<T, OmniError>;
