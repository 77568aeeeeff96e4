//! Error types for parsing and configuration.
//!
//! Transport errors never appear here: the decorator hands them back to the
//! caller exactly as the wrapped client produced them.

use std::path::PathBuf;

/// A string that does not name any [`Severity`](crate::Severity).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`")]
pub struct ParseSeverityError(pub(crate) String);

/// A string that is not an event-kind key such as `request` or `response-2xx`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind `{0}`")]
pub struct ParseEventKindError(pub(crate) String);

/// Error loading a [`LoggerConfig`](crate::LoggerConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
