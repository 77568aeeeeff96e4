//! File-based logger configuration.
//!
//! ```toml
//! host_header = true
//! id_format = "uuid"
//!
//! [levels]
//! request = "debug"
//! response-2xx = "debug"
//! response-4xx = "warning"
//! response-5xx = "error"
//! error = "critical"
//! ```
//!
//! Every key is optional. Levels that are left out default to `info`, and a
//! level string that names no severity silences that event kind instead of
//! rejecting the file. Unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::formatter::RawHttpFormatter;
use crate::id::{UniqueIdGenerator, UuidGenerator};
use crate::levels::LogLevels;
use crate::logger::HttpLogger;
use crate::sink::LogSink;

/// Which built-in correlation id generator to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFormat {
    /// [`UniqueIdGenerator`]
    #[default]
    Unique,
    /// [`UuidGenerator`]
    Uuid,
}

/// Configuration for building an [`HttpLogger`] with the built-in formatter
/// and id generators.
///
/// # Examples
///
/// ```rust
/// use clientlog::{Level, LoggerConfig, Severity, TracingSink};
///
/// let config = LoggerConfig::from_toml_str(r#"
///     [levels]
///     response-5xx = "alert"
/// "#).unwrap();
///
/// assert_eq!(config.levels.server_error, Level::Severity(Severity::Alert));
/// let logger = config.into_logger(TracingSink);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub levels: LogLevels,
    pub id_format: IdFormat,
    /// Synthesize a `host` line for absolute request URIs without a `Host` header.
    pub host_header: bool,
}

impl LoggerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Build a logger writing to `sink` with the configured levels, id
    /// format and host line.
    pub fn into_logger<S: LogSink>(self, sink: S) -> HttpLogger {
        let logger = HttpLogger::new(sink)
            .with_levels(self.levels)
            .with_formatter(RawHttpFormatter::new().with_host_header(self.host_header));
        match self.id_format {
            IdFormat::Unique => logger.with_id_generator(UniqueIdGenerator),
            IdFormat::Uuid => logger.with_id_generator(UuidGenerator),
        }
    }
}
