//! Severity routing table.
//!
//! [`LogLevels`] holds one [`Level`] per [`EventKind`] and answers which level
//! a given record should be written at. Unknown level strings and status codes
//! outside 100-599 resolve to [`Level::Suppressed`] instead of failing. Unknown
//! keys in a serialized table are an error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{EventKind, Level, StatusClass};

/// Level per event kind, fixed once the logger is built.
///
/// # Examples
///
/// ```rust
/// use clientlog::{EventKind, Level, LogLevels, Severity, StatusClass};
///
/// let levels = LogLevels::default()
///     .with(EventKind::Response(StatusClass::ServerError), Severity::Error)
///     .with_str(EventKind::Response(StatusClass::ClientError), "bogus");
///
/// assert_eq!(levels.level_for_status(503), Level::Severity(Severity::Error));
/// assert_eq!(levels.level_for_status(404), Level::Suppressed);
/// assert_eq!(levels.level_for_status(200), Level::Severity(Severity::Info));
/// assert_eq!(levels.level_for_status(700), Level::Suppressed);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogLevels {
    #[serde(with = "level_name")]
    pub request: Level,
    #[serde(rename = "response-1xx", with = "level_name")]
    pub informational: Level,
    #[serde(rename = "response-2xx", with = "level_name")]
    pub success: Level,
    #[serde(rename = "response-3xx", with = "level_name")]
    pub redirection: Level,
    #[serde(rename = "response-4xx", with = "level_name")]
    pub client_error: Level,
    #[serde(rename = "response-5xx", with = "level_name")]
    pub server_error: Level,
    #[serde(with = "level_name")]
    pub error: Level,
}

impl LogLevels {
    /// The same level for every event kind.
    pub fn uniform(level: impl Into<Level>) -> Self {
        let level = level.into();
        Self {
            request: level,
            informational: level,
            success: level,
            redirection: level,
            client_error: level,
            server_error: level,
            error: level,
        }
    }

    /// Set the level for one event kind.
    pub fn with(mut self, kind: EventKind, level: impl Into<Level>) -> Self {
        *self.slot_mut(kind) = level.into();
        self
    }

    /// Set the level for one event kind from its name. Unknown names suppress the kind.
    pub fn with_str(self, kind: EventKind, level: &str) -> Self {
        self.with(kind, Level::parse(level))
    }

    /// Level configured for `kind`.
    pub fn level_for(&self, kind: EventKind) -> Level {
        match kind {
            EventKind::Request => self.request,
            EventKind::Response(StatusClass::Informational) => self.informational,
            EventKind::Response(StatusClass::Success) => self.success,
            EventKind::Response(StatusClass::Redirection) => self.redirection,
            EventKind::Response(StatusClass::ClientError) => self.client_error,
            EventKind::Response(StatusClass::ServerError) => self.server_error,
            EventKind::Error => self.error,
        }
    }

    /// Level for a response with the given status code.
    pub fn level_for_status(&self, code: u16) -> Level {
        EventKind::for_status(code)
            .map(|kind| self.level_for(kind))
            .unwrap_or(Level::Suppressed)
    }

    fn slot_mut(&mut self, kind: EventKind) -> &mut Level {
        match kind {
            EventKind::Request => &mut self.request,
            EventKind::Response(StatusClass::Informational) => &mut self.informational,
            EventKind::Response(StatusClass::Success) => &mut self.success,
            EventKind::Response(StatusClass::Redirection) => &mut self.redirection,
            EventKind::Response(StatusClass::ClientError) => &mut self.client_error,
            EventKind::Response(StatusClass::ServerError) => &mut self.server_error,
            EventKind::Error => &mut self.error,
        }
    }
}

/// Levels travel as plain strings; anything unrecognised becomes suppressed.
mod level_name {
    use super::*;

    pub fn serialize<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(level.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Level::parse(&name))
    }
}
