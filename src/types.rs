//! Severity and event-kind types used to route log records.
//!
//! This module contains the closed set of severities a [`LogSink`](crate::LogSink)
//! understands, the [`Level`] pseudo-level that adds "suppressed" on top of them,
//! and the [`EventKind`] keys that a [`LogLevels`](crate::LogLevels) table is
//! indexed by.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseEventKindError, ParseSeverityError};

/// Log severities, ordered from least to most severe.
///
/// Names are the lowercase forms only; `"Warning"` is not a severity.
///
/// # Examples
///
/// ```rust
/// use clientlog::Severity;
///
/// assert!(Severity::Debug < Severity::Emergency);
/// assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
/// assert_eq!(Severity::Notice.to_string(), "notice");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Detailed debug information.
    Debug,
    /// Interesting events.
    Info,
    /// Normal but significant events.
    Notice,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Runtime errors that do not require immediate action.
    Error,
    /// Critical conditions.
    Critical,
    /// Action must be taken immediately.
    Alert,
    /// System is unusable.
    Emergency,
}

impl Severity {
    /// Every severity, least severe first.
    pub const ALL: [Severity; 8] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Alert,
        Severity::Emergency,
    ];

    /// Lowercase name of the severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Alert => "alert",
            Severity::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| ParseSeverityError(s.to_owned()))
    }
}

/// A configured level: either a concrete [`Severity`] or suppressed.
///
/// Records routed to [`Level::Suppressed`] never reach the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Drop the record.
    Suppressed,
    /// Forward the record to the sink at this severity.
    Severity(Severity),
}

impl Level {
    /// Parse a level name, degrading anything unrecognised to [`Level::Suppressed`].
    ///
    /// ```rust
    /// use clientlog::{Level, Severity};
    ///
    /// assert_eq!(Level::parse("alert"), Level::Severity(Severity::Alert));
    /// assert_eq!(Level::parse("loud"), Level::Suppressed);
    /// ```
    pub fn parse(s: &str) -> Self {
        s.parse::<Severity>()
            .map(Level::Severity)
            .unwrap_or(Level::Suppressed)
    }

    /// Name of the level; `"none"` for [`Level::Suppressed`].
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Suppressed => "none",
            Level::Severity(severity) => severity.as_str(),
        }
    }

    /// The severity to write at, or `None` when suppressed.
    pub fn severity(self) -> Option<Severity> {
        match self {
            Level::Suppressed => None,
            Level::Severity(severity) => Some(severity),
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Severity(Severity::Info)
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        Level::Severity(severity)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response status class, keyed by the leading digit of the status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl StatusClass {
    /// Every class, 1xx first.
    pub const ALL: [StatusClass; 5] = [
        StatusClass::Informational,
        StatusClass::Success,
        StatusClass::Redirection,
        StatusClass::ClientError,
        StatusClass::ServerError,
    ];

    /// Class of a status code, or `None` outside 100-599.
    pub fn from_status(code: u16) -> Option<Self> {
        match code {
            100..=199 => Some(StatusClass::Informational),
            200..=299 => Some(StatusClass::Success),
            300..=399 => Some(StatusClass::Redirection),
            400..=499 => Some(StatusClass::ClientError),
            500..=599 => Some(StatusClass::ServerError),
            _ => None,
        }
    }

    /// Leading digit shared by every code in the class.
    pub fn digit(self) -> u8 {
        match self {
            StatusClass::Informational => 1,
            StatusClass::Success => 2,
            StatusClass::Redirection => 3,
            StatusClass::ClientError => 4,
            StatusClass::ServerError => 5,
        }
    }
}

/// The kind of event a record describes.
///
/// Displays as the configuration key used for it: `request`, `response-1xx`
/// through `response-5xx`, and `error`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The outgoing request.
    Request,
    /// A response, partitioned by status class.
    Response(StatusClass),
    /// A transport failure.
    Error,
}

impl EventKind {
    /// Every event kind in configuration order.
    pub const ALL: [EventKind; 7] = [
        EventKind::Request,
        EventKind::Response(StatusClass::Informational),
        EventKind::Response(StatusClass::Success),
        EventKind::Response(StatusClass::Redirection),
        EventKind::Response(StatusClass::ClientError),
        EventKind::Response(StatusClass::ServerError),
        EventKind::Error,
    ];

    /// Event kind for a response with the given status code.
    pub fn for_status(code: u16) -> Option<Self> {
        StatusClass::from_status(code).map(EventKind::Response)
    }

    /// Configuration key naming this kind.
    pub fn key(self) -> &'static str {
        match self {
            EventKind::Request => "request",
            EventKind::Response(StatusClass::Informational) => "response-1xx",
            EventKind::Response(StatusClass::Success) => "response-2xx",
            EventKind::Response(StatusClass::Redirection) => "response-3xx",
            EventKind::Response(StatusClass::ClientError) => "response-4xx",
            EventKind::Response(StatusClass::ServerError) => "response-5xx",
            EventKind::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| ParseEventKindError(s.to_owned()))
    }
}
