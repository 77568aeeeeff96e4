//! Destinations for log records.
//!
//! A [`LogSink`] receives finished records at one of eight severities. The
//! [`TracingSink`] forwards them to the `tracing` ecosystem; implement the
//! trait yourself to write anywhere else.

use tracing::{debug, error, info, warn};

use crate::types::Severity;

/// Severity-keyed write interface for finished records.
///
/// Only [`log`](LogSink::log) is required. The logger always calls the method
/// named after the record's severity, so implementations may override single
/// methods to treat one severity specially.
///
/// Sinks handle their own failures; the logger never sees them.
///
/// # Examples
///
/// ```rust
/// use clientlog::{LogSink, Severity};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct StderrSink {
///     lines: Mutex<usize>,
/// }
///
/// impl LogSink for StderrSink {
///     fn log(&self, severity: Severity, message: &str) {
///         *self.lines.lock().unwrap() += 1;
///         eprintln!("[{severity}] {message}");
///     }
/// }
/// ```
pub trait LogSink: Send + Sync + 'static {
    fn log(&self, severity: Severity, message: &str);

    fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    fn notice(&self, message: &str) {
        self.log(Severity::Notice, message);
    }

    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }

    fn alert(&self, message: &str) {
        self.log(Severity::Alert, message);
    }

    fn emergency(&self, message: &str) {
        self.log(Severity::Emergency, message);
    }
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }

    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn notice(&self, message: &str) {
        (**self).notice(message);
    }

    fn warning(&self, message: &str) {
        (**self).warning(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }

    fn critical(&self, message: &str) {
        (**self).critical(message);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn emergency(&self, message: &str) {
        (**self).emergency(message);
    }
}

/// Writes records as `tracing` events.
///
/// `tracing` has fewer levels than [`Severity`], so severities are folded:
///
/// | severity | tracing level |
/// |----------|---------------|
/// | debug | `DEBUG` |
/// | info, notice | `INFO` |
/// | warning | `WARN` |
/// | error, critical, alert, emergency | `ERROR` |
///
/// The exact severity is kept in the `severity` field of every event.
///
/// ```rust,no_run
/// use clientlog::{HttpLogger, TracingSink};
///
/// let logger = HttpLogger::new(TracingSink);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => debug!(severity = %severity, "{message}"),
            Severity::Info | Severity::Notice => info!(severity = %severity, "{message}"),
            Severity::Warning => warn!(severity = %severity, "{message}"),
            Severity::Error | Severity::Critical | Severity::Alert | Severity::Emergency => {
                error!(severity = %severity, "{message}")
            }
        }
    }
}
