//! The shared logging core behind [`LoggedClient`](crate::LoggedClient) and
//! [`ClientLoggerLayer`](crate::ClientLoggerLayer).

use http::{Request, Response};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::body::BodyContent;
use crate::formatter::{MessageFormatter, RawHttpFormatter};
use crate::id::{IdGenerator, UniqueIdGenerator};
use crate::levels::LogLevels;
use crate::sink::LogSink;
use crate::types::{EventKind, Level, Severity};

/// Formats, routes and emits the records for one exchange at a time.
///
/// An `HttpLogger` is immutable once built and is shared behind an [`Arc`] by
/// every client or service that uses it.
///
/// # Examples
///
/// ```rust
/// use clientlog::{EventKind, HttpLogger, LogLevels, RawHttpFormatter, Severity, TracingSink, UuidGenerator};
///
/// let logger = HttpLogger::new(TracingSink)
///     .with_levels(LogLevels::default().with(EventKind::Error, Severity::Critical))
///     .with_id_generator(UuidGenerator)
///     .with_formatter(RawHttpFormatter::new().with_host_header(true));
/// ```
pub struct HttpLogger<F = RawHttpFormatter> {
    levels: LogLevels,
    formatter: F,
    ids: Arc<dyn IdGenerator>,
    sink: Arc<dyn LogSink>,
}

impl HttpLogger {
    /// Logger writing to `sink` with every level at `info`, the
    /// [`UniqueIdGenerator`] and the [`RawHttpFormatter`].
    pub fn new<S: LogSink>(sink: S) -> Self {
        Self {
            levels: LogLevels::default(),
            formatter: RawHttpFormatter::default(),
            ids: Arc::new(UniqueIdGenerator),
            sink: Arc::new(sink),
        }
    }
}

impl<F: MessageFormatter> HttpLogger<F> {
    /// Replace the level table.
    pub fn with_levels(mut self, levels: LogLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Use `ids` to mint correlation ids.
    pub fn with_id_generator<G: IdGenerator>(mut self, ids: G) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Swap the formatter, keeping levels, id source and sink.
    pub fn with_formatter<F2: MessageFormatter>(self, formatter: F2) -> HttpLogger<F2> {
        HttpLogger {
            levels: self.levels,
            formatter,
            ids: self.ids,
            sink: self.sink,
        }
    }

    /// The level table records are routed by.
    pub fn levels(&self) -> &LogLevels {
        &self.levels
    }

    /// The formatter rendering each record.
    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Mint a correlation id and emit the request record.
    ///
    /// Returns the id for the matching [`log_response`](Self::log_response) or
    /// [`log_error`](Self::log_error) call.
    pub fn log_request<B: BodyContent>(&self, request: &Request<B>) -> String {
        let correlation_id = self.ids.generate();
        debug!(correlation_id = %correlation_id, method = %request.method(), uri = %request.uri(), "Logging request");
        self.emit(
            self.levels.level_for(EventKind::Request),
            || self.formatter.request(request, &correlation_id),
        );
        correlation_id
    }

    /// Emit the response record at the level configured for its status class.
    pub fn log_response<B: BodyContent>(&self, response: &Response<B>, correlation_id: &str) {
        let status = response.status().as_u16();
        debug!(correlation_id = %correlation_id, status, "Logging response");
        self.emit(self.levels.level_for_status(status), || {
            self.formatter.response(response, correlation_id)
        });
    }

    /// Emit the error record for a failed exchange.
    pub fn log_error(&self, error: &(dyn Error + 'static), correlation_id: &str) {
        debug!(correlation_id = %correlation_id, error = %error, "Logging transport error");
        self.emit(self.levels.level_for(EventKind::Error), || {
            self.formatter.error(error, correlation_id)
        });
    }

    /// Suppressed records are never formatted.
    fn emit(&self, level: Level, record: impl FnOnce() -> String) {
        let Level::Severity(severity) = level else {
            return;
        };
        let message = record();
        match severity {
            Severity::Debug => self.sink.debug(&message),
            Severity::Info => self.sink.info(&message),
            Severity::Notice => self.sink.notice(&message),
            Severity::Warning => self.sink.warning(&message),
            Severity::Error => self.sink.error(&message),
            Severity::Critical => self.sink.critical(&message),
            Severity::Alert => self.sink.alert(&message),
            Severity::Emergency => self.sink.emergency(&message),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for HttpLogger<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLogger")
            .field("levels", &self.levels)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
