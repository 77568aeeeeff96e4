//! Composite sink for writing every record to several destinations.
//!
//! # Example
//!
//! ```rust
//! use clientlog::{HttpLogger, MultiSink, TracingSink};
//!
//! let sink = MultiSink::new().with(TracingSink);
//! let logger = HttpLogger::new(sink);
//! ```

use crate::sink::LogSink;
use crate::types::Severity;

/// A sink that forwards each record to every inner sink, in the order they
/// were added.
///
/// Each inner sink receives the call for the record's own severity, so
/// per-severity overrides on the inner sinks are honoured.
pub struct MultiSink {
    sinks: Vec<Box<dyn LogSink>>,
}

impl MultiSink {
    /// Create a new empty MultiSink.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink to the fan-out. Returns self for builder pattern.
    pub fn with<S: LogSink>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for MultiSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MultiSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl LogSink for MultiSink {
    fn log(&self, severity: Severity, message: &str) {
        for sink in &self.sinks {
            match severity {
                Severity::Debug => sink.debug(message),
                Severity::Info => sink.info(message),
                Severity::Notice => sink.notice(message),
                Severity::Warning => sink.warning(message),
                Severity::Error => sink.error(message),
                Severity::Critical => sink.critical(message),
                Severity::Alert => sink.alert(message),
                Severity::Emergency => sink.emergency(message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Test sink that counts calls
    struct CountingSink {
        count: Arc<AtomicUsize>,
    }

    impl LogSink for CountingSink {
        fn log(&self, _severity: Severity, _message: &str) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Sink that only overrides `alert`
    struct AlertOnly {
        alerts: Arc<Mutex<Vec<String>>>,
    }

    impl LogSink for AlertOnly {
        fn log(&self, _severity: Severity, _message: &str) {}

        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_owned());
        }
    }

    #[test]
    fn test_multi_sink_empty() {
        let sink = MultiSink::new();
        assert!(sink.is_empty());
        assert_eq!(sink.len(), 0);

        // Should not panic with no sinks
        sink.info("nobody listens");
    }

    #[test]
    fn test_multi_sink_fans_out() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let sink = MultiSink::new()
            .with(CountingSink { count: first.clone() })
            .with(CountingSink { count: second.clone() });
        assert_eq!(sink.len(), 2);

        sink.info("one");
        sink.emergency("two");

        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_multi_sink_uses_severity_methods() {
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let sink = MultiSink::new().with(AlertOnly { alerts: alerts.clone() });

        sink.critical("ignored");
        sink.alert("kept");

        assert_eq!(*alerts.lock().unwrap(), vec!["kept".to_owned()]);
    }
}
