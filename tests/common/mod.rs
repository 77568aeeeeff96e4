//! Helpers shared by the integration tests.

#![allow(dead_code)]

use clientlog::{LogSink, Severity};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Sink that keeps every record in a bucket per severity
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    buckets: Arc<Mutex<HashMap<Severity, Vec<String>>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, severity: Severity) -> Vec<String> {
        self.buckets
            .lock()
            .unwrap()
            .get(&severity)
            .cloned()
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.buckets.lock().unwrap().values().map(Vec::len).sum()
    }

    /// Every record, in no particular order across severities
    pub fn all(&self) -> Vec<String> {
        self.buckets
            .lock()
            .unwrap()
            .values()
            .flatten()
            .cloned()
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, severity: Severity, message: &str) {
        self.buckets
            .lock()
            .unwrap()
            .entry(severity)
            .or_default()
            .push(message.to_owned());
    }
}

/// Correlation id of a record: the second word of its first line
pub fn record_id(record: &str) -> &str {
    record
        .lines()
        .next()
        .and_then(|line| line.split(' ').nth(1))
        .unwrap_or_default()
}
