//! Rendering of requests, responses and transport errors into log records.
//!
//! A record is a flat block of text. [`RawHttpFormatter`] writes messages the
//! way they would look on the wire, prefixed with a line naming the record and
//! its correlation id:
//!
//! ```text
//! Request 0000000065f1c2a00000002a
//! POST https://api.io/users HTTP/1.1
//! content-type: application/json
//!
//! {"name":"Tyler"}
//! ```

use http::header::HOST;
use http::{HeaderMap, Request, Response, Version};
use std::error::Error;
use std::fmt::Write;

use crate::body::{body_text, BodyContent};

/// Reason phrase to report for a response instead of the status code's
/// canonical one.
///
/// Transports that receive a custom phrase from the server can store it in the
/// response extensions:
///
/// ```rust
/// use clientlog::ReasonPhrase;
///
/// let mut response = http::Response::new(());
/// *response.status_mut() = http::StatusCode::MOVED_PERMANENTLY;
/// response.extensions_mut().insert(ReasonPhrase::from("Found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonPhrase(String);

impl ReasonPhrase {
    /// The phrase text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReasonPhrase {
    fn from(phrase: &str) -> Self {
        Self(phrase.to_owned())
    }
}

impl From<String> for ReasonPhrase {
    fn from(phrase: String) -> Self {
        Self(phrase)
    }
}

/// Renders the three kinds of record.
///
/// The correlation id is passed in so that a request record and its paired
/// response or error record can be matched in the log output.
pub trait MessageFormatter: Send + Sync + 'static {
    fn request<B: BodyContent>(&self, request: &Request<B>, id: &str) -> String;

    fn response<B: BodyContent>(&self, response: &Response<B>, id: &str) -> String;

    fn error(&self, error: &(dyn Error + 'static), id: &str) -> String;
}

/// Formats messages as raw HTTP text.
///
/// Headers are written in header map order, one line per name with multiple
/// values joined by `", "`, followed by a blank line and the full body.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHttpFormatter {
    host_header: bool,
}

impl RawHttpFormatter {
    /// Formatter without the synthesized `host` line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a leading `host` line derived from the URI authority when the
    /// request is absolute and carries no `Host` header of its own. The port is
    /// left out when it is the scheme's default.
    pub fn with_host_header(mut self, enabled: bool) -> Self {
        self.host_header = enabled;
        self
    }
}

impl MessageFormatter for RawHttpFormatter {
    fn request<B: BodyContent>(&self, request: &Request<B>, id: &str) -> String {
        let mut log = format!("Request {id}\n");
        let _ = writeln!(
            log,
            "{} {} HTTP/{}",
            request.method(),
            request.uri(),
            version_str(request.version())
        );

        if self.host_header && !request.headers().contains_key(HOST) {
            let uri = request.uri();
            if let Some(host) = uri.host() {
                let port = uri.port_u16().filter(|port| !is_default_port(uri, *port));
                match port {
                    Some(port) => {
                        let _ = writeln!(log, "host: {host}:{port}");
                    }
                    None => {
                        let _ = writeln!(log, "host: {host}");
                    }
                }
            }
        }

        write_headers(&mut log, request.headers());
        log.push('\n');
        log.push_str(&body_text(request.body()));
        log
    }

    fn response<B: BodyContent>(&self, response: &Response<B>, id: &str) -> String {
        let status = response.status();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(ReasonPhrase::as_str)
            .or_else(|| status.canonical_reason())
            .unwrap_or_default();

        let mut log = format!("Response {id}\n");
        let _ = writeln!(
            log,
            "HTTP/{} {} {}",
            version_str(response.version()),
            status.as_u16(),
            reason
        );
        write_headers(&mut log, response.headers());
        log.push('\n');
        log.push_str(&body_text(response.body()));
        log
    }

    fn error(&self, error: &(dyn Error + 'static), id: &str) -> String {
        format!("Connection {id}\nError: {error}")
    }
}

fn is_default_port(uri: &http::Uri, port: u16) -> bool {
    matches!((uri.scheme_str(), port), (Some("http"), 80) | (Some("https"), 443))
}

fn write_headers(log: &mut String, headers: &HeaderMap) {
    for name in headers.keys() {
        let values: Vec<_> = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect();
        let _ = writeln!(log, "{}: {}", name, values.join(", "));
    }
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_11 => "1.1",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}
