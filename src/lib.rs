//! # clientlog
//!
//! A decorator for HTTP clients that logs every outgoing request, its response
//! or its transport error as a raw-HTTP text record, at a severity chosen per
//! event kind, without changing what the caller sends or receives.
//!
//! ## Features
//!
//! - **Correlated records**: a request record and its response or error record
//!   share one correlation id
//! - **Severity routing**: separate levels for the request, each response status
//!   class (1xx-5xx) and transport errors; misconfigured levels silence the
//!   record instead of failing
//! - **Two shapes**: [`LoggedClient`] wraps anything implementing [`HttpClient`],
//!   [`ClientLoggerLayer`] wraps any `tower` service
//! - **Pluggable**: bring your own [`LogSink`], [`MessageFormatter`] or
//!   [`IdGenerator`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use clientlog::{EventKind, HttpClient, HttpLogger, LogLevels, LoggedClient, Severity, StatusClass, TracingSink};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt().init();
//!
//!     let levels = LogLevels::default()
//!         .with(EventKind::Response(StatusClass::ClientError), Severity::Warning)
//!         .with(EventKind::Response(StatusClass::ServerError), Severity::Error)
//!         .with(EventKind::Error, Severity::Critical);
//!     let logger = HttpLogger::new(TracingSink).with_levels(levels);
//!     let client = LoggedClient::new(reqwest::Client::new(), logger);
//!
//!     let request = http::Request::get("https://example.org/").body(Bytes::new())?;
//!     let response = client.send(request).await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Tower
//!
//! ```rust
//! use clientlog::{ClientLoggerLayer, HttpLogger, TracingSink};
//! use tower::ServiceBuilder;
//!
//! # fn wrap<S>(transport: S) {
//! let service = ServiceBuilder::new()
//!     .layer(ClientLoggerLayer::new(HttpLogger::new(TracingSink)))
//!     .service(transport);
//! # }
//! ```

use http::{Request, Response};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::{debug, instrument};

pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod id;
pub mod levels;
pub mod logger;
pub mod multi_sink;
pub mod sink;
#[cfg(feature = "reqwest")]
pub mod transport;
pub mod types;

pub use body::BodyContent;
pub use client::{HttpClient, LoggedClient};
pub use config::{IdFormat, LoggerConfig};
pub use error::{ConfigError, ParseEventKindError, ParseSeverityError};
pub use formatter::{MessageFormatter, RawHttpFormatter, ReasonPhrase};
pub use id::{IdGenerator, UniqueIdGenerator, UuidGenerator};
pub use levels::LogLevels;
pub use logger::HttpLogger;
pub use multi_sink::MultiSink;
pub use sink::{LogSink, TracingSink};
pub use types::{EventKind, Level, Severity, StatusClass};

/// Tower layer that logs every exchange passing through the wrapped service.
///
/// The wrapped service plays the part of the transport: it receives the
/// request unchanged, and its response or error is returned unchanged after
/// being logged.
///
/// # Examples
///
/// ```rust
/// use clientlog::{ClientLoggerLayer, HttpLogger, LogLevels, Severity, TracingSink};
/// use tower::Layer;
///
/// let logger = HttpLogger::new(TracingSink).with_levels(LogLevels::uniform(Severity::Debug));
/// let layer = ClientLoggerLayer::new(logger);
///
/// let service = layer.layer(tower::service_fn(|request: http::Request<String>| async move {
///     Ok::<_, std::io::Error>(http::Response::new(request.into_body()))
/// }));
/// ```
pub struct ClientLoggerLayer<F = RawHttpFormatter> {
    logger: Arc<HttpLogger<F>>,
}

impl<F: MessageFormatter> ClientLoggerLayer<F> {
    /// Create a new layer that owns `logger`.
    pub fn new(logger: HttpLogger<F>) -> Self {
        Self {
            logger: Arc::new(logger),
        }
    }

    /// Build the layer around a logger that is already shared elsewhere, for
    /// example with a [`LoggedClient`].
    pub fn from_shared(logger: Arc<HttpLogger<F>>) -> Self {
        Self { logger }
    }
}

impl<F> Clone for ClientLoggerLayer<F> {
    fn clone(&self) -> Self {
        Self {
            logger: self.logger.clone(),
        }
    }
}

impl<S, F> Layer<S> for ClientLoggerLayer<F> {
    type Service = ClientLoggerService<S, F>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientLoggerService {
            inner,
            logger: self.logger.clone(),
        }
    }
}

/// Tower service implementation of the logging decorator.
///
/// Users typically don't interact with this type directly - it's created by [`ClientLoggerLayer`].
pub struct ClientLoggerService<S, F = RawHttpFormatter> {
    inner: S,
    logger: Arc<HttpLogger<F>>,
}

impl<S: Clone, F> Clone for ClientLoggerService<S, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<S, F, B, RB> Service<Request<B>> for ClientLoggerService<S, F>
where
    S: Service<Request<B>, Response = Response<RB>> + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    F: MessageFormatter,
    B: BodyContent,
    RB: BodyContent + Send + 'static,
{
    type Response = Response<RB>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    #[instrument(skip_all)]
    fn call(&mut self, request: Request<B>) -> Self::Future {
        let correlation_id = self.logger.log_request(&request);
        let logger = self.logger.clone();

        let future = self.inner.call(request);

        Box::pin(async move {
            debug!(correlation_id = %correlation_id, "Awaiting inner service response");
            let result = future.await;

            match &result {
                Ok(response) => logger.log_response(response, &correlation_id),
                Err(error) => logger.log_error(error, &correlation_id),
            }
            result
        })
    }
}
