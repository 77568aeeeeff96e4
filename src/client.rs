//! HTTP client abstraction and the logging decorator around it.

use http::{Request, Response};
use std::future::Future;
use std::sync::Arc;

use crate::body::BodyContent;
use crate::formatter::{MessageFormatter, RawHttpFormatter};
use crate::logger::HttpLogger;

/// An HTTP client that sends a request and eventually yields a response.
///
/// Any failure to produce a response is reported as [`Self::Error`]. An HTTP
/// error status is not a failure; it is a normal response.
///
/// # Examples
///
/// ```rust
/// use clientlog::HttpClient;
/// use http::{Request, Response, StatusCode};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("unreachable")]
/// struct Unreachable;
///
/// struct Teapot;
///
/// impl HttpClient<String> for Teapot {
///     type ResponseBody = String;
///     type Error = Unreachable;
///
///     async fn send(&self, _request: Request<String>) -> Result<Response<String>, Unreachable> {
///         let mut response = Response::new("short and stout".to_string());
///         *response.status_mut() = StatusCode::IM_A_TEAPOT;
///         Ok(response)
///     }
/// }
/// ```
pub trait HttpClient<B>: Send + Sync {
    type ResponseBody;
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(
        &self,
        request: Request<B>,
    ) -> impl Future<Output = Result<Response<Self::ResponseBody>, Self::Error>> + Send;
}

impl<B, C: HttpClient<B>> HttpClient<B> for Arc<C> {
    type ResponseBody = C::ResponseBody;
    type Error = C::Error;

    fn send(
        &self,
        request: Request<B>,
    ) -> impl Future<Output = Result<Response<Self::ResponseBody>, Self::Error>> + Send {
        (**self).send(request)
    }
}

/// Decorator that logs every exchange of the wrapped client.
///
/// For each call a correlation id is minted and the request record emitted,
/// then the request is handed to the inner client. A response produces a
/// response record at the level configured for its status class; a failure
/// produces an error record. Either way the inner client's result is returned
/// untouched.
///
/// Cloning is cheap: clones share the same [`HttpLogger`].
///
/// # Examples
///
/// ```rust,no_run
/// use clientlog::{HttpClient, HttpLogger, LoggedClient, TracingSink};
/// use bytes::Bytes;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let client = LoggedClient::new(reqwest::Client::new(), HttpLogger::new(TracingSink));
///
/// let request = http::Request::get("https://example.org/").body(Bytes::new())?;
/// let response = client.send(request).await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
pub struct LoggedClient<C, F = RawHttpFormatter> {
    inner: C,
    logger: Arc<HttpLogger<F>>,
}

impl<C, F: MessageFormatter> LoggedClient<C, F> {
    /// Wrap `inner`, logging every exchange through `logger`.
    pub fn new(inner: C, logger: HttpLogger<F>) -> Self {
        Self {
            inner,
            logger: Arc::new(logger),
        }
    }

    /// Wrap `inner` with a logger that is already shared elsewhere.
    pub fn with_shared_logger(inner: C, logger: Arc<HttpLogger<F>>) -> Self {
        Self { inner, logger }
    }

    /// Gets a reference to the wrapped client.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// The logger shared by this client and its clones.
    pub fn logger(&self) -> &Arc<HttpLogger<F>> {
        &self.logger
    }

    /// Consumes the decorator, returning the wrapped client.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Clone, F> Clone for LoggedClient<C, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<C: std::fmt::Debug, F: std::fmt::Debug> std::fmt::Debug for LoggedClient<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggedClient")
            .field("inner", &self.inner)
            .field("logger", &self.logger)
            .finish()
    }
}

impl<B, C, F> HttpClient<B> for LoggedClient<C, F>
where
    B: BodyContent + Send,
    C: HttpClient<B>,
    C::ResponseBody: BodyContent,
    F: MessageFormatter,
{
    type ResponseBody = C::ResponseBody;
    type Error = C::Error;

    async fn send(&self, request: Request<B>) -> Result<Response<Self::ResponseBody>, Self::Error> {
        let correlation_id = self.logger.log_request(&request);

        match self.inner.send(request).await {
            Ok(response) => {
                self.logger.log_response(&response, &correlation_id);
                Ok(response)
            }
            Err(error) => {
                self.logger.log_error(&error, &correlation_id);
                Err(error)
            }
        }
    }
}
