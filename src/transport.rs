//! [`HttpClient`] implementation for [`reqwest::Client`].
//!
//! Requests go out with their method, URI, version, headers and body; the
//! response body is read to completion so it can be logged and handed back as
//! [`Bytes`]. A reason phrase the server sent in place of the canonical one is
//! kept as a [`ReasonPhrase`] extension.

use bytes::Bytes;
use http::{Request, Response};
use tracing::debug;

use crate::client::HttpClient;
use crate::formatter::ReasonPhrase;

impl HttpClient<Bytes> for reqwest::Client {
    type ResponseBody = Bytes;
    type Error = reqwest::Error;

    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, reqwest::Error> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.execute(request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
            .map(ReasonPhrase::from);
        let body = response.bytes().await?;
        debug!(status = %status, body_len = body.len(), "Response body received");

        let mut converted = Response::new(body);
        *converted.status_mut() = status;
        *converted.version_mut() = version;
        *converted.headers_mut() = headers;
        if let Some(reason) = reason {
            converted.extensions_mut().insert(reason);
        }
        Ok(converted)
    }
}
