//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port. Every request carries a
//! JSON body; responses with a failure status are turned into
//! [`TransportError::Status`] using the service's `X-Error` headers.

use std::time::Duration;

use async_trait::async_trait;
use pokcli_application::ports::{Transport, TransportError};
use pokcli_domain::status::is_failure;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, Url};
use tracing::debug;

const POST_CONTENT_TYPE: &str = "application/json; charset=UTF8";
const GET_CONTENT_TYPE: &str = "application/json";
const ACCEPT_HEADER: &str = "X-Accept";
const ERROR_CODE_HEADER: &str = "X-Error-Code";
const ERROR_HEADER: &str = "X-Error";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("pokcli/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport around a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        let parsed =
            Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {url}")))?;

        let mut builder = self
            .client
            .request(method.clone(), parsed)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        if method == Method::POST {
            builder = builder.header(ACCEPT_HEADER, "application/json");
        }

        let response = builder.send().await.map_err(Self::map_error)?;
        let status = response.status().as_u16();
        debug!(%method, url, status, "response received");

        if is_failure(status) {
            let detail = error_detail(response.headers());
            return Err(TransportError::status(status, detail));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?;
        Ok(bytes.to_vec())
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout;
        }
        if error.is_connect() {
            return TransportError::Connection(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

/// Combines the service's error headers, e.g. `"138: Missing consumer key."`.
fn error_detail(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    match (header(ERROR_CODE_HEADER), header(ERROR_HEADER)) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (None, Some(message)) => Some(message.to_string()),
        (Some(code), None) => Some(format!("error code {code}")),
        (None, None) => None,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.send(Method::POST, url, POST_CONTENT_TYPE, body).await
    }

    async fn get(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.send(Method::GET, url, GET_CONTENT_TYPE, body).await
    }
}
