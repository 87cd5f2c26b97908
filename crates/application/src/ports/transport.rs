//! Transport port
//!
//! Issues the JSON requests the client needs and maps failures to a closed
//! set of errors.

use async_trait::async_trait;
use pokcli_domain::describe_status;

/// Errors that can occur while talking to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// No connection could be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The service answered with a failure status.
    #[error("HTTP {status} {reason}{}", detail_suffix(.detail.as_deref()))]
    Status {
        /// HTTP status code (400 or above).
        status: u16,
        /// Named reason for the status.
        reason: String,
        /// Service-provided error text, if any.
        detail: Option<String>,
    },

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Builds a status error with the reason derived from the code.
    #[must_use]
    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self::Status {
            status,
            reason: describe_status(status),
            detail,
        }
    }

    /// Returns the HTTP status for status errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

/// Issues single HTTP calls with JSON bodies.
///
/// Responses below 400 are returned verbatim; decoding is left to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Status`] for statuses of 400 and above, and
    /// the other variants for network failures.
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    /// GETs `url` with `body` attached.
    ///
    /// # Errors
    ///
    /// Same as [`Transport::post`].
    async fn get(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}
