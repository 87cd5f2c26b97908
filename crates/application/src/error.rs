//! Application error types

use std::time::Duration;

use pokcli_domain::DomainError;
use thiserror::Error;

use crate::ports::{BrowserError, CallbackError, CredentialStoreError, TransportError};

/// Client-level errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Options are missing or incompatible.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The credentials file could not be used.
    #[error("credentials error: {0}")]
    CredentialStore(#[from] CredentialStoreError),

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a failure status.
    #[error("remote service error: HTTP {status} {reason}")]
    RemoteService {
        /// HTTP status code.
        status: u16,
        /// Named reason for the status.
        reason: String,
        /// Service-provided error text, if any.
        detail: Option<String>,
    },

    /// A response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The browser could not be opened.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The local callback server failed.
    #[error(transparent)]
    Callback(CallbackError),

    /// Nobody completed the consent step in time.
    #[error("authentication timed out after {}s and was cancelled", .0.as_secs())]
    AuthorizationTimeout(Duration),

    /// The callback server did not stop within its grace period.
    #[error("could not shut down callback server gracefully: {0}")]
    ServerShutdownFailure(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Returns true for failures after which the attempt cannot be retried
    /// with the same request token.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AuthorizationTimeout(_) | Self::ServerShutdownFailure(_)
        )
    }

    /// HTTP status of a remote service error.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Status {
                status,
                reason,
                detail,
            } => Self::RemoteService {
                status,
                reason,
                detail,
            },
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<CallbackError> for ClientError {
    fn from(error: CallbackError) -> Self {
        match error {
            CallbackError::ShutdownTimeout(_) => Self::ServerShutdownFailure(error.to_string()),
            other => Self::Callback(other),
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyConsumerKey => Self::Configuration(error.to_string()),
            DomainError::MissingField(_) => Self::Decode(error.to_string()),
            DomainError::InvalidUrl(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
