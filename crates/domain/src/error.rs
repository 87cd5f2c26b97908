//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The consumer key is empty.
    #[error("consumer key must not be empty")]
    EmptyConsumerKey,

    /// A URL could not be built from its parts.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The service answered with a payload missing a required field.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
