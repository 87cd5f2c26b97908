//! Consumer key and access token pair.

use crate::error::{DomainError, DomainResult};

/// Credentials used to talk to the service on behalf of a user.
///
/// The consumer key is always present; the access token only exists once
/// an authorization has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    access_token: Option<String>,
}

impl Credentials {
    /// Creates credentials, normalising an empty access token to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyConsumerKey`] if `consumer_key` is empty.
    pub fn new(
        consumer_key: impl Into<String>,
        access_token: Option<String>,
    ) -> DomainResult<Self> {
        let consumer_key = consumer_key.into();
        if consumer_key.trim().is_empty() {
            return Err(DomainError::EmptyConsumerKey);
        }
        Ok(Self {
            consumer_key,
            access_token: access_token.filter(|t| !t.is_empty()),
        })
    }

    /// Returns the consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Returns the access token, if authorized.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Replaces the access token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        let token = access_token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }
}
