//! Request/response payloads for the token exchange endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Body of the request-token call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestTokenRequest<'a> {
    /// Application consumer key.
    pub consumer_key: &'a str,
    /// Where the service sends the browser once the user has decided.
    pub redirect_uri: &'a str,
}

/// Response of the request-token call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestTokenResponse {
    /// The short-lived request token.
    #[serde(default)]
    pub code: String,
}

impl RequestTokenResponse {
    /// Returns the request token, rejecting an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] when the service sent no code.
    pub fn into_code(self) -> DomainResult<String> {
        if self.code.is_empty() {
            return Err(DomainError::MissingField("code"));
        }
        Ok(self.code)
    }
}

/// Body of the access-token call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenRequest<'a> {
    /// Application consumer key.
    pub consumer_key: &'a str,
    /// The request token obtained earlier.
    pub code: &'a str,
}

/// Response of the access-token call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessGrant {
    /// Account the token belongs to.
    #[serde(default)]
    pub username: String,
    /// Long-lived access token.
    #[serde(default)]
    pub access_token: String,
}

impl AccessGrant {
    /// Checks that the grant carries a token.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] when `access_token` is empty.
    pub fn validated(self) -> DomainResult<Self> {
        if self.access_token.is_empty() {
            return Err(DomainError::MissingField("access_token"));
        }
        Ok(self)
    }
}
