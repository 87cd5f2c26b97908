//! Fixed service endpoints and the URLs derived from them.

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Request-token endpoint.
pub const REQUEST_TOKEN_URL: &str = "https://getpocket.com/v3/oauth/request";

/// Access-token endpoint.
pub const ACCESS_TOKEN_URL: &str = "https://getpocket.com/v3/oauth/authorize";

/// Article retrieval endpoint.
pub const RETRIEVE_URL: &str = "https://getpocket.com/v3/get";

/// Page where the user grants access to the application.
pub const USER_AUTHORIZE_URL: &str = "https://getpocket.com/auth/authorize";

/// Path served by the local callback listener.
pub const CALLBACK_PATH: &str = "/auth";

/// Default port of the local callback listener.
pub const DEFAULT_CALLBACK_PORT: u16 = 8181;

/// Returns the redirect URL the service should send the browser back to.
#[must_use]
pub fn local_redirect_url(port: u16) -> String {
    format!("http://localhost:{port}{CALLBACK_PATH}")
}

/// Builds the user-facing authorization URL.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] if the URL cannot be assembled.
pub fn user_authorization_url(request_token: &str, redirect_uri: &str) -> DomainResult<Url> {
    Url::parse_with_params(
        USER_AUTHORIZE_URL,
        &[("request_token", request_token), ("redirect_uri", redirect_uri)],
    )
    .map_err(|e| DomainError::InvalidUrl(e.to_string()))
}
