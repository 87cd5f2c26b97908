//! Authorization flow controller.

use std::time::Duration;

use pokcli_domain::endpoints::{
    ACCESS_TOKEN_URL, REQUEST_TOKEN_URL, local_redirect_url, user_authorization_url,
};
use pokcli_domain::{
    AccessGrant, AccessTokenRequest, AuthorizationState, RequestTokenRequest,
    RequestTokenResponse,
};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::ports::{Browser, CallbackError, CallbackServer, Transport};

/// Delays used by the authorization flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationTimings {
    /// Pause between starting the listener and opening the browser.
    pub browser_delay: Duration,
    /// How long the user has to grant access.
    pub timeout: Duration,
}

impl Default for AuthorizationTimings {
    fn default() -> Self {
        Self {
            browser_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(40),
        }
    }
}

/// Runs one authorization attempt against the service.
pub struct Authorizer<'a> {
    transport: &'a dyn Transport,
    callback_server: &'a dyn CallbackServer,
    browser: &'a dyn Browser,
    consumer_key: &'a str,
    callback_port: u16,
    timings: AuthorizationTimings,
}

impl<'a> Authorizer<'a> {
    /// Creates a controller for the given consumer key and port.
    #[must_use]
    pub fn new(
        transport: &'a dyn Transport,
        callback_server: &'a dyn CallbackServer,
        browser: &'a dyn Browser,
        consumer_key: &'a str,
        callback_port: u16,
    ) -> Self {
        Self {
            transport,
            callback_server,
            browser,
            consumer_key,
            callback_port,
            timings: AuthorizationTimings::default(),
        }
    }

    /// Overrides the flow delays.
    #[must_use]
    pub const fn with_timings(mut self, timings: AuthorizationTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Obtains an access token through the browser consent step.
    ///
    /// # Errors
    ///
    /// Network, status and decode failures of either token exchange are
    /// returned as they happen. [`ClientError::AuthorizationTimeout`] is
    /// returned when nobody completes the consent step in time, and
    /// [`ClientError::ServerShutdownFailure`] when the listener does not
    /// stop within its grace period.
    pub async fn authorize(&self) -> ClientResult<AccessGrant> {
        let redirect_uri = local_redirect_url(self.callback_port);
        let request_token = self.request_token(&redirect_uri).await?;

        let mut session = self.callback_server.start(self.callback_port).await?;

        info!("You will now be taken to your browser for authentication");
        let auth_url = user_authorization_url(&request_token, &redirect_uri)?;
        info!("Authentication URL: {auth_url}");
        tokio::time::sleep(self.timings.browser_delay).await;

        if let Err(err) = self.browser.open(auth_url.as_str()) {
            if let Err(shutdown) = session.finish().await {
                warn!(error = %shutdown, "callback server did not stop cleanly");
            }
            return Err(err.into());
        }

        info!(
            "authentication will be cancelled in {} seconds",
            self.timings.timeout.as_secs()
        );
        session.arm_timeout(self.timings.timeout);

        let outcome = session.wait_settled().await;
        session.finish().await?;

        match outcome {
            AuthorizationState::Succeeded => debug!("browser redirect received"),
            AuthorizationState::Cancelled => {
                return Err(ClientError::AuthorizationTimeout(self.timings.timeout));
            }
            other => {
                return Err(CallbackError::Serve(format!(
                    "callback server stopped before the browser redirect ({other:?})"
                ))
                .into());
            }
        }

        let grant = self.access_token(&request_token).await?;
        info!(username = %grant.username, "authorization complete");
        Ok(grant)
    }

    async fn request_token(&self, redirect_uri: &str) -> ClientResult<String> {
        let body = serde_json::to_vec(&RequestTokenRequest {
            consumer_key: self.consumer_key,
            redirect_uri,
        })
        .map_err(|e| ClientError::Internal(e.to_string()))?;

        let response = self.transport.post(REQUEST_TOKEN_URL, body).await?;
        let token: RequestTokenResponse = serde_json::from_slice(&response)?;
        Ok(token.into_code()?)
    }

    async fn access_token(&self, request_token: &str) -> ClientResult<AccessGrant> {
        let body = serde_json::to_vec(&AccessTokenRequest {
            consumer_key: self.consumer_key,
            code: request_token,
        })
        .map_err(|e| ClientError::Internal(e.to_string()))?;

        let response = self.transport.post(ACCESS_TOKEN_URL, body).await?;
        let grant: AccessGrant = serde_json::from_slice(&response)?;
        Ok(grant.validated()?)
    }
}
