//! Authenticated client facade.

mod builder;
mod options;

pub use builder::ClientBuilder;
pub use options::{ClientOption, INCOMPATIBLE_OPTIONS, validate_options};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pokcli_domain::endpoints::RETRIEVE_URL;
use pokcli_domain::{Credentials, RetrieveRequest};
use tracing::{debug, info};

use crate::auth::{AuthorizationTimings, Authorizer};
use crate::error::{ClientError, ClientResult};
use crate::ports::{Browser, CallbackServer, CredentialStore, Transport};

/// Client holding the consumer key and, once authorized, an access token.
pub struct PocketClient {
    transport: Arc<dyn Transport>,
    credential_store: Option<Arc<dyn CredentialStore>>,
    callback_server: Option<Arc<dyn CallbackServer>>,
    browser: Option<Arc<dyn Browser>>,
    consumer_key: String,
    access_token: Option<String>,
    username: Option<String>,
    callback_port: u16,
    credentials_file: Option<PathBuf>,
    options: Vec<ClientOption>,
    timings: AuthorizationTimings,
}

impl fmt::Debug for PocketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PocketClient")
            .field("consumer_key", &"<redacted>")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("username", &self.username)
            .field("callback_port", &self.callback_port)
            .field("credentials_file", &self.credentials_file)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PocketClient {
    /// Starts configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Application consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Access token, if the client is authorized.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Account name reported by the last authorization.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Port of the local redirect listener.
    #[must_use]
    pub const fn callback_port(&self) -> u16 {
        self.callback_port
    }

    /// Credentials file the client reads and writes, if any.
    #[must_use]
    pub fn credentials_file(&self) -> Option<&Path> {
        self.credentials_file.as_deref()
    }

    /// Options that were applied when building the client.
    #[must_use]
    pub fn options(&self) -> &[ClientOption] {
        &self.options
    }

    /// Transport used for every request.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Runs the browser consent flow and stores the resulting token.
    ///
    /// On failure the previous token, if any, is kept.
    ///
    /// # Errors
    ///
    /// [`ClientError::Configuration`] when no callback server or browser is
    /// configured, otherwise whatever the flow reports.
    pub async fn authorize(&mut self) -> ClientResult<()> {
        let (Some(server), Some(browser)) = (&self.callback_server, &self.browser) else {
            return Err(ClientError::Configuration(
                "authorization needs a callback server and a browser".to_string(),
            ));
        };

        let grant = Authorizer::new(
            self.transport.as_ref(),
            server.as_ref(),
            browser.as_ref(),
            &self.consumer_key,
            self.callback_port,
        )
        .with_timings(self.timings)
        .authorize()
        .await?;

        self.access_token = Some(grant.access_token);
        self.username = Some(grant.username).filter(|name| !name.is_empty());
        Ok(())
    }

    /// Fetches the saved articles, optionally restricted to `tag`.
    ///
    /// Returns the raw response body.
    ///
    /// # Errors
    ///
    /// [`ClientError::Configuration`] when the client has no access token,
    /// otherwise the transport failure.
    pub async fn get_articles(&self, tag: Option<&str>) -> ClientResult<Vec<u8>> {
        let access_token = self.access_token.as_deref().ok_or_else(|| {
            ClientError::Configuration("client is not authorized".to_string())
        })?;

        let body = serde_json::to_vec(&RetrieveRequest {
            consumer_key: &self.consumer_key,
            access_token,
            tag: tag.filter(|t| !t.is_empty()),
        })
        .map_err(|e| ClientError::Internal(e.to_string()))?;

        debug!(tag = ?tag, "retrieving articles");
        Ok(self.transport.post(RETRIEVE_URL, body).await?)
    }

    /// Writes the consumer key and access token back to the credentials
    /// file. Does nothing when the client was not built from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CredentialStore`] if the file cannot be written.
    pub async fn persist_credentials(&self) -> ClientResult<()> {
        let (Some(path), Some(store)) = (&self.credentials_file, &self.credential_store) else {
            return Ok(());
        };
        let mut credentials = Credentials::new(self.consumer_key.clone(), None)?;
        if let Some(token) = &self.access_token {
            credentials = credentials.with_access_token(token.clone());
        }
        store.save(path, &credentials).await?;
        info!(path = %path.display(), "saved credentials");
        Ok(())
    }
}
