//! Client construction.

use std::path::PathBuf;
use std::sync::Arc;

use pokcli_domain::endpoints::DEFAULT_CALLBACK_PORT;
use tracing::{debug, info};

use super::PocketClient;
use super::options::{ClientOption, validate_options};
use crate::auth::AuthorizationTimings;
use crate::error::{ClientError, ClientResult};
use crate::ports::{Browser, CallbackServer, CredentialStore, Transport};

/// Builder for [`PocketClient`].
///
/// Options are recorded in the order they are applied. Conflicting
/// combinations are rejected by [`ClientBuilder::build`] before any file or
/// network access happens.
#[must_use]
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    credential_store: Option<Arc<dyn CredentialStore>>,
    callback_server: Option<Arc<dyn CallbackServer>>,
    browser: Option<Arc<dyn Browser>>,
    credentials_file: Option<PathBuf>,
    consumer_key: Option<String>,
    access_token: Option<String>,
    callback_port: u16,
    timings: AuthorizationTimings,
    applied: Vec<ClientOption>,
    error: Option<ClientError>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a builder with no ports and the default callback port.
    pub fn new() -> Self {
        Self {
            transport: None,
            credential_store: None,
            callback_server: None,
            browser: None,
            credentials_file: None,
            consumer_key: None,
            access_token: None,
            callback_port: DEFAULT_CALLBACK_PORT,
            timings: AuthorizationTimings::default(),
            applied: Vec::new(),
            error: None,
        }
    }

    /// Reads credentials from `path` and writes them back after building.
    ///
    /// Cannot be combined with [`ClientBuilder::access_token`] or
    /// [`ClientBuilder::consumer_key`].
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.as_os_str().is_empty() {
            self.fail(ClientError::Configuration(
                "no credentials file supplied".to_string(),
            ));
        }
        self.credentials_file = Some(path);
        self.applied.push(ClientOption::CredentialsFile);
        self
    }

    /// Overrides the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self.applied.push(ClientOption::Transport);
        self
    }

    /// Supplies the access token directly. An empty token is ignored but
    /// still counts as applied.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.access_token = Some(token);
        }
        self.applied.push(ClientOption::AccessToken);
        self
    }

    /// Supplies the consumer key directly. An empty key is ignored but
    /// still counts as applied.
    pub fn consumer_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.consumer_key = Some(key);
        }
        self.applied.push(ClientOption::ConsumerKey);
        self
    }

    /// Overrides the local callback port.
    pub fn callback_port(mut self, port: u16) -> Self {
        if port == 0 {
            self.fail(ClientError::Configuration(
                "callback port must not be 0".to_string(),
            ));
        }
        self.callback_port = port;
        self.applied.push(ClientOption::CallbackPort);
        self
    }

    /// Overrides the authorization delays.
    pub const fn authorization_timings(mut self, timings: AuthorizationTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Sets the store used for the credentials file.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Sets the listener used during authorization.
    pub fn callback_server(mut self, server: Arc<dyn CallbackServer>) -> Self {
        self.callback_server = Some(server);
        self
    }

    /// Sets the browser launcher used during authorization.
    pub fn browser(mut self, browser: Arc<dyn Browser>) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Options applied so far, in order.
    #[must_use]
    pub fn applied_options(&self) -> &[ClientOption] {
        &self.applied
    }

    fn fail(&mut self, error: ClientError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Validates the options, loads credentials, authorizes if no access
    /// token is known and persists the credentials file.
    ///
    /// # Errors
    ///
    /// [`ClientError::Configuration`] for invalid or incompatible options,
    /// [`ClientError::CredentialStore`] if the credentials file is unusable,
    /// and any error from the authorization flow.
    pub async fn build(self) -> ClientResult<PocketClient> {
        if let Some(error) = self.error {
            return Err(error);
        }
        validate_options(&self.applied)?;

        let mut consumer_key = self.consumer_key;
        let mut access_token = self.access_token;

        if let Some(path) = &self.credentials_file {
            let store = self.credential_store.as_ref().ok_or_else(|| {
                ClientError::Configuration("no credential store configured".to_string())
            })?;
            let credentials = store.load(path).await?;
            info!(path = %path.display(), "loaded credentials");
            consumer_key = Some(credentials.consumer_key().to_string());
            access_token = credentials.access_token().map(str::to_string);
        }

        let transport = self.transport.ok_or_else(|| {
            ClientError::Configuration("no usable HTTP transport configured".to_string())
        })?;
        let consumer_key = consumer_key.ok_or_else(|| {
            ClientError::Configuration("a consumer key is required".to_string())
        })?;

        let mut client = PocketClient {
            transport,
            credential_store: self.credential_store,
            callback_server: self.callback_server,
            browser: self.browser,
            consumer_key,
            access_token,
            username: None,
            callback_port: self.callback_port,
            credentials_file: self.credentials_file,
            options: self.applied,
            timings: self.timings,
        };

        if client.access_token.is_none() {
            debug!("no access token, starting authorization");
            client.authorize().await?;
        }

        client.persist_credentials().await?;
        Ok(client)
    }
}
