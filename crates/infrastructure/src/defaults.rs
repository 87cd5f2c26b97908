//! Default wiring of the adapters into a client builder.

use std::path::PathBuf;
use std::sync::Arc;

use pokcli_application::{ClientBuilder, ClientResult, PocketClient};

use crate::adapters::{ReqwestTransport, SystemBrowser};
use crate::callback::AxumCallbackServer;
use crate::persistence::TomlCredentialStore;

/// Directory under the user configuration directory holding pokcli files.
pub const CONFIG_DIR_NAME: &str = "pokcli";

/// File name of the default credentials file.
pub const CREDENTIALS_FILE_NAME: &str = "credentials.toml";

/// Returns a builder wired with the reqwest transport, the TOML credential
/// store, the axum callback server and the system browser.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn client_builder() -> ClientResult<ClientBuilder> {
    let transport = ReqwestTransport::new()?;
    Ok(PocketClient::builder()
        .transport(Arc::new(transport))
        .credential_store(Arc::new(TomlCredentialStore::new()))
        .callback_server(Arc::new(AxumCallbackServer::new()))
        .browser(Arc::new(SystemBrowser::new())))
}

/// `<config_dir>/pokcli/credentials.toml`, if the platform has a
/// configuration directory.
#[must_use]
pub fn default_credentials_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CREDENTIALS_FILE_NAME))
}
