//! TOML credentials file.
//!
//! The file holds two top-level keys:
//! ```toml
//! consumer_key = "1234-abcd1234abcd1234abcd1234"
//! access_token = "5678defg-5678-defg-5678-defg56"
//! ```
//! Saving rewrites those two keys and leaves any other content in place.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use pokcli_application::ports::{CredentialStore, CredentialStoreError};
use pokcli_domain::Credentials;
use serde::Deserialize;
use tokio::fs;
use toml::{Table, Value};
use tracing::debug;

const CONSUMER_KEY: &str = "consumer_key";
const ACCESS_TOKEN: &str = "access_token";

#[derive(Debug, Default, Deserialize)]
struct CredentialsDocument {
    #[serde(default)]
    consumer_key: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
}

/// Credentials stored in a TOML file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCredentialStore;

impl TomlCredentialStore {
    /// Creates a new `TomlCredentialStore`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn read(path: &Path) -> Result<String, CredentialStoreError> {
        fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CredentialStoreError::NotFound(path.to_path_buf())
            } else {
                CredentialStoreError::Io(e)
            }
        })
    }

    fn parse_error(path: &Path, error: &impl std::fmt::Display) -> CredentialStoreError {
        CredentialStoreError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl CredentialStore for TomlCredentialStore {
    async fn load(&self, path: &Path) -> Result<Credentials, CredentialStoreError> {
        let content = Self::read(path).await?;
        let document: CredentialsDocument =
            toml::from_str(&content).map_err(|e| Self::parse_error(path, &e))?;

        let consumer_key = document
            .consumer_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CredentialStoreError::MissingConsumerKey(path.to_path_buf()))?;

        debug!(path = %path.display(), "read credentials file");
        Credentials::new(consumer_key, document.access_token)
            .map_err(|_| CredentialStoreError::MissingConsumerKey(path.to_path_buf()))
    }

    async fn save(
        &self,
        path: &Path,
        credentials: &Credentials,
    ) -> Result<(), CredentialStoreError> {
        let content = Self::read(path).await?;
        let mut table: Table =
            toml::from_str(&content).map_err(|e| Self::parse_error(path, &e))?;

        table.insert(
            CONSUMER_KEY.to_string(),
            Value::String(credentials.consumer_key().to_string()),
        );
        match credentials.access_token() {
            Some(token) => {
                table.insert(ACCESS_TOKEN.to_string(), Value::String(token.to_string()));
            }
            None => {
                table.remove(ACCESS_TOKEN);
            }
        }

        let rendered = toml::to_string(&table).map_err(|e| Self::parse_error(path, &e))?;
        fs::write(path, rendered).await?;
        debug!(path = %path.display(), "wrote credentials file");
        Ok(())
    }
}
