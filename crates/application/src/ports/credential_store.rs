//! Credential store port
//!
//! Defines the interface for credentials persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pokcli_domain::Credentials;

/// Errors that can occur during credentials operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    /// The credentials file does not exist.
    #[error("credentials file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file has no usable consumer key.
    #[error("can't find consumer_key in credentials file {}", .0.display())]
    MissingConsumerKey(PathBuf),

    /// The file could not be parsed.
    #[error("invalid credentials file {}: {message}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository trait for the consumer key / access token pair.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads credentials from `path`.
    ///
    /// # Errors
    /// Returns [`CredentialStoreError::MissingConsumerKey`] if the file holds
    /// no consumer key, and the other variants if it cannot be read.
    async fn load(&self, path: &Path) -> Result<Credentials, CredentialStoreError>;

    /// Writes both fields back to the existing file at `path`.
    ///
    /// # Errors
    /// Returns [`CredentialStoreError::NotFound`] if the file does not exist
    /// yet, or an I/O error if it cannot be written.
    async fn save(&self, path: &Path, credentials: &Credentials)
    -> Result<(), CredentialStoreError>;
}
