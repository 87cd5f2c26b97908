//! Browser port for the user consent step.

/// Error raised when the browser cannot be launched.
#[derive(Debug, thiserror::Error)]
#[error("could not open browser for {url}: {message}")]
pub struct BrowserError {
    /// URL that should have been opened.
    pub url: String,
    /// Launcher message.
    pub message: String,
}

/// Opens URLs in the user's default browser.
pub trait Browser: Send + Sync {
    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if no browser could be launched.
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}
