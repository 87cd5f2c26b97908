//! Browser launcher backed by the `webbrowser` crate.

use pokcli_application::ports::{Browser, BrowserError};
use tracing::debug;

/// Opens URLs in the user's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    /// Creates a new `SystemBrowser`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        debug!(url, "opening browser");
        webbrowser::open(url).map_err(|e| BrowserError {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
