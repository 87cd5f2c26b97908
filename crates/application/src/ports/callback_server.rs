//! Local callback server port.

use std::time::Duration;

use async_trait::async_trait;

use crate::auth::CallbackSession;

/// Errors raised by the local callback listener.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    /// The listener could not bind its port.
    #[error("could not listen on localhost:{port}: {message}")]
    Bind {
        /// Requested port.
        port: u16,
        /// OS error text.
        message: String,
    },

    /// The accept loop failed.
    #[error("callback server failed: {0}")]
    Serve(String),

    /// Graceful shutdown did not finish within the grace period.
    #[error("could not shut down callback server gracefully within {}s", .0.as_secs())]
    ShutdownTimeout(Duration),

    /// A session task panicked.
    #[error("callback task failed: {0}")]
    Task(String),
}

/// Starts transient listeners for the provider redirect.
#[async_trait]
pub trait CallbackServer: Send + Sync {
    /// Binds `localhost:{port}` and returns the running session.
    ///
    /// The returned session is already in the `Listening` state.
    ///
    /// # Errors
    ///
    /// Returns [`CallbackError::Bind`] if the port is unavailable.
    async fn start(&self, port: u16) -> Result<CallbackSession, CallbackError>;
}
