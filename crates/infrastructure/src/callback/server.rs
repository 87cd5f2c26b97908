//! Local redirect listener built on axum.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use pokcli_application::auth::{CallbackSession, SessionSignals};
use pokcli_application::ports::{CallbackError, CallbackServer};
use pokcli_domain::endpoints::CALLBACK_PATH;
use pokcli_domain::AuthorizationState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::page::SUCCESS_PAGE;

/// How long a stop request may take before it counts as failed.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Serves the redirect path on the loopback interface for one attempt.
#[derive(Debug, Clone, Copy)]
pub struct AxumCallbackServer {
    grace_period: Duration,
}

impl Default for AxumCallbackServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AxumCallbackServer {
    /// Creates a server with the default shutdown grace period.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Overrides the shutdown grace period.
    #[must_use]
    pub const fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }
}

async fn handle_redirect(State(signals): State<SessionSignals>) -> impl IntoResponse {
    if signals.succeed() {
        info!("authorization redirect received");
    } else {
        debug!("ignoring repeated redirect");
    }
    ([(header::CONNECTION, "close")], Html(SUCCESS_PAGE))
}

#[async_trait]
impl CallbackServer for AxumCallbackServer {
    async fn start(&self, port: u16) -> Result<CallbackSession, CallbackError> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
            .await
            .map_err(|e| CallbackError::Bind {
                port,
                message: e.to_string(),
            })?;
        let local_addr: Option<SocketAddr> = listener.local_addr().ok();

        let (signals, stop_rx) = SessionSignals::new();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = Router::new()
            .route(CALLBACK_PATH, get(handle_redirect))
            .with_state(signals.clone());

        signals.listening();
        info!(addr = ?local_addr, "callback server listening");
        let mut session = CallbackSession::new(signals.clone(), local_addr);

        let serving = signals.clone();
        session.spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            serving.terminate();
            info!("callback server stopped");
            result.map_err(|e| CallbackError::Serve(e.to_string()))
        });

        let grace_period = self.grace_period;
        session.spawn(async move {
            if stop_rx.await.is_err() {
                return Ok(());
            }
            debug!("shutting down callback server");
            let _ = shutdown_tx.send(());

            let mut states = signals.subscribe();
            let stopped = tokio::time::timeout(
                grace_period,
                states.wait_for(|state| *state == AuthorizationState::Terminated),
            )
            .await;
            match stopped {
                Ok(_) => Ok(()),
                Err(_) => Err(CallbackError::ShutdownTimeout(grace_period)),
            }
        });

        Ok(session)
    }
}
