//! Per-attempt authorization session.
//!
//! A [`CallbackSession`] owns every task spawned for one authorization
//! attempt (accept loop, shutdown watcher, timeout watcher) in a single
//! [`JoinSet`]. State changes are published through one watch channel and
//! the stop request is a one-shot that can be taken exactly once.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use pokcli_domain::AuthorizationState;
use tokio::sync::{oneshot, watch};
use tokio::task::{AbortHandle, JoinSet};
use tracing::{debug, info};

use crate::ports::CallbackError;

/// Shared signalling handle for one attempt.
///
/// Cheap to clone; every clone observes and drives the same state.
#[derive(Debug, Clone)]
pub struct SessionSignals {
    state: Arc<watch::Sender<AuthorizationState>>,
    outcome: Arc<OnceLock<AuthorizationState>>,
    stop: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl SessionSignals {
    /// Creates signals in the `Idle` state, returning the stop receiver
    /// for the shutdown watcher.
    #[must_use]
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (state, _) = watch::channel(AuthorizationState::Idle);
        let (stop_tx, stop_rx) = oneshot::channel();
        let signals = Self {
            state: Arc::new(state),
            outcome: Arc::new(OnceLock::new()),
            stop: Arc::new(Mutex::new(Some(stop_tx))),
        };
        (signals, stop_rx)
    }

    /// Current state.
    #[must_use]
    pub fn current(&self) -> AuthorizationState {
        *self.state.borrow()
    }

    /// `Succeeded` or `Cancelled`, whichever happened, even after the
    /// listener has terminated.
    #[must_use]
    pub fn outcome(&self) -> Option<AuthorizationState> {
        self.outcome.get().copied()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthorizationState> {
        self.state.subscribe()
    }

    /// Idle -> Listening.
    pub fn listening(&self) -> bool {
        self.transition(AuthorizationState::Listening)
    }

    /// Listening -> Succeeded. Only the first caller wins.
    pub fn succeed(&self) -> bool {
        self.transition(AuthorizationState::Succeeded)
    }

    /// Listening -> Cancelled. Loses against an earlier success.
    pub fn cancel(&self) -> bool {
        self.transition(AuthorizationState::Cancelled)
    }

    /// Marks the listener as shut down.
    pub fn terminate(&self) -> bool {
        self.transition(AuthorizationState::Terminated)
    }

    /// Sends the stop request. Returns false if it was already sent.
    pub fn request_stop(&self) -> bool {
        let sender = self
            .stop
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(sender) => {
                // The watcher may already be gone if the listener died.
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }

    fn transition(&self, next: AuthorizationState) -> bool {
        self.state.send_if_modified(|current| {
            if current.can_transition_to(next) {
                debug!(from = ?current, to = ?next, "authorization state change");
                if matches!(
                    next,
                    AuthorizationState::Succeeded | AuthorizationState::Cancelled
                ) {
                    let _ = self.outcome.set(next);
                }
                *current = next;
                true
            } else {
                false
            }
        })
    }
}

/// Running callback listener plus the tasks scoped to its attempt.
///
/// Dropping the session aborts all of its tasks.
#[derive(Debug)]
pub struct CallbackSession {
    signals: SessionSignals,
    local_addr: Option<SocketAddr>,
    tasks: JoinSet<Result<(), CallbackError>>,
    timeout: Option<AbortHandle>,
}

impl CallbackSession {
    /// Wraps `signals` into a session. Adapters spawn their tasks with
    /// [`CallbackSession::spawn`] afterwards.
    #[must_use]
    pub fn new(signals: SessionSignals, local_addr: Option<SocketAddr>) -> Self {
        Self {
            signals,
            local_addr,
            tasks: JoinSet::new(),
            timeout: None,
        }
    }

    /// Signals shared with the listener.
    #[must_use]
    pub const fn signals(&self) -> &SessionSignals {
        &self.signals
    }

    /// Address the listener is bound to, if it has one.
    #[must_use]
    pub const fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Current state of the attempt.
    #[must_use]
    pub fn state(&self) -> AuthorizationState {
        self.signals.current()
    }

    /// Spawns a task tied to this attempt.
    pub fn spawn<F>(&mut self, task: F) -> AbortHandle
    where
        F: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.tasks.spawn(task)
    }

    /// Starts the timeout watcher. When `after` elapses while the listener
    /// is still waiting, the attempt is cancelled and the stop request sent.
    pub fn arm_timeout(&mut self, after: Duration) {
        let signals = self.signals.clone();
        let handle = self.tasks.spawn(async move {
            tokio::time::sleep(after).await;
            if signals.cancel() {
                info!("authentication timed out and was cancelled");
                signals.request_stop();
            }
            Ok(())
        });
        if let Some(previous) = self.timeout.replace(handle) {
            previous.abort();
        }
    }

    /// Waits until the attempt either succeeded, was cancelled or the
    /// listener went away, and returns which of those happened.
    pub async fn wait_settled(&self) -> AuthorizationState {
        let mut states = self.signals.subscribe();
        let observed = states
            .wait_for(|state| state.is_settled())
            .await
            .map_or(AuthorizationState::Terminated, |state| *state);
        self.signals.outcome().unwrap_or(observed)
    }

    /// Sends the stop request if nobody did yet, drops the timeout watcher
    /// and joins the remaining tasks.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a session task, typically
    /// [`CallbackError::ShutdownTimeout`].
    pub async fn finish(mut self) -> Result<(), CallbackError> {
        if self.signals.request_stop() {
            debug!("stop requested for callback server");
        }
        if let Some(timeout) = self.timeout.take() {
            timeout.abort();
        }

        let mut outcome = Ok(());
        while let Some(joined) = self.tasks.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(err) if err.is_cancelled() => Ok(()),
                Err(err) => Err(CallbackError::Task(err.to_string())),
            };
            if let Err(err) = result {
                self.tasks.abort_all();
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Session whose shutdown watcher counts stop deliveries.
    fn counting_session() -> (CallbackSession, Arc<AtomicUsize>) {
        let (signals, stop_rx) = SessionSignals::new();
        assert!(signals.listening());
        let stops = Arc::new(AtomicUsize::new(0));
        let mut session = CallbackSession::new(signals.clone(), None);
        let counter = Arc::clone(&stops);
        session.spawn(async move {
            if stop_rx.await.is_ok() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            signals.terminate();
            Ok(())
        });
        (session, stops)
    }

    #[test]
    fn success_is_signalled_once() {
        let (signals, _stop) = SessionSignals::new();
        assert!(!signals.succeed(), "cannot succeed before listening");
        assert!(signals.listening());
        assert!(signals.succeed());
        assert!(!signals.succeed());
        assert!(!signals.cancel());
        assert_eq!(signals.current(), AuthorizationState::Succeeded);
    }

    #[test]
    fn stop_request_is_taken_once() {
        let (signals, mut stop_rx) = SessionSignals::new();
        assert!(signals.request_stop());
        assert!(!signals.request_stop());
        assert!(stop_rx.try_recv().is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn success_and_cancel_race_has_one_winner() {
        for _ in 0..50 {
            let (signals, _stop) = SessionSignals::new();
            signals.listening();

            let a = signals.clone();
            let b = signals.clone();
            let success = tokio::spawn(async move { a.succeed() });
            let cancel = tokio::spawn(async move { b.cancel() });
            let (success, cancel) = (success.await.unwrap(), cancel.await.unwrap());

            assert!(success ^ cancel, "exactly one transition must win");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_stop_requests_deliver_once() {
        let (signals, stop_rx) = SessionSignals::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let signals = signals.clone();
            handles.push(tokio::spawn(async move { signals.request_stop() }));
        }
        let mut sent = 0;
        for handle in handles {
            if handle.await.unwrap() {
                sent += 1;
            }
        }
        assert_eq!(sent, 1);
        assert!(stop_rx.await.is_ok());
    }

    #[tokio::test]
    async fn success_path_stops_once_and_skips_timeout() {
        let (mut session, stops) = counting_session();
        session.arm_timeout(Duration::from_secs(60));
        session.signals().succeed();

        assert_eq!(session.wait_settled().await, AuthorizationState::Succeeded);
        let signals = session.signals().clone();
        tokio::time::timeout(Duration::from_secs(5), session.finish())
            .await
            .expect("finish must not wait for the timeout watcher")
            .unwrap();

        assert_eq!(stops.load(Ordering::SeqCst), 1);
        assert_eq!(signals.current(), AuthorizationState::Terminated);
        assert!(!signals.request_stop());
    }

    #[tokio::test]
    async fn timeout_path_cancels_and_stops_once() {
        let (mut session, stops) = counting_session();
        session.arm_timeout(Duration::from_millis(20));

        assert_eq!(session.wait_settled().await, AuthorizationState::Cancelled);
        let signals = session.signals().clone();
        session.finish().await.unwrap();

        assert_eq!(stops.load(Ordering::SeqCst), 1);
        assert_eq!(signals.current(), AuthorizationState::Terminated);
        assert!(!signals.succeed(), "late callback must not count");
    }

    #[tokio::test]
    async fn late_timeout_after_success_does_not_cancel() {
        let (mut session, stops) = counting_session();
        session.signals().succeed();
        session.arm_timeout(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(session.state(), AuthorizationState::Succeeded);
        session.finish().await.unwrap();
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shutdown_failure_is_reported() {
        let (signals, stop_rx) = SessionSignals::new();
        signals.listening();
        let mut session = CallbackSession::new(signals, None);
        session.spawn(async move {
            let _ = stop_rx.await;
            Err(CallbackError::ShutdownTimeout(Duration::from_secs(5)))
        });

        let err = session.finish().await.unwrap_err();
        assert_eq!(err, CallbackError::ShutdownTimeout(Duration::from_secs(5)));
    }
}
