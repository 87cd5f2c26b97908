//! Authorization attempt state machine.
//!
//! A local callback listener moves through these states during one
//! authorization attempt:
//!
//! ```text
//! Idle -> Listening -> Succeeded -> Terminated
//!                   \-> Cancelled -/
//! ```

/// Current state of one authorization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthorizationState {
    /// Listener not started yet.
    #[default]
    Idle,
    /// Listener bound and waiting for the browser redirect.
    Listening,
    /// The redirect arrived.
    Succeeded,
    /// The attempt timed out before the redirect arrived.
    Cancelled,
    /// The listener has shut down.
    Terminated,
}

impl AuthorizationState {
    /// Returns true if `next` is a legal successor of this state.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Listening)
                | (Self::Listening, Self::Succeeded | Self::Cancelled | Self::Terminated)
                | (Self::Succeeded | Self::Cancelled, Self::Terminated)
        )
    }

    /// Returns true once the attempt no longer waits for the browser.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Cancelled | Self::Terminated)
    }
}
