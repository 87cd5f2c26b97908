//! Authorization module for the pokcli client.
//!
//! This module provides:
//! - The per-attempt callback session state machine
//! - The authorization flow controller

mod flow;
mod session;

pub use flow::{AuthorizationTimings, Authorizer};
pub use session::{CallbackSession, SessionSignals};
