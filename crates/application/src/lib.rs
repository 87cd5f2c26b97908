//! pokcli Application - Use cases and port definitions
//!
//! This crate contains the authorization flow, the client facade and the
//! port traits implemented by the infrastructure layer.

pub mod auth;
pub mod client;
pub mod error;
pub mod ports;

#[cfg(test)]
mod testing;

pub use auth::{AuthorizationTimings, Authorizer, CallbackSession, SessionSignals};
pub use client::{ClientBuilder, ClientOption, PocketClient};
pub use error::{ClientError, ClientResult};
