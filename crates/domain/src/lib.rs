//! pokcli Domain - Core types
//!
//! This crate defines the domain model for the pokcli Pocket client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod retrieve;
pub mod state;
pub mod status;

pub use auth::{AccessGrant, AccessTokenRequest, RequestTokenRequest, RequestTokenResponse};
pub use credentials::Credentials;
pub use error::{DomainError, DomainResult};
pub use retrieve::RetrieveRequest;
pub use state::AuthorizationState;
pub use status::{describe_status, status_reason};
