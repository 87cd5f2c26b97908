//! pokcli Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod callback;
pub mod defaults;
pub mod persistence;

pub use adapters::{ReqwestTransport, SystemBrowser};
pub use callback::AxumCallbackServer;
pub use defaults::{client_builder, default_credentials_path};
pub use persistence::TomlCredentialStore;
