//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod browser;
mod callback_server;
mod credential_store;
mod transport;

pub use browser::{Browser, BrowserError};
pub use callback_server::{CallbackError, CallbackServer};
pub use credential_store::{CredentialStore, CredentialStoreError};
pub use transport::{Transport, TransportError};
