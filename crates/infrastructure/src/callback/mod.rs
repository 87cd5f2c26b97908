//! Callback server adapter.

mod page;
mod server;

pub use server::{AxumCallbackServer, DEFAULT_GRACE_PERIOD};
