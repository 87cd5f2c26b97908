//! Authorization wire types

mod types;

pub use types::{AccessGrant, AccessTokenRequest, RequestTokenRequest, RequestTokenResponse};
