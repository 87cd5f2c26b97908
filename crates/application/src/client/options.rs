//! Options recorded while a client is being configured.

use std::fmt;

use crate::error::{ClientError, ClientResult};

/// A configuration option applied to a [`super::ClientBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClientOption {
    /// Credentials are read from and written back to a file.
    CredentialsFile,
    /// The HTTP transport was overridden.
    Transport,
    /// An access token was supplied directly.
    AccessToken,
    /// A consumer key was supplied directly.
    ConsumerKey,
    /// The callback port was overridden.
    CallbackPort,
}

impl ClientOption {
    /// Name used in configuration error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CredentialsFile => "credentials file",
            Self::Transport => "transport",
            Self::AccessToken => "access token",
            Self::ConsumerKey => "consumer key",
            Self::CallbackPort => "callback port",
        }
    }
}

impl fmt::Display for ClientOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairs of options that cannot be combined.
pub const INCOMPATIBLE_OPTIONS: [(ClientOption, ClientOption); 2] = [
    (ClientOption::CredentialsFile, ClientOption::AccessToken),
    (ClientOption::CredentialsFile, ClientOption::ConsumerKey),
];

/// Fails on the first incompatible pair found in `applied`.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] naming both options.
pub fn validate_options(applied: &[ClientOption]) -> ClientResult<()> {
    for (first, second) in INCOMPATIBLE_OPTIONS {
        if applied.contains(&first) && applied.contains(&second) {
            return Err(ClientError::Configuration(format!(
                "incompatible options {first} & {second}"
            )));
        }
    }
    Ok(())
}
