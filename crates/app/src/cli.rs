//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pokcli_application::{ClientBuilder, ClientError, ClientResult};
use pokcli_domain::endpoints::DEFAULT_CALLBACK_PORT;

use crate::logging::DEFAULT_LOG_LEVEL;

/// Command line client for Pocket.
#[derive(Parser, Debug)]
#[command(name = "pokcli")]
#[command(about = "Command line client for Pocket")]
#[command(version)]
pub struct Cli {
    /// Log level from 0 (panic) to 6 (trace). `RUST_LOG` overrides it.
    #[arg(long, alias = "logLevel", global = true, default_value_t = DEFAULT_LOG_LEVEL)]
    pub log_level: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Retrieve saved articles
    Articles {
        #[command(flatten)]
        auth: AuthArgs,

        /// Only return articles with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Print the response exactly as received
        #[arg(long)]
        raw: bool,
    },

    /// Authorize pokcli and store the access token
    Auth {
        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Print version and build information
    Version,
}

/// Where the client gets its credentials from.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AuthArgs {
    /// TOML file holding `consumer_key` and `access_token`
    #[arg(long, env = "POKCLI_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Application consumer key
    #[arg(long, env = "POKCLI_CONSUMER_KEY")]
    pub consumer_key: Option<String>,

    /// Access token from an earlier authorization
    #[arg(long, env = "POKCLI_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Local port receiving the browser redirect
    #[arg(long, env = "POKCLI_CALLBACK_PORT", default_value_t = DEFAULT_CALLBACK_PORT)]
    pub callback_port: u16,
}

impl AuthArgs {
    /// Credentials file to use. `default_file` applies when no file, consumer
    /// key or access token was given.
    pub fn credentials_file(
        &self,
        default_file: Option<PathBuf>,
    ) -> ClientResult<Option<PathBuf>> {
        if let Some(path) = &self.credentials {
            return Ok(Some(path.clone()));
        }
        if self.consumer_key.is_some() || self.access_token.is_some() {
            return Ok(None);
        }
        default_file.map(Some).ok_or_else(|| {
            ClientError::Configuration(
                "no configuration directory found, pass --credentials or --consumer-key"
                    .to_string(),
            )
        })
    }

    /// Applies the arguments to `builder`.
    pub fn configure(
        &self,
        mut builder: ClientBuilder,
        default_file: Option<PathBuf>,
    ) -> ClientResult<ClientBuilder> {
        if let Some(path) = self.credentials_file(default_file)? {
            builder = builder.credentials_file(path);
        }
        if let Some(key) = &self.consumer_key {
            builder = builder.consumer_key(key.clone());
        }
        if let Some(token) = &self.access_token {
            builder = builder.access_token(token.clone());
        }
        Ok(builder.callback_port(self.callback_port))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pokcli_application::ClientOption;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn auth_args(command: Command) -> AuthArgs {
        match command {
            Command::Articles { auth, .. } | Command::Auth { auth } => auth,
            Command::Version => panic!("version has no auth arguments"),
        }
    }

    #[test]
    fn articles_with_tag_and_key() {
        let cli = parse(&[
            "pokcli",
            "articles",
            "--tag",
            "news",
            "--consumer-key",
            "ck",
            "--access-token",
            "tok",
        ]);

        assert_eq!(cli.log_level, DEFAULT_LOG_LEVEL);
        match cli.command {
            Command::Articles { auth, tag, raw } => {
                assert_eq!(tag.as_deref(), Some("news"));
                assert!(!raw);
                assert_eq!(auth.consumer_key.as_deref(), Some("ck"));
                assert_eq!(auth.access_token.as_deref(), Some("tok"));
                assert_eq!(auth.callback_port, DEFAULT_CALLBACK_PORT);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_level_is_global_and_accepts_legacy_spelling() {
        assert_eq!(parse(&["pokcli", "version", "--log-level", "5"]).log_level, 5);
        assert_eq!(parse(&["pokcli", "--logLevel", "2", "version"]).log_level, 2);
    }

    #[test]
    fn default_file_is_used_without_file_or_key() {
        let auth = auth_args(parse(&["pokcli", "auth"]).command);
        let default = PathBuf::from("/home/u/.config/pokcli/credentials.toml");

        assert_eq!(
            auth.credentials_file(Some(default.clone())).unwrap(),
            Some(default)
        );
        assert!(matches!(
            auth.credentials_file(None),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn consumer_key_disables_default_file() {
        let auth = auth_args(parse(&["pokcli", "auth", "--consumer-key", "ck"]).command);

        let builder = auth
            .configure(ClientBuilder::new(), Some(PathBuf::from("default.toml")))
            .unwrap();

        assert_eq!(
            builder.applied_options(),
            &[ClientOption::ConsumerKey, ClientOption::CallbackPort]
        );
    }

    #[test]
    fn access_token_alone_skips_default_file() {
        let auth = auth_args(parse(&["pokcli", "auth", "--access-token", "tok"]).command);
        let default = PathBuf::from("default.toml");

        assert_eq!(auth.credentials_file(Some(default.clone())).unwrap(), None);

        let builder = auth.configure(ClientBuilder::new(), Some(default)).unwrap();
        assert_eq!(
            builder.applied_options(),
            &[ClientOption::AccessToken, ClientOption::CallbackPort]
        );
    }

    #[test]
    fn explicit_file_with_access_token_records_both_options() {
        let auth = auth_args(
            parse(&[
                "pokcli",
                "auth",
                "--credentials",
                "creds.toml",
                "--access-token",
                "tok",
                "--callback-port",
                "9000",
            ])
            .command,
        );

        let builder = auth.configure(ClientBuilder::new(), None).unwrap();

        assert_eq!(
            builder.applied_options(),
            &[
                ClientOption::CredentialsFile,
                ClientOption::AccessToken,
                ClientOption::CallbackPort,
            ]
        );
    }
}
