//! Command handlers.

use std::io::Write;

use pokcli_application::{ClientError, ClientResult, PocketClient};
use pokcli_infrastructure::{client_builder, default_credentials_path};
use tracing::{info, warn};

use crate::cli::{AuthArgs, Command};

/// Runs `command` to completion.
pub async fn run(command: Command) -> ClientResult<()> {
    match command {
        Command::Articles { auth, tag, raw } => articles(&auth, tag.as_deref(), raw).await,
        Command::Auth { auth } => authorize(&auth).await,
        Command::Version => {
            write_stdout(version_line().as_bytes())?;
            Ok(())
        }
    }
}

async fn connect(auth: &AuthArgs) -> ClientResult<PocketClient> {
    auth.configure(client_builder()?, default_credentials_path())?
        .build()
        .await
}

async fn articles(auth: &AuthArgs, tag: Option<&str>, raw: bool) -> ClientResult<()> {
    let client = connect(auth).await?;
    let body = client.get_articles(tag).await?;

    if raw {
        return write_stdout(&body);
    }
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) => {
            let mut pretty = serde_json::to_vec_pretty(&value)?;
            pretty.push(b'\n');
            write_stdout(&pretty)
        }
        Err(err) => {
            warn!(error = %err, "response is not JSON, printing it unchanged");
            write_stdout(&body)
        }
    }
}

async fn authorize(auth: &AuthArgs) -> ClientResult<()> {
    let client = connect(auth).await?;
    match client.username() {
        Some(username) => info!("authorized as {username}"),
        None => info!("already authorized"),
    }
    if let Some(path) = client.credentials_file() {
        info!("credentials stored in {}", path.display());
    }
    Ok(())
}

fn version_line() -> String {
    format!(
        "pokcli {} (build {})\n",
        env!("CARGO_PKG_VERSION"),
        option_env!("POKCLI_BUILD").unwrap_or("dev")
    )
}

fn write_stdout(bytes: &[u8]) -> ClientResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| ClientError::Internal(format!("could not write output: {e}")))
}
