//! pokcli - Command line client for Pocket
//!
//! Authorizes against Pocket through the browser, stores the access token
//! in a TOML credentials file and prints saved articles.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    match commands::run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            if err.is_fatal() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
