mod api;
mod list;
mod providers;
mod run;

use std::env;
use std::process::ExitCode;

use ferrocart_commands::{Platform, PlatformConfig};
use tracing::warn;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn dispatch(cli: Cli) -> Result<ExitCode, CliError> {
    dispatch_with(cli, |name| env::var(name).ok()).await
}

/// Listing commands never fails on configuration: a malformed variable is
/// logged and the defaults are used. `run` and `api` reject it.
async fn dispatch_with<F>(cli: Cli, lookup: F) -> Result<ExitCode, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.command {
        Command::Commands => list::run(&Platform::assemble(listing_config(lookup))),
        Command::Providers => providers::run(&Platform::assemble(listing_config(lookup))),
        Command::Run(args) => {
            let config = PlatformConfig::from_lookup(lookup)?;
            run::run(&Platform::assemble(config), args).await
        }
        Command::Api(args) => api::run(PlatformConfig::from_lookup(lookup)?, args).await,
    }
}

fn listing_config<F>(lookup: F) -> PlatformConfig
where
    F: Fn(&str) -> Option<String>,
{
    PlatformConfig::from_lookup(lookup).unwrap_or_else(|error| {
        warn!(error = %error, "ignoring invalid configuration, using defaults");
        PlatformConfig::default()
    })
}
