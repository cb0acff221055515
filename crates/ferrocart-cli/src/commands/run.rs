use std::process::ExitCode;

use ferrocart_commands::Platform;
use ferrocart_core::Parameters;
use tracing::debug;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output;

pub async fn run(platform: &Platform, args: RunArgs) -> Result<ExitCode, CliError> {
    let params = args.params.into_iter().collect::<Parameters>();
    debug!(
        command = %args.path,
        provider = ?args.provider,
        params = params.len(),
        "running command"
    );
    let envelope = platform
        .execute(&args.path, args.provider.as_deref(), params)
        .await?;

    output::render(&envelope, args.output, args.pretty)?;
    Ok(ExitCode::SUCCESS)
}
