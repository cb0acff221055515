use std::process::ExitCode;

use ferrocart_commands::Platform;

use crate::error::CliError;

pub fn run(platform: &Platform) -> Result<ExitCode, CliError> {
    let commands = platform.runner().list_commands();
    println!("Available commands ({}):", commands.len());
    for path in commands {
        println!("  {path}");
    }
    Ok(ExitCode::SUCCESS)
}
