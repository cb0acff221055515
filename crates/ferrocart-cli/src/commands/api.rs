use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;

use ferrocart_commands::{Platform, PlatformConfig};

use crate::cli::ApiArgs;
use crate::error::CliError;

pub async fn run(mut config: PlatformConfig, args: ApiArgs) -> Result<ExitCode, CliError> {
    if let Some(host) = args.host {
        config.api_host = host;
    }
    if let Some(port) = args.port {
        config.api_port = port;
    }

    let ip = config
        .api_host
        .parse::<IpAddr>()
        .map_err(|_| CliError::Argument(format!("invalid host '{}'", config.api_host)))?;
    let addr = SocketAddr::new(ip, config.api_port);

    eprintln!("Starting ferrocart API on http://{addr}");
    ferrocart_web::serve(Platform::assemble(config), addr).await?;
    Ok(ExitCode::SUCCESS)
}
