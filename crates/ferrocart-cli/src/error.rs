use ferrocart_commands::{ConfigError, PlatformError};
use ferrocart_core::{CoreError, DispatchError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    Argument(String),

    /// The command, provider or fetcher could not be resolved.
    #[error("{0}")]
    Resolution(DispatchError),

    /// Fetch, transform or handler failure.
    #[error("{0}")]
    Execution(DispatchError),

    #[error("command '{path}' timed out after {millis} ms")]
    Timeout { path: String, millis: u128 },

    #[error(transparent)]
    Output(#[from] CoreError),

    #[error(transparent)]
    Server(#[from] ferrocart_web::WebError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Argument(_) | Self::Resolution(_) => 2,
            Self::Execution(_) | Self::Timeout { .. } => 3,
            Self::Output(_) => 4,
            Self::Server(_) => 6,
        }
    }
}

impl From<PlatformError> for CliError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Dispatch(dispatch) if dispatch.is_resolution() => {
                Self::Resolution(dispatch)
            }
            PlatformError::Dispatch(dispatch) => Self::Execution(dispatch),
            PlatformError::Timeout { path, after } => Self::Timeout {
                path,
                millis: after.as_millis(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrocart_core::FetchError;

    #[test]
    fn resolution_failures_exit_2_and_fetch_failures_exit_3() {
        let resolution = CliError::from(PlatformError::Dispatch(DispatchError::CommandNotFound {
            path: String::from("/nope"),
            available: vec![String::from("/orders/summary")],
        }));
        let execution = CliError::from(PlatformError::Dispatch(DispatchError::from(
            FetchError::upstream("storefront unavailable"),
        )));

        assert_eq!(resolution.exit_code(), 2);
        assert!(resolution.to_string().contains("Available: /orders/summary"));
        assert_eq!(execution.exit_code(), 3);
    }
}
