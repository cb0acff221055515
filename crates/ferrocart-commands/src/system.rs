//! Built-in `/system` commands answered without a provider.

use ferrocart_core::{CommandSpec, Router, Schema};
use serde::{Deserialize, Serialize};

/// Number of commands registered by [`router`].
pub const COMMAND_COUNT: usize = 1;

/// Snapshot of the assembled platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub service: String,
    pub version: String,
    pub default_provider: String,
    pub providers: Vec<String>,
    pub commands: usize,
}

impl Schema for SystemStatus {
    const MODEL: &'static str = "SystemStatus";
}

impl SystemStatus {
    pub fn new(
        default_provider: impl Into<String>,
        providers: Vec<String>,
        commands: usize,
    ) -> Self {
        Self {
            service: String::from("ferrocart"),
            version: String::from(env!("CARGO_PKG_VERSION")),
            default_provider: default_provider.into(),
            providers,
            commands,
        }
    }
}

/// `/system/status`, answering with `status` on every call.
pub fn router(status: SystemStatus) -> Router {
    Router::new("/system").with_command(
        CommandSpec::new("status")
            .model(SystemStatus::MODEL)
            .description("Get platform status: providers and command count")
            .tag("system")
            .without_provider()
            .handler(move |_params| Ok(vec![status.clone().into_record()])),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrocart_core::{downcast, QueryParams};

    #[test]
    fn status_command_bypasses_providers() {
        let table = router(SystemStatus::new("demo", vec![String::from("demo")], 36)).flatten();
        let info = table.get("/system/status").expect("registered");

        assert!(!info.requires_provider());
        assert_eq!(info.provider_model(), None);
        assert_eq!(table.len(), COMMAND_COUNT);

        let handler = info.handler().expect("handler");
        let records = handler(&QueryParams::new("anything")).expect("status");
        let status = downcast::<SystemStatus>(&records[0]).expect("SystemStatus");
        assert_eq!(status.commands, 36);
        assert_eq!(status.providers, vec!["demo"]);
    }
}
