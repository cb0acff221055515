//! Platform assembly: plugin discovery, the command tree and the runner.
//!
//! ```text
//! PlatformConfig ──▶ StaticPluginSource ──▶ ProviderRegistry ─┐
//!                                                             ├──▶ CommandRunner
//! extensions::root_router() + system::router(status) ─────────┘
//! ```

use std::time::Duration;

use ferrocart_core::{
    CommandRunner, DiscoveryReport, DispatchError, Parameters, PluginSource, ProviderRegistry,
    ResponseEnvelope, StaticPluginSource,
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{ConfigError, PlatformConfig};
use crate::extensions;
use crate::system::{self, SystemStatus};

/// Failure of a platform-level execution.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("command '{path}' timed out after {} ms", .after.as_millis())]
    Timeout { path: String, after: Duration },
}

impl PlatformError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dispatch(error) => error.code(),
            Self::Timeout { .. } => "platform.timeout",
        }
    }
}

/// Every plugin compiled into this build.
pub fn builtin_plugins() -> StaticPluginSource {
    StaticPluginSource::new().with_entry(ferrocart_demo::plugin_entry())
}

/// Assembled, immutable platform shared by the CLI and the HTTP API.
#[derive(Debug, Clone)]
pub struct Platform {
    runner: CommandRunner,
    discovery: DiscoveryReport,
    config: PlatformConfig,
}

impl Platform {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::assemble(PlatformConfig::from_env()?))
    }

    /// Discovers the built-in plugins, minus those disabled in `config`.
    pub fn assemble(config: PlatformConfig) -> Self {
        let source = config
            .disabled_plugins
            .iter()
            .fold(builtin_plugins(), |source, id| source.disable(id.clone()));
        Self::assemble_with(config, &source)
    }

    pub fn assemble_with(config: PlatformConfig, source: &dyn PluginSource) -> Self {
        let mut registry = ProviderRegistry::new();
        let discovery = registry.discover(source, ferrocart_demo::PROVIDER_GROUP);
        if !registry.contains(&config.default_provider) {
            warn!(provider = %config.default_provider, "default provider is not registered");
        }

        let extensions = extensions::root_router();
        let status = SystemStatus::new(
            config.default_provider.clone(),
            registry.list_providers(),
            extensions.flatten().len() + system::COMMAND_COUNT,
        );
        let router = extensions.with_router(system::router(status));
        let runner = CommandRunner::new(router, registry);

        info!(
            providers = runner.registry().len(),
            commands = runner.commands().len(),
            skipped = discovery.skipped.len(),
            "platform assembled"
        );

        Self {
            runner,
            discovery,
            config,
        }
    }

    pub fn runner(&self) -> &CommandRunner {
        &self.runner
    }

    pub fn discovery(&self) -> &DiscoveryReport {
        &self.discovery
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn default_provider(&self) -> &str {
        &self.config.default_provider
    }

    /// Runs `path` under the configured deadline and stamps a fresh
    /// `request_id` into the envelope's extra map. `None` selects the default
    /// provider.
    pub async fn execute(
        &self,
        path: &str,
        provider: Option<&str>,
        params: Parameters,
    ) -> Result<ResponseEnvelope, PlatformError> {
        let provider = provider
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.config.default_provider.as_str());
        let deadline = self.config.request_timeout;

        let envelope = tokio::time::timeout(deadline, self.runner.run(path, provider, params))
            .await
            .map_err(|_| PlatformError::Timeout {
                path: path.to_owned(),
                after: deadline,
            })??;

        Ok(envelope.with_extra("request_id", Uuid::new_v4().to_string()))
    }
}
