//! Command execution.
//!
//! [`CommandRunner`] is built once from a router tree and a registry. The tree
//! is flattened at construction and both halves are frozen behind `Arc`, so
//! cloning a runner is cheap and every clone sees the same snapshot.

use std::sync::Arc;

use tracing::debug;

use crate::{
    CommandInfo, CommandTable, DispatchError, Parameters, ProviderRegistry, QueryParams,
    ResponseEnvelope, Router,
};

/// Resolves a command path and executes it against a provider.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    commands: Arc<CommandTable>,
    registry: Arc<ProviderRegistry>,
}

impl CommandRunner {
    pub fn new(router: Router, registry: ProviderRegistry) -> Self {
        Self::from_parts(router.flatten(), registry)
    }

    pub fn from_parts(commands: CommandTable, registry: ProviderRegistry) -> Self {
        Self {
            commands: Arc::new(commands),
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn command(&self, path: &str) -> Option<&CommandInfo> {
        self.commands.get(path)
    }

    /// Sorted command paths.
    pub fn list_commands(&self) -> Vec<String> {
        self.commands.paths()
    }

    /// Runs `path` against `provider`.
    ///
    /// Provider commands resolve `(provider, model)` and call `fetch` then
    /// `transform`; other commands call their handler. Fetch and handler
    /// errors are returned unchanged as [`DispatchError::Fetch`].
    ///
    /// # Errors
    ///
    /// - [`DispatchError::CommandNotFound`] for an unknown path
    /// - [`DispatchError::ProviderNotFound`] / [`DispatchError::FetcherNotFound`]
    ///   when the registry cannot answer
    /// - [`DispatchError::MissingHandler`] for a command with no way to run
    pub async fn run(
        &self,
        path: &str,
        provider: &str,
        params: Parameters,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let info = self
            .commands
            .get(path)
            .ok_or_else(|| DispatchError::CommandNotFound {
                path: path.to_owned(),
                available: self.commands.paths(),
            })?;
        let params = QueryParams::from_values(provider, params);

        let results = match info.provider_model() {
            Some(model) => {
                let fetcher = self.registry.get_fetcher(provider, model)?;
                debug!(command = %path, provider = %provider, model = %model, "fetching");
                let raw = fetcher.fetch(&params).await?;
                debug!(command = %path, raw_records = raw.len(), "transforming");
                fetcher.transform(raw, &params)?
            }
            None => {
                let handler = info.handler().ok_or_else(|| DispatchError::MissingHandler {
                    path: path.to_owned(),
                })?;
                debug!(command = %path, "invoking handler");
                handler(&params)?
            }
        };

        Ok(ResponseEnvelope::new(
            results,
            provider,
            info.model().unwrap_or_default(),
            path,
        ))
    }
}
