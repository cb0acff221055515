//! Provider descriptors and the provider registry.
//!
//! The registry is an explicit value, built during assembly and then frozen
//! inside a [`CommandRunner`](crate::CommandRunner). Names are kept in
//! `BTreeMap`s so every "available" list comes out sorted.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{DiscoveryReport, DispatchError, Fetcher, PluginSource, SkippedPlugin};

/// Provider descriptor: metadata plus one fetcher per supported model.
#[derive(Clone, Default)]
pub struct ProviderInfo {
    name: String,
    description: String,
    website: Option<String>,
    credentials: Vec<String>,
    fetchers: BTreeMap<String, Arc<dyn Fetcher>>,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Names of credentials (environment variables) the provider needs.
    pub fn with_credentials<I, S>(mut self, credentials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.credentials = credentials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fetcher<F>(self, model: impl Into<String>, fetcher: F) -> Self
    where
        F: Fetcher + 'static,
    {
        self.with_shared_fetcher(model, Arc::new(fetcher))
    }

    /// Registers one fetcher instance under `model`; the same instance may
    /// back several models.
    pub fn with_shared_fetcher(
        mut self,
        model: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        self.register_fetcher(model, fetcher);
        self
    }

    pub fn register_fetcher(&mut self, model: impl Into<String>, fetcher: Arc<dyn Fetcher>) {
        let model = model.into();
        if self.fetchers.insert(model.clone(), fetcher).is_some() {
            warn!(
                provider = %self.name,
                model = %model,
                "fetcher re-registered; previous fetcher replaced"
            );
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn credentials(&self) -> &[String] {
        &self.credentials
    }

    /// Sorted model names this provider can answer.
    pub fn models(&self) -> Vec<String> {
        self.fetchers.keys().cloned().collect()
    }

    pub fn fetcher(&self, model: &str) -> Option<Arc<dyn Fetcher>> {
        self.fetchers.get(model).cloned()
    }

    /// Required credentials for which `lookup` returns nothing (or an empty value).
    pub fn missing_credentials<F>(&self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.credentials
            .iter()
            .filter(|name| lookup(name).map_or(true, |value| value.trim().is_empty()))
            .cloned()
            .collect()
    }
}

impl Debug for ProviderInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("website", &self.website)
            .field("credentials", &self.credentials)
            .field("models", &self.fetchers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Catalog of providers by name.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderInfo>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the provider with the same name.
    pub fn register(&mut self, provider: ProviderInfo) {
        let name = provider.name.clone();
        if self.providers.insert(name.clone(), provider).is_some() {
            debug!(provider = %name, "provider re-registered");
        }
    }

    pub fn with_provider(mut self, provider: ProviderInfo) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, name: &str) -> Result<&ProviderInfo, DispatchError> {
        self.providers
            .get(name)
            .ok_or_else(|| DispatchError::ProviderNotFound {
                name: name.to_owned(),
                available: self.list_providers(),
            })
    }

    /// Resolves the provider first, then its fetcher for `model`.
    pub fn get_fetcher(
        &self,
        provider: &str,
        model: &str,
    ) -> Result<Arc<dyn Fetcher>, DispatchError> {
        let info = self.get(provider)?;
        info.fetcher(model)
            .ok_or_else(|| DispatchError::FetcherNotFound {
                provider: provider.to_owned(),
                model: model.to_owned(),
                available: info.models(),
            })
    }

    pub fn list_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn providers(&self) -> impl Iterator<Item = &ProviderInfo> {
        self.providers.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Loads every entry of `group` from `source`. Entries that fail are
    /// skipped and reported; the pass itself never fails.
    pub fn discover(&mut self, source: &dyn PluginSource, group: &str) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        let entries = match source.entries(group) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(group = %group, error = %error, "plugin source unavailable");
                report.skipped.push(SkippedPlugin {
                    id: group.to_owned(),
                    reason: error.to_string(),
                });
                return report;
            }
        };

        for entry in entries {
            match entry.load() {
                Ok(provider) => {
                    debug!(plugin = %entry.id(), provider = %provider.name(), "plugin loaded");
                    report.loaded.push(provider.name().to_owned());
                    self.register(provider);
                }
                Err(error) => {
                    warn!(plugin = %entry.id(), error = %error, "plugin skipped");
                    report.skipped.push(SkippedPlugin {
                        id: entry.id().to_owned(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        report
    }
}
