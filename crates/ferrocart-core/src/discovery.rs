//! Best-effort provider plugin discovery.
//!
//! A [`PluginSource`] enumerates [`PluginEntry`] values for a named group.
//! Each entry's loader builds one [`ProviderInfo`]. Discovery never fails as
//! a whole: an entry that cannot be loaded is recorded in the
//! [`DiscoveryReport`] and skipped.

use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use thiserror::Error;

use crate::ProviderInfo;

/// Builds a provider descriptor on demand.
pub type PluginLoader = Arc<dyn Fn() -> Result<ProviderInfo, PluginError> + Send + Sync>;

/// Failure to enumerate or load a plugin.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PluginError {
    #[error("plugin source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("plugin '{id}' failed to load: {reason}")]
    LoadFailed { id: String, reason: String },

    #[error("plugin '{id}' is disabled")]
    Disabled { id: String },
}

impl PluginError {
    pub fn load_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// One discoverable provider.
#[derive(Clone)]
pub struct PluginEntry {
    id: String,
    group: String,
    loader: PluginLoader,
}

impl PluginEntry {
    pub fn new<F>(id: impl Into<String>, group: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<ProviderInfo, PluginError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            group: group.into(),
            loader: Arc::new(loader),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn load(&self) -> Result<ProviderInfo, PluginError> {
        (self.loader)()
    }
}

impl Debug for PluginEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("id", &self.id)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Enumerates plugin entries registered under a group name.
pub trait PluginSource: Send + Sync {
    fn entries(&self, group: &str) -> Result<Vec<PluginEntry>, PluginError>;
}

/// Compile-time list of plugin entries.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginSource {
    entries: Vec<PluginEntry>,
    disabled: BTreeSet<String>,
}

impl StaticPluginSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: PluginEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Makes the entry with `id` load as [`PluginError::Disabled`].
    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.disabled.insert(id.into());
        self
    }
}

impl PluginSource for StaticPluginSource {
    fn entries(&self, group: &str) -> Result<Vec<PluginEntry>, PluginError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.group == group)
            .map(|entry| {
                if self.disabled.contains(&entry.id) {
                    let id = entry.id.clone();
                    PluginEntry::new(entry.id.clone(), entry.group.clone(), move || {
                        Err(PluginError::Disabled { id: id.clone() })
                    })
                } else {
                    entry.clone()
                }
            })
            .collect())
    }
}

/// A plugin that was not registered, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPlugin {
    pub id: String,
    pub reason: String,
}

/// Outcome of one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub loaded: Vec<String>,
    pub skipped: Vec<SkippedPlugin>,
}

impl DiscoveryReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Human-readable line per skipped plugin.
    pub fn warnings(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(|skipped| format!("plugin '{}' skipped: {}", skipped.id, skipped.reason))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &'static str) -> PluginEntry {
        PluginEntry::new(id, "ferrocart.providers", move || Ok(ProviderInfo::new(id)))
    }

    #[test]
    fn static_source_filters_by_group() {
        let source = StaticPluginSource::new()
            .with_entry(entry("demo"))
            .with_entry(PluginEntry::new("other", "ferrocart.sinks", || {
                Ok(ProviderInfo::new("other"))
            }));

        let entries = source.entries("ferrocart.providers").expect("static source");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), "demo");
    }

    #[test]
    fn disabled_entry_fails_to_load() {
        let source = StaticPluginSource::new().with_entry(entry("demo")).disable("demo");

        let entries = source.entries("ferrocart.providers").expect("static source");
        assert_eq!(
            entries[0].load().expect_err("disabled"),
            PluginError::Disabled { id: String::from("demo") }
        );
    }

    #[test]
    fn report_warnings_name_each_skipped_plugin() {
        let report = DiscoveryReport {
            loaded: vec![String::from("demo")],
            skipped: vec![SkippedPlugin {
                id: String::from("shopify"),
                reason: String::from("missing SHOPIFY_TOKEN"),
            }],
        };

        assert!(!report.is_clean());
        assert_eq!(report.warnings(), vec!["plugin 'shopify' skipped: missing SHOPIFY_TOKEN"]);
    }
}
