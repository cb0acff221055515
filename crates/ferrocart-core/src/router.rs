//! Hierarchical command router.
//!
//! A component builds a [`Router`] for its own prefix, registers one
//! [`CommandSpec`] per command, and hands the router to its parent for
//! mounting. The assembled tree is flattened once into a [`CommandTable`].
//!
//! # Collision policy
//!
//! Registration never fails. A second command at an identical path replaces
//! the first and a `warn` event is emitted. While flattening, a node's own
//! commands are collected before its children, and children in mount order,
//! so the entry registered or mounted last wins.
//!
//! # Example
//!
//! ```rust
//! use ferrocart_core::{CommandSpec, Router};
//!
//! let returns = Router::new("/returns")
//!     .with_command(CommandSpec::new("summary").model("ReturnsSummary"));
//! let orders = Router::new("/orders")
//!     .with_command(CommandSpec::new("summary").model("OrderSummary"))
//!     .with_router(returns);
//!
//! assert_eq!(orders.list_paths(), vec!["/orders/returns/summary", "/orders/summary"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::warn;

use crate::{FetchError, QueryParams, Record};

/// Direct command implementation for commands that bypass provider resolution.
pub type Handler = Arc<dyn Fn(&QueryParams) -> Result<Vec<Record>, FetchError> + Send + Sync>;

/// Registration-time description of one command, keyed by its local name.
#[derive(Clone)]
pub struct CommandSpec {
    name: String,
    handler: Option<Handler>,
    model: Option<String>,
    requires_provider: bool,
    tags: BTreeSet<String>,
    description: String,
}

impl CommandSpec {
    /// A provider-resolved command named `name` (surrounding slashes are dropped).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim_matches('/').to_owned(),
            handler: None,
            model: None,
            requires_provider: true,
            tags: BTreeSet::new(),
            description: String::new(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&QueryParams) -> Result<Vec<Record>, FetchError> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Marks the command as answered by its handler, never by a provider.
    pub fn without_provider(mut self) -> Self {
        self.requires_provider = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn into_info(self, path: String) -> CommandInfo {
        CommandInfo {
            path,
            handler: self.handler,
            model: self.model,
            requires_provider: self.requires_provider,
            tags: self.tags,
            description: self.description,
        }
    }
}

impl Debug for CommandSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("requires_provider", &self.requires_provider)
            .field("has_handler", &self.handler.is_some())
            .field("tags", &self.tags)
            .finish()
    }
}

/// Resolved command descriptor, identified by its absolute path.
#[derive(Clone)]
pub struct CommandInfo {
    path: String,
    handler: Option<Handler>,
    model: Option<String>,
    requires_provider: bool,
    tags: BTreeSet<String>,
    description: String,
}

impl CommandInfo {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn requires_provider(&self) -> bool {
        self.requires_provider
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Model to resolve through the registry, if this command goes through a provider.
    pub fn provider_model(&self) -> Option<&str> {
        if self.requires_provider {
            self.model.as_deref()
        } else {
            None
        }
    }

    /// Tags for grouping; falls back to the first path segment.
    pub fn group_tags(&self) -> Vec<String> {
        if !self.tags.is_empty() {
            return self.tags.iter().cloned().collect();
        }
        let group = self
            .path
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("general");
        vec![group.to_owned()]
    }
}

impl Debug for CommandInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInfo")
            .field("path", &self.path)
            .field("model", &self.model)
            .field("requires_provider", &self.requires_provider)
            .field("has_handler", &self.handler.is_some())
            .field("tags", &self.tags)
            .field("description", &self.description)
            .finish()
    }
}

/// One node of the command tree.
#[derive(Debug, Default)]
pub struct Router {
    prefix: String,
    commands: BTreeMap<String, CommandSpec>,
    children: Vec<Router>,
}

impl Router {
    /// Router for `prefix`. Trailing slashes are dropped and a leading slash
    /// is added when missing; `""` is the root.
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let trimmed = prefix.as_ref().trim_end_matches('/');
        let prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };

        Self {
            prefix,
            commands: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new("")
    }

    /// Effective prefix; absolute once this router has been mounted.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers `command` at `prefix + "/" + name`, replacing any command
    /// already registered under that name.
    pub fn register(&mut self, command: CommandSpec) {
        if let Some(previous) = self.commands.insert(command.name.clone(), command) {
            warn!(
                path = %format!("{}/{}", self.prefix, previous.name),
                "command re-registered; previous registration replaced"
            );
        }
    }

    pub fn with_command(mut self, command: CommandSpec) -> Self {
        self.register(command);
        self
    }

    /// Attaches `child` as an owned subtree, rewriting its prefix (and its
    /// descendants') to `self.prefix + child.prefix`.
    pub fn mount(&mut self, mut child: Router) {
        child.prepend_prefix(&self.prefix);
        self.children.push(child);
    }

    pub fn with_router(mut self, child: Router) -> Self {
        self.mount(child);
        self
    }

    /// Own commands plus all descendants', keyed by absolute path.
    pub fn flatten(&self) -> CommandTable {
        let mut commands = BTreeMap::new();
        self.collect_into(&mut commands);
        CommandTable { commands }
    }

    /// All command paths in lexicographic order.
    pub fn list_paths(&self) -> Vec<String> {
        self.flatten().paths()
    }

    fn prepend_prefix(&mut self, outer: &str) {
        self.prefix = format!("{outer}{}", self.prefix);
        for child in &mut self.children {
            child.prepend_prefix(outer);
        }
    }

    fn collect_into(&self, commands: &mut BTreeMap<String, CommandInfo>) {
        for (name, spec) in &self.commands {
            let path = format!("{}/{}", self.prefix, name);
            if commands
                .insert(path.clone(), spec.clone().into_info(path.clone()))
                .is_some()
            {
                warn!(path = %path, "command path collision while flattening; later entry wins");
            }
        }

        for child in &self.children {
            child.collect_into(commands);
        }
    }
}

/// Flattened, read-only view of a router tree.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, CommandInfo>,
}

impl CommandTable {
    pub fn get(&self, path: &str) -> Option<&CommandInfo> {
        self.commands.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.commands.contains_key(path)
    }

    /// Sorted, duplicate-free command paths.
    pub fn paths(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_joins_prefix_and_name() {
        let router = Router::new("/orders/")
            .with_command(CommandSpec::new("summary").model("OrderSummary"));

        assert_eq!(router.prefix(), "/orders");
        assert_eq!(router.list_paths(), vec!["/orders/summary"]);
    }

    #[test]
    fn prefix_without_leading_slash_is_normalized() {
        assert_eq!(Router::new("inventory").prefix(), "/inventory");
        assert_eq!(Router::new("/").prefix(), "");
    }

    #[test]
    fn mounted_command_resolves_only_at_composed_path() {
        let child = Router::new("/b").with_command(CommandSpec::new("c"));
        let parent = Router::new("/a").with_router(child);

        let table = parent.flatten();
        assert!(table.contains("/a/b/c"));
        assert!(!table.contains("/b/c"));
        assert!(!table.contains("/a/c"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn nested_mounts_rewrite_every_descendant() {
        let leaf = Router::new("/daily").with_command(CommandSpec::new("totals"));
        let middle = Router::new("/sales").with_router(leaf);
        let top = Router::new("/products").with_router(middle);
        let root = Router::root().with_router(Router::new("/v2").with_router(top));

        assert_eq!(root.list_paths(), vec!["/v2/products/sales/daily/totals"]);
    }

    #[test]
    fn sibling_names_do_not_collide_across_prefixes() {
        let returns = Router::new("/returns").with_command(CommandSpec::new("summary"));
        let orders = Router::new("/orders")
            .with_command(CommandSpec::new("summary"))
            .with_router(returns);

        assert_eq!(
            Router::root().with_router(orders).list_paths(),
            vec!["/orders/returns/summary", "/orders/summary"]
        );
    }

    #[test]
    fn re_registration_keeps_the_last_spec() {
        let mut router = Router::new("/pricing");
        router.register(CommandSpec::new("current").model("PriceHistorical"));
        router.register(CommandSpec::new("current").model("CompetitorPrice"));

        let table = router.flatten();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("/pricing/current").and_then(CommandInfo::model),
            Some("CompetitorPrice")
        );
    }

    #[test]
    fn later_mounted_subtree_wins_on_flatten_collision() {
        let first = Router::new("/x").with_command(CommandSpec::new("y").model("First"));
        let second = Router::new("/x").with_command(CommandSpec::new("y").model("Second"));
        let root = Router::root().with_router(first).with_router(second);

        let table = root.flatten();
        assert_eq!(table.get("/x/y").and_then(CommandInfo::model), Some("Second"));
    }

    #[test]
    fn list_paths_equals_sorted_flatten_keys() {
        let root = Router::root()
            .with_router(
                Router::new("/pricing")
                    .with_command(CommandSpec::new("zeta"))
                    .with_command(CommandSpec::new("alpha")),
            )
            .with_router(Router::new("/analytics").with_command(CommandSpec::new("funnel")));

        let paths = root.list_paths();
        let mut keys = root.flatten().iter().map(|info| info.path().to_owned()).collect::<Vec<_>>();
        keys.sort();
        keys.dedup();

        assert_eq!(paths, keys);
        assert_eq!(paths, vec!["/analytics/funnel", "/pricing/alpha", "/pricing/zeta"]);
    }

    #[test]
    fn provider_model_requires_flag_and_model() {
        let table = Router::new("/system")
            .with_command(CommandSpec::new("status").model("SystemStatus").without_provider())
            .with_command(CommandSpec::new("ping"))
            .flatten();

        assert_eq!(table.get("/system/status").and_then(CommandInfo::provider_model), None);
        assert_eq!(table.get("/system/ping").and_then(CommandInfo::provider_model), None);
    }

    #[test]
    fn group_tags_fall_back_to_top_level_segment() {
        let table = Router::new("/orders")
            .with_command(CommandSpec::new("summary"))
            .with_command(CommandSpec::new("recent").tag("fulfilment"))
            .flatten();

        assert_eq!(
            table.get("/orders/summary").map(CommandInfo::group_tags),
            Some(vec![String::from("orders")])
        );
        assert_eq!(
            table.get("/orders/recent").map(CommandInfo::group_tags),
            Some(vec![String::from("fulfilment")])
        );
    }
}
