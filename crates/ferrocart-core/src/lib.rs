//! # Ferrocart Core
//!
//! Dispatch contracts for the Ferrocart ecommerce analytics toolkit.
//!
//! ## Overview
//!
//! This crate provides the machinery that turns a command path such as
//! `/orders/summary` into a uniform response:
//!
//! - **Command router** composing hierarchical path prefixes
//! - **Provider registry** mapping `(provider, model)` to a fetcher
//! - **Command runner** tying path resolution to the fetch/transform contract
//! - **Response envelope** wrapping results with provenance metadata
//! - **Schema contract** for validated, typed records
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`discovery`] | Best-effort provider plugin discovery |
//! | [`domain`] | Timestamp and calendar date wrappers |
//! | [`envelope`] | Response envelope and row-oriented conversions |
//! | [`error`] | Dispatch and fetch error types |
//! | [`fetcher`] | Query parameters and the fetcher contract |
//! | [`model`] | Standard model (schema) contract |
//! | [`registry`] | Provider descriptors and the provider registry |
//! | [`router`] | Command specs and the router tree |
//! | [`runner`] | Command execution |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferrocart_core::{CommandRunner, CommandSpec, Parameters, ProviderRegistry, Router};
//!
//! let orders = Router::new("/orders")
//!     .with_command(CommandSpec::new("summary").model("OrderSummary"));
//! let root = Router::root().with_router(orders);
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register(my_provider());
//!
//! let runner = CommandRunner::new(root, registry);
//! let envelope = runner.run("/orders/summary", "demo", Parameters::new()).await?;
//! println!("{envelope}");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / HTTP     │
//! └────────┬────────┘
//!          │ run(path, provider, params)
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Command Runner  │────▶│ Command Table    │
//! └────────┬────────┘     │ (flattened tree) │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Provider        │────▶│ Fetcher          │
//! │ Registry        │     │ fetch → transform│
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ResponseEnvelope │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Resolution failures carry the list of valid alternatives:
//!
//! ```rust
//! use ferrocart_core::DispatchError;
//!
//! fn explain(error: &DispatchError) -> String {
//!     match error {
//!         DispatchError::CommandNotFound { available, .. }
//!         | DispatchError::ProviderNotFound { available, .. }
//!         | DispatchError::FetcherNotFound { available, .. } => {
//!             format!("try one of: {}", available.join(", "))
//!         }
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod discovery;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod registry;
pub mod router;
pub mod runner;

// Discovery
pub use discovery::{
    DiscoveryReport, PluginEntry, PluginError, PluginSource, SkippedPlugin, StaticPluginSource,
};

// Domain wrappers
pub use domain::{CalendarDate, UtcDateTime};

// Envelope types
pub use envelope::{RecordTable, ResponseEnvelope};

// Error types
pub use error::{CoreError, DispatchError, FetchError, FetchErrorKind, SchemaError};

// Fetcher contract
pub use fetcher::{FetchFuture, Fetcher, Parameters, QueryParams, RawRecord};

// Schema contract
pub use model::{downcast, transform_all, Record, Schema, StandardModel};

// Registry
pub use registry::{ProviderInfo, ProviderRegistry};

// Router
pub use router::{CommandInfo, CommandSpec, CommandTable, Handler, Router};

// Runner
pub use runner::CommandRunner;
