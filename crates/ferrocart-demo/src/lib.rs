//! # Ferrocart Demo Provider
//!
//! Realistic mock ecommerce data for every ferrocart domain. Needs no API
//! keys or network access, which makes it the default provider for
//! development, tests and demos.
//!
//! ```rust
//! let provider = ferrocart_demo::provider();
//!
//! assert_eq!(provider.name(), "demo");
//! assert!(provider.models().contains(&String::from("OrderSummary")));
//! ```

pub mod fetchers;
pub mod models;

use std::sync::Arc;

use ferrocart_core::{Fetcher, PluginEntry, ProviderInfo};

pub use fetchers::{Dataset, DemoFetcher, DemoProduct, PRODUCTS};
pub use models::{
    CampaignPerformance, CompetitorPrice, CustomerSegment, FunnelConversion, InventoryLevel,
    OrderSummary, SalesHistorical,
};

pub const PROVIDER_NAME: &str = "demo";
pub const PROVIDER_DESCRIPTION: &str = "Demo provider with realistic mock ecommerce data";
pub const PROVIDER_WEBSITE: &str = "https://github.com/bankyresearch/openEC";

/// Plugin group under which providers are discovered.
pub const PROVIDER_GROUP: &str = "ferrocart.providers";

/// The `demo` provider with one shared fetcher per dataset, registered under
/// every model name of that dataset.
pub fn provider() -> ProviderInfo {
    Dataset::ALL.into_iter().fold(
        ProviderInfo::new(PROVIDER_NAME)
            .with_description(PROVIDER_DESCRIPTION)
            .with_website(PROVIDER_WEBSITE),
        |info, dataset| {
            let fetcher: Arc<dyn Fetcher> = Arc::new(DemoFetcher::new(dataset));
            dataset
                .models()
                .iter()
                .fold(info, |info, model| info.with_shared_fetcher(*model, Arc::clone(&fetcher)))
        },
    )
}

/// Discovery entry that loads [`provider`].
pub fn plugin_entry() -> PluginEntry {
    PluginEntry::new(PROVIDER_NAME, PROVIDER_GROUP, || Ok(provider()))
}
