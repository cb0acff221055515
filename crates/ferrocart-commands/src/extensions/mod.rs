//! Command extensions, one per ecommerce domain.
//!
//! Each module exposes `router()` returning its group's tree, rooted at the
//! group prefix. [`root_router`] mounts all of them under the empty root
//! prefix; the platform adds `/system` on top.

pub mod analytics;
pub mod customers;
pub mod inventory;
pub mod marketing;
pub mod orders;
pub mod pricing;
pub mod products;

use ferrocart_core::{CommandSpec, Router};

/// Top-level command groups in mount order.
pub const GROUPS: [&str; 7] = [
    "products",
    "orders",
    "customers",
    "inventory",
    "marketing",
    "analytics",
    "pricing",
];

/// Every extension, mounted under the root prefix.
pub fn root_router() -> Router {
    Router::root()
        .with_router(products::router())
        .with_router(orders::router())
        .with_router(customers::router())
        .with_router(inventory::router())
        .with_router(marketing::router())
        .with_router(analytics::router())
        .with_router(pricing::router())
}

/// Provider-resolved command tagged with its top-level group.
fn provider_command(group: &str, name: &str, model: &str, description: &str) -> CommandSpec {
    CommandSpec::new(name)
        .model(model)
        .description(description)
        .tag(group)
}
