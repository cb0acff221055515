//! `/analytics`: funnel, traffic and category performance.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "analytics";

pub fn router() -> Router {
    let funnel = Router::new("/funnel")
        .with_command(provider_command(
            GROUP,
            "conversion",
            "FunnelConversion",
            "Get conversion funnel data",
        ))
        .with_command(provider_command(
            GROUP,
            "abandonment",
            "FunnelConversion",
            "Get cart abandonment metrics",
        ));

    let category = Router::new("/category")
        .with_command(provider_command(
            GROUP,
            "performance",
            "CategoryPerformance",
            "Get category performance metrics",
        ))
        .with_command(provider_command(
            GROUP,
            "market_share",
            "CategoryPerformance",
            "Get category market share",
        ));

    Router::new("/analytics")
        .with_router(funnel)
        .with_router(Router::new("/traffic").with_command(provider_command(
            GROUP,
            "sources",
            "TrafficSource",
            "Get traffic source breakdown",
        )))
        .with_router(category)
}
