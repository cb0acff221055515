//! `/customers`: cohorts, lifetime value, segmentation and acquisition.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "customers";

pub fn router() -> Router {
    Router::new("/customers")
        .with_router(Router::new("/cohorts").with_command(provider_command(
            GROUP,
            "retention",
            "CustomerCohort",
            "Get customer cohort retention analysis",
        )))
        .with_router(Router::new("/ltv").with_command(provider_command(
            GROUP,
            "summary",
            "CustomerLifetimeValue",
            "Get customer lifetime value metrics",
        )))
        .with_router(Router::new("/segments").with_command(provider_command(
            GROUP,
            "rfm",
            "CustomerSegment",
            "Get RFM customer segmentation",
        )))
        .with_router(Router::new("/acquisition").with_command(provider_command(
            GROUP,
            "channels",
            "CustomerAcquisition",
            "Get customer acquisition by channel",
        )))
}
