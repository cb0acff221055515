//! `/marketing`: campaigns, attribution and keywords.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "marketing";

pub fn router() -> Router {
    let campaigns = Router::new("/campaigns")
        .with_command(provider_command(
            GROUP,
            "performance",
            "CampaignPerformance",
            "Get campaign performance metrics",
        ))
        .with_command(provider_command(
            GROUP,
            "roi",
            "CampaignPerformance",
            "Get campaign ROI summary",
        ));

    let keywords = Router::new("/keywords")
        .with_command(provider_command(
            GROUP,
            "performance",
            "KeywordPerformance",
            "Get keyword performance data",
        ))
        .with_command(provider_command(
            GROUP,
            "opportunities",
            "KeywordPerformance",
            "Get keyword opportunities",
        ));

    Router::new("/marketing")
        .with_router(campaigns)
        .with_router(Router::new("/attribution").with_command(provider_command(
            GROUP,
            "channels",
            "ChannelAttribution",
            "Get channel attribution data",
        )))
        .with_router(keywords)
}
