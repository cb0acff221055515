//! `/pricing`: price history, competitor prices and optimization.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "pricing";

pub fn router() -> Router {
    let competitor = Router::new("/competitor")
        .with_command(provider_command(
            GROUP,
            "current",
            "CompetitorPrice",
            "Get competitor pricing",
        ))
        .with_command(provider_command(
            GROUP,
            "comparison",
            "CompetitorPrice",
            "Get price comparison across competitors",
        ));

    let optimization = Router::new("/optimization")
        .with_command(provider_command(
            GROUP,
            "elasticity",
            "PriceElasticity",
            "Get price elasticity analysis",
        ))
        .with_command(provider_command(
            GROUP,
            "recommendations",
            "PriceElasticity",
            "Get optimal pricing recommendations",
        ));

    Router::new("/pricing")
        .with_router(Router::new("/history").with_command(provider_command(
            GROUP,
            "historical",
            "PriceHistorical",
            "Get historical price data",
        )))
        .with_router(competitor)
        .with_router(optimization)
}
