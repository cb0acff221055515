//! `/orders`: order metrics, fulfillment and returns.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "orders";

pub fn router() -> Router {
    let fulfillment = Router::new("/fulfillment").with_command(provider_command(
        GROUP,
        "status",
        "FulfillmentStatus",
        "Get fulfillment status breakdown",
    ));

    let returns = Router::new("/returns")
        .with_command(provider_command(
            GROUP,
            "summary",
            "ReturnsSummary",
            "Get returns summary and trends",
        ))
        .with_command(provider_command(
            GROUP,
            "reasons",
            "ReturnsSummary",
            "Get top return reasons",
        ));

    Router::new("/orders")
        .with_command(provider_command(
            GROUP,
            "summary",
            "OrderSummary",
            "Get order summary metrics",
        ))
        .with_command(provider_command(GROUP, "recent", "OrderDetail", "Get recent orders"))
        .with_router(fulfillment)
        .with_router(returns)
}
