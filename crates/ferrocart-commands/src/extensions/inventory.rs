//! `/inventory`: stock levels, demand forecasting and movements.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "inventory";

pub fn router() -> Router {
    let levels = Router::new("/levels")
        .with_command(provider_command(
            GROUP,
            "current",
            "InventoryLevel",
            "Get current inventory levels",
        ))
        .with_command(provider_command(GROUP, "alerts", "InventoryLevel", "Get low stock alerts"));

    Router::new("/inventory")
        .with_router(levels)
        .with_router(Router::new("/forecasting").with_command(provider_command(
            GROUP,
            "demand",
            "DemandForecast",
            "Get demand forecast",
        )))
        .with_router(Router::new("/movements").with_command(provider_command(
            GROUP,
            "history",
            "StockMovement",
            "Get stock movement history",
        )))
}
