//! `/products`: sales, catalog, rankings and reviews.

use ferrocart_core::Router;

use super::provider_command;

const GROUP: &str = "products";

pub fn router() -> Router {
    let sales = Router::new("/sales")
        .with_command(provider_command(
            GROUP,
            "historical",
            "SalesHistorical",
            "Get historical sales data for a product or category",
        ))
        .with_command(provider_command(
            GROUP,
            "summary",
            "SalesHistorical",
            "Get sales summary for a time period",
        ));

    let catalog = Router::new("/catalog")
        .with_command(provider_command(
            GROUP,
            "search",
            "ProductInfo",
            "Search the product catalog",
        ))
        .with_command(provider_command(
            GROUP,
            "details",
            "ProductInfo",
            "Get product details by SKU",
        ));

    let rankings = Router::new("/rankings").with_command(provider_command(
        GROUP,
        "bestsellers",
        "ProductRanking",
        "Get best seller rankings",
    ));

    let reviews = Router::new("/reviews")
        .with_command(provider_command(
            GROUP,
            "recent",
            "ProductReview",
            "Get product reviews and ratings",
        ))
        .with_command(provider_command(
            GROUP,
            "sentiment",
            "ProductReview",
            "Get review sentiment analysis",
        ));

    Router::new("/products")
        .with_router(sales)
        .with_router(catalog)
        .with_router(rankings)
        .with_router(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_product_commands() {
        assert_eq!(
            router().list_paths(),
            vec![
                "/products/catalog/details",
                "/products/catalog/search",
                "/products/rankings/bestsellers",
                "/products/reviews/recent",
                "/products/reviews/sentiment",
                "/products/sales/historical",
                "/products/sales/summary",
            ]
        );
    }
}
