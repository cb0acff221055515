//! Canonical ecommerce schemas.
//!
//! Every schema keeps unknown upstream fields in `extra`, so a provider can
//! return richer records than the declared fields without failing validation.

use ferrocart_core::{CalendarDate, Schema, UtcDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_currency() -> String {
    String::from("USD")
}

fn default_in_stock() -> bool {
    true
}

fn default_stock_status() -> String {
    String::from("in_stock")
}

/// Daily unit and revenue totals for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesHistorical {
    pub date: CalendarDate,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub units_sold: u64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub average_selling_price: Option<f64>,
    #[serde(default)]
    pub returns: u64,
    #[serde(default)]
    pub net_units: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for SalesHistorical {
    const MODEL: &'static str = "SalesHistorical";
}

/// Aggregate order metrics for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub date: CalendarDate,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub average_order_value: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub total_units: u64,
    #[serde(default)]
    pub cancelled_orders: u64,
    #[serde(default)]
    pub returned_orders: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for OrderSummary {
    const MODEL: &'static str = "OrderSummary";
}

/// RFM customer segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub segment: String,
    #[serde(default)]
    pub customer_count: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub avg_recency_days: f64,
    #[serde(default)]
    pub avg_frequency: f64,
    #[serde(default)]
    pub avg_monetary: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for CustomerSegment {
    const MODEL: &'static str = "CustomerSegment";
}

/// Stock on hand for one SKU in one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(default = "default_stock_status")]
    pub status: String,
    #[serde(default)]
    pub reorder_point: Option<u64>,
    #[serde(default)]
    pub days_of_supply: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<UtcDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for InventoryLevel {
    const MODEL: &'static str = "InventoryLevel";
}

/// Daily advertising performance for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPerformance {
    pub date: CalendarDate,
    #[serde(default)]
    pub campaign_id: String,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub conversions: u64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub roas: f64,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub cpa: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for CampaignPerformance {
    const MODEL: &'static str = "CampaignPerformance";
}

/// Users reaching one checkout funnel stage on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelConversion {
    pub date: CalendarDate,
    pub stage: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub drop_off_rate: f64,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for FunnelConversion {
    const MODEL: &'static str = "FunnelConversion";
}

/// A competitor's listed price for one of our SKUs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPrice {
    pub date: CalendarDate,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub competitor: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub price_difference: Option<f64>,
    #[serde(default)]
    pub price_difference_pct: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for CompetitorPrice {
    const MODEL: &'static str = "CompetitorPrice";
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrocart_core::{RawRecord, SchemaError};
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn order_summary_fills_defaults() {
        let summary =
            OrderSummary::from_raw(raw(json!({ "date": "2024-05-01", "total_orders": 120 })))
                .expect("valid record");

        assert_eq!(summary.currency, "USD");
        assert_eq!(summary.total_orders, 120);
        assert_eq!(summary.cancelled_orders, 0);
        assert!(summary.marketplace.is_none());
    }

    #[test]
    fn unknown_fields_are_kept_in_extra() {
        let sales = SalesHistorical::from_raw(raw(json!({
            "date": "2024-05-01",
            "sku": "EC-1004",
            "units_sold": 12,
            "brand": "SprintX",
            "rating": 4.6,
        })))
        .expect("valid record");

        assert_eq!(sales.extra.get("brand"), Some(&json!("SprintX")));
        let value = serde_json::to_value(&sales).expect("serializable");
        assert_eq!(value["rating"], json!(4.6));
    }

    #[test]
    fn missing_required_stage_is_rejected() {
        let error = FunnelConversion::from_raw(raw(json!({ "date": "2024-05-01", "users": 900 })))
            .expect_err("stage is required");

        assert!(matches!(error, SchemaError::SchemaMismatch { model: "FunnelConversion", .. }));
    }

    #[test]
    fn mistyped_date_is_rejected() {
        let error = CompetitorPrice::from_raw(raw(json!({ "date": "yesterday", "sku": "EC-1001" })))
            .expect_err("date must be ISO");

        assert!(error.to_string().contains("CompetitorPrice"));
    }

    #[test]
    fn inventory_status_and_stock_defaults() {
        let level =
            InventoryLevel::from_raw(raw(json!({ "sku": "EC-1007" }))).expect("valid record");
        let price =
            CompetitorPrice::from_raw(raw(json!({ "date": "2024-05-01" }))).expect("valid record");

        assert_eq!(level.status, "in_stock");
        assert!(price.in_stock);
    }
}
