//! Deterministic mock fetchers, one per ecommerce domain.
//!
//! Each fetch seeds its own `fastrand::Rng` from the dataset name and the
//! requested window, so identical parameters produce identical records on the
//! same calendar day. Dates cover a trailing window that ends yesterday.
//!
//! | Dataset | Rows (default window) | Schema |
//! |---------|-----------------------|--------|
//! | products | 30 days x 10 products | [`SalesHistorical`] |
//! | orders | 30 days | [`OrderSummary`] |
//! | customers | 6 segments | [`CustomerSegment`] |
//! | inventory | 10 products x 3 warehouses | [`InventoryLevel`] |
//! | marketing | 30 days x 4 paid channels | [`CampaignPerformance`] |
//! | analytics | 30 days x 5 funnel stages | [`FunnelConversion`] |
//! | pricing | 30 days x 5 products x 3 competitors | [`CompetitorPrice`] |

use fastrand::Rng;
use ferrocart_core::{
    transform_all, CalendarDate, FetchError, FetchFuture, Fetcher, QueryParams, RawRecord, Record,
    UtcDateTime,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::models::{
    CampaignPerformance, CompetitorPrice, CustomerSegment, FunnelConversion, InventoryLevel,
    OrderSummary, SalesHistorical,
};

pub const DEFAULT_WINDOW_DAYS: u64 = 30;
pub const MAX_WINDOW_DAYS: u64 = 366;

/// Parameters that narrow results to records whose field of the same name matches.
pub const FILTER_KEYS: [&str; 7] = [
    "sku",
    "category",
    "channel",
    "warehouse",
    "competitor",
    "segment",
    "marketplace",
];

pub const MARKETPLACES: [&str; 4] = ["amazon", "shopify", "walmart", "ebay"];

pub const CHANNELS: [&str; 7] = [
    "google_ads",
    "meta_ads",
    "tiktok_ads",
    "email",
    "organic",
    "direct",
    "referral",
];

const PAID_CHANNELS: usize = 4;
const PRICED_PRODUCTS: usize = 5;
const WAREHOUSES: [&str; 3] = ["US-East", "US-West", "EU-Central"];
const COMPETITORS: [&str; 3] = ["CompetitorA", "CompetitorB", "CompetitorC"];
const FUNNEL_STAGES: [&str; 5] = ["visit", "product_view", "add_to_cart", "checkout", "purchase"];
const SEGMENTS: [&str; 6] = [
    "Champions",
    "Loyal",
    "Potential Loyalists",
    "New Customers",
    "At Risk",
    "Lost",
];
const SEGMENT_POPULATION: f64 = 10_000.0;
const REORDER_POINT: u64 = 20;

/// Catalog entry used by every product-level dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoProduct {
    pub sku: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub brand: &'static str,
    pub price: f64,
}

pub const PRODUCTS: [DemoProduct; 10] = [
    DemoProduct {
        sku: "EC-1001",
        name: "Wireless Bluetooth Headphones",
        category: "Electronics",
        brand: "SoundMax",
        price: 79.99,
    },
    DemoProduct {
        sku: "EC-1002",
        name: "Organic Cotton T-Shirt",
        category: "Apparel",
        brand: "EcoWear",
        price: 29.99,
    },
    DemoProduct {
        sku: "EC-1003",
        name: "Stainless Steel Water Bottle",
        category: "Home & Kitchen",
        brand: "HydroFlow",
        price: 24.99,
    },
    DemoProduct {
        sku: "EC-1004",
        name: "Running Shoes Pro",
        category: "Sports",
        brand: "SprintX",
        price: 129.99,
    },
    DemoProduct {
        sku: "EC-1005",
        name: "Vitamin C Serum",
        category: "Beauty",
        brand: "GlowUp",
        price: 34.99,
    },
    DemoProduct {
        sku: "EC-1006",
        name: "Mechanical Keyboard RGB",
        category: "Electronics",
        brand: "TypeMaster",
        price: 89.99,
    },
    DemoProduct {
        sku: "EC-1007",
        name: "Yoga Mat Premium",
        category: "Sports",
        brand: "ZenFit",
        price: 49.99,
    },
    DemoProduct {
        sku: "EC-1008",
        name: "Coffee Grinder Electric",
        category: "Home & Kitchen",
        brand: "BrewPerfect",
        price: 59.99,
    },
    DemoProduct {
        sku: "EC-1009",
        name: "Kids Building Blocks Set",
        category: "Toys",
        brand: "BrainBuild",
        price: 39.99,
    },
    DemoProduct {
        sku: "EC-1010",
        name: "Phone Case Ultra Slim",
        category: "Electronics",
        brand: "ShieldPro",
        price: 19.99,
    },
];

/// Demo data domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Products,
    Orders,
    Customers,
    Inventory,
    Marketing,
    Analytics,
    Pricing,
}

impl Dataset {
    pub const ALL: [Dataset; 7] = [
        Dataset::Products,
        Dataset::Orders,
        Dataset::Customers,
        Dataset::Inventory,
        Dataset::Marketing,
        Dataset::Analytics,
        Dataset::Pricing,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Customers => "customers",
            Self::Inventory => "inventory",
            Self::Marketing => "marketing",
            Self::Analytics => "analytics",
            Self::Pricing => "pricing",
        }
    }

    /// Model names this dataset answers. All of them yield the dataset's schema.
    pub const fn models(self) -> &'static [&'static str] {
        match self {
            Self::Products => &[
                "ProductInfo",
                "SalesHistorical",
                "ProductRanking",
                "ProductReview",
            ],
            Self::Orders => &["OrderSummary", "OrderDetail", "FulfillmentStatus", "ReturnsSummary"],
            Self::Customers => &[
                "CustomerCohort",
                "CustomerLifetimeValue",
                "CustomerSegment",
                "CustomerAcquisition",
            ],
            Self::Inventory => &["InventoryLevel", "DemandForecast", "StockMovement"],
            Self::Marketing => &["CampaignPerformance", "ChannelAttribution", "KeywordPerformance"],
            Self::Analytics => &["FunnelConversion", "TrafficSource", "CategoryPerformance"],
            Self::Pricing => &["PriceHistorical", "CompetitorPrice", "PriceElasticity"],
        }
    }

    fn is_dated(self) -> bool {
        !matches!(self, Self::Customers | Self::Inventory)
    }
}

/// Fetcher serving one [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct DemoFetcher {
    dataset: Dataset,
}

impl DemoFetcher {
    pub const fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub const fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Generates raw records synchronously; `fetch` wraps this.
    pub fn generate(&self, params: &QueryParams) -> Result<Vec<RawRecord>, FetchError> {
        let days = window_days(params)?;
        let limit = params.get_u64("limit")?;
        let dates = if self.dataset.is_dated() {
            CalendarDate::trailing_window(days as u32)
        } else {
            Vec::new()
        };
        let mut rng = Rng::with_seed(seed_for(self.dataset, days));

        let rows = match self.dataset {
            Dataset::Products => products(&mut rng, &dates),
            Dataset::Orders => orders(&mut rng, &dates),
            Dataset::Customers => customers(&mut rng),
            Dataset::Inventory => inventory(&mut rng),
            Dataset::Marketing => marketing(&mut rng, &dates),
            Dataset::Analytics => analytics(&mut rng, &dates),
            Dataset::Pricing => pricing(&mut rng, &dates),
        };

        let mut records = rows
            .into_iter()
            .map(into_raw)
            .filter(|record| matches_filters(record, params))
            .collect::<Vec<_>>();
        if let Some(limit) = limit {
            records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        debug!(
            dataset = self.dataset.as_str(),
            days,
            records = records.len(),
            "demo records generated"
        );
        Ok(records)
    }
}

impl Fetcher for DemoFetcher {
    fn fetch<'a>(&'a self, params: &'a QueryParams) -> FetchFuture<'a> {
        Box::pin(async move { self.generate(params) })
    }

    fn transform(
        &self,
        raw: Vec<RawRecord>,
        _params: &QueryParams,
    ) -> Result<Vec<Record>, FetchError> {
        let records = match self.dataset {
            Dataset::Products => transform_all::<SalesHistorical>(raw),
            Dataset::Orders => transform_all::<OrderSummary>(raw),
            Dataset::Customers => transform_all::<CustomerSegment>(raw),
            Dataset::Inventory => transform_all::<InventoryLevel>(raw),
            Dataset::Marketing => transform_all::<CampaignPerformance>(raw),
            Dataset::Analytics => transform_all::<FunnelConversion>(raw),
            Dataset::Pricing => transform_all::<CompetitorPrice>(raw),
        };
        Ok(records?)
    }
}

fn window_days(params: &QueryParams) -> Result<u64, FetchError> {
    let days = params.get_u64("days")?.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(FetchError::invalid_params(format!(
            "parameter 'days' must be between 1 and {MAX_WINDOW_DAYS}, got {days}"
        )));
    }
    Ok(days)
}

fn seed_for(dataset: Dataset, days: u64) -> u64 {
    dataset
        .as_str()
        .bytes()
        .fold(42_u64, |acc, byte| acc.wrapping_mul(31).wrapping_add(u64::from(byte)))
        ^ days
}

fn matches_filters(record: &RawRecord, params: &QueryParams) -> bool {
    FILTER_KEYS.iter().all(|key| {
        let Some(wanted) = params.get_str(key) else {
            return true;
        };
        match record.get(*key).and_then(Value::as_str) {
            Some(actual) => actual.eq_ignore_ascii_case(wanted),
            None => !record.contains_key(*key),
        }
    })
}

fn into_raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = RawRecord::new();
            map.insert(String::from("value"), other);
            map
        }
    }
}

fn uniform(rng: &mut Rng, low: f64, high: f64) -> f64 {
    low + (high - low) * rng.f64()
}

fn pick<'a>(rng: &mut Rng, items: &[&'a str]) -> &'a str {
    items[rng.usize(..items.len())]
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round2(numerator / denominator)
    } else {
        0.0
    }
}

fn products(rng: &mut Rng, dates: &[CalendarDate]) -> Vec<Value> {
    let mut rows = Vec::with_capacity(dates.len() * PRODUCTS.len());
    for date in dates {
        for product in &PRODUCTS {
            let units = rng.u64(5..=200);
            rows.push(json!({
                "date": date,
                "sku": product.sku,
                "name": product.name,
                "category": product.category,
                "brand": product.brand,
                "price": product.price,
                "units_sold": units,
                "revenue": round2(units as f64 * product.price),
                "marketplace": pick(rng, &MARKETPLACES),
                "rating": round1(uniform(rng, 3.5, 5.0)),
                "review_count": rng.u64(10..=500),
            }));
        }
    }
    rows
}

fn orders(rng: &mut Rng, dates: &[CalendarDate]) -> Vec<Value> {
    dates
        .iter()
        .map(|date| {
            let orders = rng.u64(50..=500);
            let revenue = round2(orders as f64 * uniform(rng, 35.0, 120.0));
            json!({
                "date": date,
                "total_orders": orders,
                "total_revenue": revenue,
                "average_order_value": ratio(revenue, orders as f64),
                "total_units": (orders as f64 * uniform(rng, 1.5, 3.0)) as u64,
                "cancelled_orders": rng.u64(0..=orders * 5 / 100),
                "returned_orders": rng.u64(0..=orders * 8 / 100),
                "marketplace": pick(rng, &MARKETPLACES),
            })
        })
        .collect()
}

fn customers(rng: &mut Rng) -> Vec<Value> {
    SEGMENTS
        .iter()
        .map(|segment| {
            let count = rng.u64(500..=3000);
            json!({
                "segment": segment,
                "customer_count": count,
                "percentage": round1(count as f64 / SEGMENT_POPULATION * 100.0),
                "avg_recency_days": round1(uniform(rng, 1.0, 180.0)),
                "avg_frequency": round1(uniform(rng, 1.0, 20.0)),
                "avg_monetary": round2(uniform(rng, 20.0, 500.0)),
            })
        })
        .collect()
}

fn inventory(rng: &mut Rng) -> Vec<Value> {
    let as_of = UtcDateTime::now();
    let mut rows = Vec::with_capacity(PRODUCTS.len() * WAREHOUSES.len());
    for product in &PRODUCTS {
        for warehouse in WAREHOUSES {
            let quantity = rng.u64(0..=500);
            let status = match quantity {
                0 => "out_of_stock",
                q if q < REORDER_POINT => "low_stock",
                _ => "in_stock",
            };
            rows.push(json!({
                "sku": product.sku,
                "name": product.name,
                "category": product.category,
                "quantity": quantity,
                "warehouse": warehouse,
                "status": status,
                "reorder_point": REORDER_POINT,
                "days_of_supply": round1(quantity as f64 / uniform(rng, 2.0, 15.0)),
                "last_updated": as_of,
            }));
        }
    }
    rows
}

fn marketing(rng: &mut Rng, dates: &[CalendarDate]) -> Vec<Value> {
    let mut rows = Vec::with_capacity(dates.len() * PAID_CHANNELS);
    for date in dates {
        for channel in &CHANNELS[..PAID_CHANNELS] {
            let impressions = rng.u64(5_000..=100_000);
            let clicks = (impressions as f64 * uniform(rng, 0.01, 0.08)) as u64;
            let spend = round2(clicks as f64 * uniform(rng, 0.5, 3.0));
            let conversions = (clicks as f64 * uniform(rng, 0.02, 0.1)) as u64;
            let revenue = round2(conversions as f64 * uniform(rng, 40.0, 150.0));
            rows.push(json!({
                "date": date,
                "campaign_id": format!("cmp-{channel}"),
                "campaign_name": format!("{channel} always-on"),
                "channel": channel,
                "impressions": impressions,
                "clicks": clicks,
                "ctr": round2(clicks as f64 / impressions as f64 * 100.0),
                "spend": spend,
                "conversions": conversions,
                "revenue": revenue,
                "roas": ratio(revenue, spend),
                "cpc": ratio(spend, clicks as f64),
                "cpa": ratio(spend, conversions as f64),
            }));
        }
    }
    rows
}

fn analytics(rng: &mut Rng, dates: &[CalendarDate]) -> Vec<Value> {
    let mut rows = Vec::with_capacity(dates.len() * FUNNEL_STAGES.len());
    for date in dates {
        let mut users = rng.u64(5_000..=20_000);
        for (index, stage) in FUNNEL_STAGES.iter().enumerate() {
            let (conversion_rate, drop_off_rate) = if index == 0 {
                (100.0, 0.0)
            } else {
                users = (users as f64 * uniform(rng, 0.3, 0.7)) as u64;
                (round1(uniform(rng, 20.0, 70.0)), round1(uniform(rng, 30.0, 80.0)))
            };
            rows.push(json!({
                "date": date,
                "stage": stage,
                "users": users,
                "conversion_rate": conversion_rate,
                "drop_off_rate": drop_off_rate,
            }));
        }
    }
    rows
}

fn pricing(rng: &mut Rng, dates: &[CalendarDate]) -> Vec<Value> {
    let mut rows = Vec::with_capacity(dates.len() * PRICED_PRODUCTS * COMPETITORS.len());
    for date in dates {
        for product in &PRODUCTS[..PRICED_PRODUCTS] {
            for competitor in COMPETITORS {
                let price = round2(product.price * uniform(rng, 0.8, 1.2));
                rows.push(json!({
                    "date": date,
                    "sku": product.sku,
                    "product_name": product.name,
                    "competitor": competitor,
                    "price": price,
                    "marketplace": pick(rng, &MARKETPLACES),
                    "in_stock": rng.f64() > 0.1,
                    "price_difference": round2(price - product.price),
                    "price_difference_pct": round1((price - product.price) / product.price * 100.0),
                }));
            }
        }
    }
    rows
}
