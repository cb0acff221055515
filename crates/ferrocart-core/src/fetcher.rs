//! Query parameters and the two-stage fetcher contract.
//!
//! A provider answers each model it supports with one [`Fetcher`]:
//!
//! | Stage | Method | I/O | Output |
//! |-------|--------|-----|--------|
//! | 1 | [`fetch`](Fetcher::fetch) | allowed (async) | raw JSON objects |
//! | 2 | [`transform`](Fetcher::transform) | never | typed [`Record`]s |
//!
//! # Example Implementation
//!
//! ```rust,ignore
//! use ferrocart_core::{transform_all, FetchError, FetchFuture, Fetcher, QueryParams, RawRecord, Record};
//!
//! struct OrdersFetcher;
//!
//! impl Fetcher for OrdersFetcher {
//!     fn fetch<'a>(&'a self, params: &'a QueryParams) -> FetchFuture<'a> {
//!         Box::pin(async move { Ok(call_orders_api(params).await?) })
//!     }
//!
//!     fn transform(&self, raw: Vec<RawRecord>, _params: &QueryParams) -> Result<Vec<Record>, FetchError> {
//!         Ok(transform_all::<OrderSummary>(raw)?)
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{FetchError, Record};

/// One untyped upstream record.
pub type RawRecord = Map<String, Value>;

/// Caller-supplied parameter mapping, before the provider is attached.
pub type Parameters = BTreeMap<String, Value>;

/// Boxed future returned by [`Fetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<RawRecord>, FetchError>> + Send + 'a>>;

/// Parameters handed to a fetcher or handler. Always carries the provider name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    provider: String,
    #[serde(flatten)]
    values: Parameters,
}

impl QueryParams {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            values: Parameters::new(),
        }
    }

    /// Builds params from a caller map. An explicit `provider` argument wins
    /// over a `provider` key inside `values`.
    pub fn from_values(provider: impl Into<String>, mut values: Parameters) -> Self {
        values.remove("provider");
        Self {
            provider: provider.into(),
            values,
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "provider" {
            if let Value::String(provider) = value {
                self.provider = provider;
            }
            return self;
        }
        self.values.insert(key, value);
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == "provider" {
            return None;
        }
        self.values.get(key)
    }

    /// Non-empty string value for `key`. Empty strings mean "not set".
    pub fn get_str(&self, key: &str) -> Option<&str> {
        if key == "provider" {
            return Some(self.provider.as_str());
        }
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Unsigned integer value for `key`, accepting JSON numbers and numeric
    /// strings (CLI and query-string values arrive as text).
    pub fn get_u64(&self, key: &str) -> Result<Option<u64>, FetchError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number.as_u64().map(Some).ok_or_else(|| {
                FetchError::invalid_params(format!(
                    "parameter '{key}' must be a non-negative integer, got {number}"
                ))
            }),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
            Some(Value::String(text)) => text.trim().parse::<u64>().map(Some).map_err(|_| {
                FetchError::invalid_params(format!(
                    "parameter '{key}' must be a non-negative integer, got '{text}'"
                ))
            }),
            Some(other) => Err(FetchError::invalid_params(format!(
                "parameter '{key}' must be a non-negative integer, got {other}"
            ))),
        }
    }

    pub fn values(&self) -> &Parameters {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Provider-owned fetch/transform pair for exactly one model.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single fetcher serves concurrent
/// requests and the runner holds no lock while `fetch` is in flight.
pub trait Fetcher: Send + Sync {
    /// Retrieves raw records from the upstream source.
    ///
    /// # Errors
    ///
    /// Returns a provider-defined [`FetchError`] on upstream failure. No retry
    /// contract is imposed.
    fn fetch<'a>(&'a self, params: &'a QueryParams) -> FetchFuture<'a>;

    /// Converts raw records into typed records. Must not perform I/O.
    ///
    /// # Errors
    ///
    /// Returns a schema mismatch when the raw shape cannot populate the model.
    fn transform(&self, raw: Vec<RawRecord>, params: &QueryParams)
        -> Result<Vec<Record>, FetchError>;
}
