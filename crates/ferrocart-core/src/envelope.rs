//! Uniform response envelope returned by every command.
//!
//! An envelope is assembled once (by the runner, then optionally annotated by
//! the surface that returns it) and read many times. All conversions are pure
//! derivations over the stored records; none of them touch a fetcher.
//!
//! ## Example
//!
//! ```rust,ignore
//! let envelope = runner.run("/orders/summary", "demo", Parameters::new()).await?;
//!
//! let table = envelope.to_table()?;
//! println!("{} columns, {} rows", table.columns.len(), table.rows.len());
//! println!("{}", envelope.to_json(true)?);
//! ```

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::ser::{Error as SerError, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{CoreError, Record, UtcDateTime};

/// Result set plus provenance metadata.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    results: Vec<Record>,
    provider: String,
    model: String,
    command: String,
    timestamp: UtcDateTime,
    warnings: Vec<String>,
    extra: BTreeMap<String, Value>,
}

impl ResponseEnvelope {
    /// Stamps the current time; warnings and extra start empty.
    pub fn new(
        results: Vec<Record>,
        provider: impl Into<String>,
        model: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            results,
            provider: provider.into(),
            model: model.into(),
            command: command.into(),
            timestamp: UtcDateTime::now(),
            warnings: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: UtcDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timestamp(&self) -> UtcDateTime {
        self.timestamp
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Dictionary form: one JSON value per record.
    pub fn to_dict(&self) -> Result<Vec<Value>, CoreError> {
        self.results
            .iter()
            .map(|record| record.to_value().map_err(CoreError::from))
            .collect()
    }

    /// Row-oriented table. Columns are the union of record keys in first-seen
    /// order; a record missing a column gets `null` in that cell.
    pub fn to_table(&self) -> Result<RecordTable, CoreError> {
        let objects = self
            .to_dict()?
            .into_iter()
            .map(|value| match value {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert(String::from("value"), other);
                    map
                }
            })
            .collect::<Vec<_>>();

        let mut columns: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .into_iter()
            .map(|mut object| {
                columns
                    .iter()
                    .map(|column| object.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(RecordTable { columns, rows })
    }

    /// Full envelope (metadata and results) as JSON text.
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let payload = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(payload)
    }

    /// Results as CSV text with a header row. Empty results yield an empty string.
    pub fn to_csv(&self) -> Result<String, CoreError> {
        Ok(self.to_table()?.to_csv())
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let results = self.to_dict().map_err(S::Error::custom)?;

        let mut state = serializer.serialize_struct("ResponseEnvelope", 7)?;
        state.serialize_field("results", &results)?;
        state.serialize_field("provider", &self.provider)?;
        state.serialize_field("model", &self.model)?;
        state.serialize_field("command", &self.command)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("extra", &self.extra)?;
        state.end()
    }
}

impl Display for ResponseEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ResponseEnvelope(provider='{}', model='{}', records={}, command='{}')",
            self.provider,
            self.model,
            self.results.len(),
            self.command
        )
    }
}

/// Row-oriented projection of an envelope's results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RecordTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index by name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn to_csv(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        let header = self
            .columns
            .iter()
            .map(|column| csv_field(column))
            .collect::<Vec<_>>();
        output.push_str(&header.join(","));
        output.push('\n');

        for row in &self.rows {
            let values = row.iter().map(csv_cell).collect::<Vec<_>>();
            output.push_str(&values.join(","));
            output.push('\n');
        }

        output
    }
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => csv_field(text),
        nested => csv_field(&nested.to_string()),
    }
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{downcast, transform_all, RawRecord, Schema};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct StockLine {
        sku: String,
        #[serde(default)]
        quantity: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    impl Schema for StockLine {
        const MODEL: &'static str = "StockLine";
    }

    fn records(values: Vec<Value>) -> Vec<Record> {
        let raw = values
            .into_iter()
            .map(|value| match value {
                Value::Object(map) => map,
                other => panic!("expected object, got {other}"),
            })
            .collect::<Vec<RawRecord>>();
        transform_all::<StockLine>(raw).expect("valid records")
    }

    fn sample() -> ResponseEnvelope {
        ResponseEnvelope::new(
            records(vec![
                json!({ "sku": "EC-1001", "quantity": 4 }),
                json!({ "sku": "EC-1002", "quantity": 0, "note": "backorder, ships \"soon\"" }),
            ]),
            "demo",
            "StockLine",
            "/inventory/levels/current",
        )
    }

    #[test]
    fn new_envelope_starts_without_warnings_or_extra() {
        let envelope = sample();

        assert_eq!(envelope.provider(), "demo");
        assert_eq!(envelope.model(), "StockLine");
        assert_eq!(envelope.command(), "/inventory/levels/current");
        assert_eq!(envelope.len(), 2);
        assert!(envelope.warnings().is_empty());
        assert!(envelope.extra().is_empty());
    }

    #[test]
    fn table_unions_columns_in_first_seen_order() {
        let table = sample().to_table().expect("table");

        assert_eq!(table.columns, vec!["sku", "quantity", "note"]);
        assert_eq!(table.rows[0], vec![json!("EC-1001"), json!(4), Value::Null]);
        assert_eq!(table.column("note"), Some(2));
    }

    #[test]
    fn csv_quotes_fields_with_separators() {
        let csv = sample().to_csv().expect("csv");

        assert_eq!(
            csv,
            "sku,quantity,note\nEC-1001,4,\nEC-1002,0,\"backorder, ships \"\"soon\"\"\"\n"
        );
    }

    #[test]
    fn empty_results_convert_to_empty_outputs() {
        let envelope = ResponseEnvelope::new(Vec::new(), "demo", "", "/system/status");

        assert!(envelope.to_dict().expect("dict").is_empty());
        assert!(envelope.to_table().expect("table").is_empty());
        assert_eq!(envelope.to_csv().expect("csv"), "");
    }

    #[test]
    fn json_carries_metadata_and_results() {
        let timestamp = UtcDateTime::parse("2024-03-01T12:00:00Z").expect("valid timestamp");
        let envelope = sample()
            .with_timestamp(timestamp)
            .with_warning("2 records had no note")
            .with_extra("request_id", "req-123456");

        let value: Value =
            serde_json::from_str(&envelope.to_json(false).expect("json")).expect("valid json");

        assert_eq!(value["provider"], "demo");
        assert_eq!(value["timestamp"], "2024-03-01T12:00:00Z");
        assert_eq!(value["results"][1]["sku"], "EC-1002");
        assert_eq!(value["warnings"], json!(["2 records had no note"]));
        assert_eq!(value["extra"]["request_id"], "req-123456");
    }

    #[test]
    fn conversions_leave_records_untouched() {
        let envelope = sample();
        let _ = envelope.to_table().expect("table");
        let _ = envelope.to_json(true).expect("json");

        let line = downcast::<StockLine>(&envelope.results()[0]).expect("StockLine record");
        assert_eq!(line.quantity, 4);
    }

    #[test]
    fn display_summarizes_envelope() {
        assert_eq!(
            sample().to_string(),
            "ResponseEnvelope(provider='demo', model='StockLine', records=2, \
             command='/inventory/levels/current')"
        );
    }
}
