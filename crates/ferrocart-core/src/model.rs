//! Standard model contract.
//!
//! Every model is a named record type with declared fields and serde
//! defaults. Raw provider data enters through [`Schema::from_raw`], which
//! rejects records that cannot populate the required fields.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{RawRecord, SchemaError};

/// Object-safe view of a typed record, as stored in a response envelope.
pub trait StandardModel: Debug + Send + Sync + 'static {
    /// Canonical model name, e.g. `OrderSummary`.
    fn model_name(&self) -> &'static str;

    fn to_value(&self) -> Result<Value, serde_json::Error>;

    fn as_any(&self) -> &dyn Any;
}

/// Shared, immutable typed record.
pub type Record = Arc<dyn StandardModel>;

/// A concrete schema for one model.
pub trait Schema: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    const MODEL: &'static str;

    /// Validating constructor from one raw record.
    fn from_raw(raw: RawRecord) -> Result<Self, SchemaError> {
        Self::from_raw_at(0, raw)
    }

    /// Same as [`from_raw`](Schema::from_raw), reporting `index` on mismatch.
    fn from_raw_at(index: usize, raw: RawRecord) -> Result<Self, SchemaError> {
        serde_json::from_value(Value::Object(raw))
            .map_err(|error| SchemaError::mismatch(Self::MODEL, index, error.to_string()))
    }

    fn into_record(self) -> Record
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

impl<T: Schema> StandardModel for T {
    fn model_name(&self) -> &'static str {
        T::MODEL
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Converts a raw batch into records of schema `T`, failing on the first
/// record that does not match.
pub fn transform_all<T: Schema>(raw: Vec<RawRecord>) -> Result<Vec<Record>, SchemaError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| T::from_raw_at(index, record).map(T::into_record))
        .collect()
}

/// Typed access to a record produced by schema `T`.
pub fn downcast<T: Schema>(record: &Record) -> Option<&T> {
    record.as_any().downcast_ref::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        id: String,
        #[serde(default)]
        priority: u8,
        #[serde(default = "default_queue")]
        queue: String,
    }

    fn default_queue() -> String {
        String::from("general")
    }

    impl Schema for Ticket {
        const MODEL: &'static str = "Ticket";
    }

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn fills_declared_defaults() {
        let ticket = Ticket::from_raw(raw(json!({ "id": "T-1" }))).expect("valid record");

        assert_eq!(ticket.priority, 0);
        assert_eq!(ticket.queue, "general");
    }

    #[test]
    fn missing_required_field_is_schema_mismatch() {
        let error = transform_all::<Ticket>(vec![
            raw(json!({ "id": "T-1" })),
            raw(json!({ "priority": 2 })),
        ])
        .expect_err("second record lacks id");

        match error {
            SchemaError::SchemaMismatch { model, index, detail } => {
                assert_eq!(model, "Ticket");
                assert_eq!(index, 1);
                assert!(detail.contains("id"), "detail should name the field: {detail}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn records_downcast_to_their_schema() {
        let records = transform_all::<Ticket>(vec![raw(json!({ "id": "T-9", "priority": 3 }))])
            .expect("valid batch");

        let ticket = downcast::<Ticket>(&records[0]).expect("record is a Ticket");
        assert_eq!(ticket.priority, 3);
        assert_eq!(records[0].model_name(), "Ticket");
        assert_eq!(
            records[0].to_value().expect("serializable"),
            json!({ "id": "T-9", "priority": 3, "queue": "general" })
        );
    }
}
