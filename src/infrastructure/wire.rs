// Mapping from the external service's JSON payloads to domain models
use crate::domain::sample::{RawRecord, RawSeriesSet, SeriesKind};
use serde_json::{Map, Value};

const TIMESTAMP_FIELD: &str = "timestamp_cleaned";

/// Convert an `/all-data/{username}` body into raw series. Missing series are
/// simply absent; unknown series are ignored.
pub fn series_from_payload(payload: &Map<String, Value>) -> RawSeriesSet {
    let mut set = RawSeriesSet::new();

    for kind in SeriesKind::ALL {
        match payload.get(kind.series_name()) {
            Some(Value::Array(items)) => {
                let records = items.iter().map(|item| record_from_item(item, kind)).collect();
                set.insert(kind, records);
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                tracing::warn!(
                    "Ignoring series {}: expected an array, got {}",
                    kind.series_name(),
                    type_name(other)
                );
            }
        }
    }

    set
}

fn record_from_item(item: &Value, kind: SeriesKind) -> RawRecord {
    let timestamp = item
        .get(TIMESTAMP_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string);
    let value = item.get(kind.metric_field()).and_then(Value::as_f64);
    RawRecord::new(timestamp, value)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
