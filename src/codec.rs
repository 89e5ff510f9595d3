use serde_json::{Map, Value};

use crate::{ListAggBuffer, ListAggElement, ListAggError};

/// Field names of the partial-result record. This two-field row schema is the
/// only data crossing a shuffle boundary and must stay stable between stages.
pub const VALUE_FIELD: &str = "value";
pub const ORDER_FIELD: &str = "order";

/// Encodes a buffer snapshot into the transportable partial shape: an array
/// of `{ "value": <string>, "order": <integer> }` records, in element order.
pub fn encode_partial(elements: &[ListAggElement]) -> Value {
    let records = elements
        .iter()
        .map(|e| {
            let mut record = Map::with_capacity(2);
            record.insert(VALUE_FIELD.to_string(), Value::String(e.value.clone()));
            record.insert(ORDER_FIELD.to_string(), Value::Number(e.order.into()));
            Value::Object(record)
        })
        .collect();
    Value::Array(records)
}

/// Decodes a partial result back into elements, rejecting anything that does
/// not conform to the codec shape (non-array input, non-record items, missing
/// or mistyped fields, extra fields).
pub fn decode_partial(partial: &Value) -> Result<Vec<ListAggElement>, ListAggError> {
    if !partial.is_array() {
        return ListAggError::Decode(format!(
            "expected an array of (value, order) records, got {partial}"
        ))
        .err();
    }
    serde_json::from_value(partial.clone()).map_err(|e| ListAggError::Decode(e.to_string()))
}

/// Convenience used by tests and single-process hosts: encode straight from a
/// buffer without an intermediate snapshot binding.
pub fn encode_buffer(buffer: &ListAggBuffer) -> Value {
    encode_partial(buffer.elements())
}
