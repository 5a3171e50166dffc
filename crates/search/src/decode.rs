use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, SearchError};

/// Records that decoded cleanly plus a count of the ones that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub rejected: usize,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decodes an already-parsed collection. Only a non-array top level fails; a
/// malformed element is skipped and counted.
pub fn decode_collection<T: DeserializeOwned>(value: Value) -> Result<Decoded<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SearchError::NotASequence {
                found: json_kind(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    let mut rejected = 0usize;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                rejected += 1;
                log::warn!("Skipping malformed record at index {index}: {err}");
            }
        }
    }
    Ok(Decoded { records, rejected })
}

pub fn decode_collection_str<T: DeserializeOwned>(raw: &str) -> Result<Decoded<T>> {
    let value: Value = serde_json::from_str(raw)?;
    decode_collection(value)
}
