use crate::errors::NodeError;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Reads a JSON document from a file, or from stdin when `source` is `-`.
pub fn read_json_source(source: &str) -> Result<Value, NodeError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(NodeError::invalid_params("Input path must not be empty"));
    }
    let raw = if trimmed == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(Path::new(trimmed)).map_err(|err| {
            NodeError::invalid_params(format!("Failed to read {}: {}", trimmed, err))
        })?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// A single object is treated as a one-element batch.
pub fn into_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::into_items;
    use serde_json::json;

    #[test]
    fn wraps_single_object() {
        assert_eq!(into_items(json!({"a": 1})), vec![json!({"a": 1})]);
        assert_eq!(into_items(json!([1, 2])).len(), 2);
        assert!(into_items(json!(null)).is_empty());
    }
}
