use crate::errors::NodeError;
use crate::services::routing_table::ParameterRule;
use serde_json::{Map, Value};

/// Per-record parameter values addressed by name.
///
/// A missing name is "undefined" and differs from an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterValues {
    values: Map<String, Value>,
}

impl ParameterValues {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn from_value(value: Value) -> Result<Self, NodeError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(values) => Ok(Self { values }),
            _ => Err(NodeError::invalid_params("Parameters must be an object")),
        }
    }

    /// Caller value first, then the default of any rule declaring `name`.
    pub fn lookup<'a>(&'a self, name: &str, rules: &'a [ParameterRule]) -> Option<&'a Value> {
        self.values.get(name).or_else(|| {
            rules
                .iter()
                .find(|rule| rule.name == name)
                .and_then(|rule| rule.default_value.as_ref())
        })
    }
}

/// Defined, non-null and not an empty string.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

/// Like [`is_present`], also rejecting `{}` and `[]`.
pub fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        other => is_present(other),
    }
}

/// Parses JSON-kind string values; malformed input is kept as plain text.
pub fn decode_json_value(value: &Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::routing_table::Destination;
    use serde_json::json;

    #[test]
    fn lookup_prefers_caller_value_over_default() {
        let rules = vec![ParameterRule::new("limit", Destination::Query).with_default(json!(10))];
        let values = ParameterValues::default();
        assert_eq!(values.lookup("limit", &rules), Some(&json!(10)));
        let values = ParameterValues::from_value(json!({"limit": 3})).expect("values");
        assert_eq!(values.lookup("limit", &rules), Some(&json!(3)));
        assert_eq!(values.lookup("offset", &rules), None);
    }

    #[test]
    fn presence_rules() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!("")));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!(false)));
        assert!(!is_meaningful(&json!({})));
        assert!(!is_meaningful(&json!([])));
        assert!(is_meaningful(&json!({"a": 1})));
    }

    #[test]
    fn malformed_json_stays_a_string() {
        assert_eq!(decode_json_value(&json!("{bad json")), json!("{bad json"));
        assert_eq!(decode_json_value(&json!("{\"a\": 1}")), json!({"a": 1}));
        assert_eq!(decode_json_value(&json!(5)), json!(5));
    }
}
