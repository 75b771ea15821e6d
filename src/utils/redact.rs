use crate::utils::text::truncate_utf8_prefix;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

const DEFAULT_REDACTION: &str = "[REDACTED]";
const INLINE_REDACTION: &str = "***REDACTED***";

static SENSITIVE_HEADER_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "authorization",
        "proxy-authorization",
        "x-api-key",
        "x-auth-token",
        "x-access-token",
        "cookie",
    ]
    .into_iter()
    .collect()
});

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~+/=-]{10,})").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b")
                .expect("inline redaction regex"),
            INLINE_REDACTION,
        ),
        (
            Regex::new(r#"\b(token|api[_-]?key|secret|access[_-]?token)\b\s*([:=])\s*([^\s"'`]+)"#)
                .expect("inline redaction regex"),
            "$1$2***REDACTED***",
        ),
    ]
});

pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADER_KEYS.contains(name.trim().to_lowercase().as_str())
}

/// Masks credentials that leak into free text and caps its length.
pub fn redact_text(value: &str, max_bytes: usize) -> String {
    let mut out = value.to_string();
    for (re, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *replacement).into_owned();
        }
    }
    if out.len() <= max_bytes {
        return out;
    }
    format!("{}...", truncate_utf8_prefix(&out, max_bytes))
}

/// Redacts a serialized request: header values by name, strings by pattern.
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(redact_text(text, usize::MAX)),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map {
                if key == "headers" {
                    if let Some(headers) = entry.as_object() {
                        let masked = headers
                            .iter()
                            .map(|(name, header)| {
                                if is_sensitive_header(name) {
                                    (name.clone(), Value::String(DEFAULT_REDACTION.to_string()))
                                } else {
                                    (name.clone(), redact_value(header))
                                }
                            })
                            .collect();
                        out.insert(key.clone(), Value::Object(masked));
                        continue;
                    }
                }
                out.insert(key.clone(), redact_value(entry));
            }
            Value::Object(out)
        }
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_bearer_tokens_in_text() {
        let out = redact_text("failed with Bearer abcdefghijklmnop", usize::MAX);
        assert_eq!(out, "failed with Bearer ***REDACTED***");
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(redact_text("abcdef", 3), "abc...");
    }

    #[test]
    fn masks_authorization_header() {
        let value = json!({
            "url": "https://api.attio.com/v2/self",
            "headers": {"Authorization": "Bearer secret-token-value", "Accept": "application/json"}
        });
        let out = redact_value(&value);
        assert_eq!(out["headers"]["Authorization"], "[REDACTED]");
        assert_eq!(out["headers"]["Accept"], "application/json");
        assert_eq!(out["url"], "https://api.attio.com/v2/self");
    }
}
