use crate::constants::routing::{BODY_ENVELOPE_KEY, BODY_VALUES_KEY};
use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// `POST .../records/query`, `POST .../entries/query`
    Query,
    /// `POST .../records`
    RecordCreate,
    /// `PUT|PATCH .../records/{record_id}`
    RecordUpdate,
    Other,
}

fn path_segments(url: &str) -> Vec<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .collect()
}

pub fn classify(method: &Method, url: &str) -> CallShape {
    let segments = path_segments(url);
    let last = segments.last().map(String::as_str);
    let parent = segments
        .len()
        .checked_sub(2)
        .and_then(|i| segments.get(i))
        .map(String::as_str);

    if *method == Method::POST && last == Some("query") {
        return CallShape::Query;
    }
    if *method == Method::POST && last == Some("records") {
        return CallShape::RecordCreate;
    }
    if (*method == Method::PUT || *method == Method::PATCH) && parent == Some("records") {
        return CallShape::RecordUpdate;
    }
    CallShape::Other
}

fn wrap_record_values(body: Map<String, Value>) -> Map<String, Value> {
    if body.contains_key(BODY_ENVELOPE_KEY) {
        return body;
    }
    let mut data = Map::new();
    data.insert(BODY_VALUES_KEY.to_string(), Value::Object(body));
    let mut wrapped = Map::new();
    wrapped.insert(BODY_ENVELOPE_KEY.to_string(), Value::Object(data));
    wrapped
}

/// Applies the body/query repairs for `shape`; empty maps come back as `None`.
pub fn normalize(
    shape: CallShape,
    body: Option<Map<String, Value>>,
    query: Option<Map<String, Value>>,
) -> (Option<Map<String, Value>>, Option<Map<String, Value>>) {
    let mut body = body.filter(|b| !b.is_empty());
    let mut query = query.filter(|q| !q.is_empty());

    match shape {
        CallShape::Query => {
            if let Some(moved) = query.take() {
                let mut merged = body.take().unwrap_or_default();
                merged.extend(moved);
                body = Some(merged);
            }
        }
        CallShape::RecordCreate | CallShape::RecordUpdate => {
            body = body.map(wrap_record_values);
        }
        CallShape::Other => {}
    }

    (body, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn classifies_attio_endpoints() {
        let base = "https://api.attio.com/v2/objects/people/records";
        assert_eq!(classify(&Method::POST, base), CallShape::RecordCreate);
        assert_eq!(classify(&Method::PUT, base), CallShape::Other);
        assert_eq!(
            classify(&Method::POST, &format!("{}/query", base)),
            CallShape::Query
        );
        assert_eq!(
            classify(&Method::PATCH, &format!("{}/42", base)),
            CallShape::RecordUpdate
        );
        assert_eq!(
            classify(&Method::PUT, &format!("{}/42", base)),
            CallShape::RecordUpdate
        );
        assert_eq!(classify(&Method::GET, &format!("{}/42", base)), CallShape::Other);
        assert_eq!(
            classify(&Method::POST, "/v2/lists/sales/entries/query"),
            CallShape::Query
        );
        assert_eq!(classify(&Method::POST, "/v2/notes"), CallShape::Other);
    }

    #[test]
    fn wraps_create_body() {
        let (body, query) = normalize(
            CallShape::RecordCreate,
            Some(map(json!({"email": "a@b.com"}))),
            None,
        );
        assert_eq!(
            body.map(Value::Object),
            Some(json!({"data": {"values": {"email": "a@b.com"}}}))
        );
        assert!(query.is_none());
    }

    #[test]
    fn keeps_body_with_envelope() {
        let original = map(json!({"data": {"values": {"name": "Ada"}}}));
        let (body, _) = normalize(CallShape::RecordUpdate, Some(original.clone()), None);
        assert_eq!(body, Some(original));
    }

    #[test]
    fn moves_query_into_body_for_query_calls() {
        let (body, query) = normalize(
            CallShape::Query,
            Some(map(json!({"limit": 5}))),
            Some(map(json!({"filter": "x", "limit": 10}))),
        );
        assert_eq!(
            body.map(Value::Object),
            Some(json!({"filter": "x", "limit": 10}))
        );
        assert!(query.is_none());
    }

    #[test]
    fn leaves_other_calls_alone() {
        let (body, query) = normalize(
            CallShape::Other,
            Some(map(json!({"title": "t"}))),
            Some(map(json!({"limit": 1}))),
        );
        assert_eq!(body.map(Value::Object), Some(json!({"title": "t"})));
        assert_eq!(query.map(Value::Object), Some(json!({"limit": 1})));
    }

    #[test]
    fn empty_body_is_dropped() {
        let (body, query) = normalize(CallShape::RecordCreate, Some(Map::new()), Some(Map::new()));
        assert!(body.is_none());
        assert!(query.is_none());
    }
}
