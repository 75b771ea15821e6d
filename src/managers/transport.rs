use crate::constants::limits::ERROR_BODY_EXCERPT_BYTES;
use crate::errors::NodeError;
use crate::services::logger::Logger;
use crate::services::request_builder::RequestDescriptor;
use crate::services::validation::scheme_allowed;
use crate::utils::redact::redact_text;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use url::Url;

/// Performs one HTTP round trip for a built request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, NodeError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    logger: Logger,
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(logger: Logger, timeout_ms: u64) -> Result<Self, NodeError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| NodeError::internal(format!("Failed to build HTTP client: {}", err)))?;
        Ok(Self {
            logger: logger.child("http"),
            client,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, NodeError> {
        let url = build_url(&request.url, request.query.as_ref())?;
        let mut req = self
            .client
            .request(request.method.clone(), url)
            .headers(headers_to_headermap(&request.headers)?)
            .timeout(self.timeout);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let started = Instant::now();
        let response = req.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        self.logger.debug(
            "response",
            Some(&serde_json::json!({
                "method": request.method.as_str(),
                "status": status.as_u16(),
                "duration_ms": started.elapsed().as_millis() as u64,
            })),
        );

        let data = decode_body(&text);
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            return Err(NodeError::transport(format!(
                "Attio API responded with {} {}: {}",
                status.as_u16(),
                reason,
                redact_text(text.trim(), ERROR_BODY_EXCERPT_BYTES)
            ))
            .with_details(serde_json::json!({
                "status": status.as_u16(),
                "url": request.url,
                "body": data,
            })));
        }
        Ok(data)
    }
}

/// Empty bodies become `{}`; non-JSON text is wrapped as `{"data": text}`.
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "data": text }))
}

fn query_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn build_url(raw: &str, query: Option<&Map<String, Value>>) -> Result<Url, NodeError> {
    let mut url =
        Url::parse(raw).map_err(|_| NodeError::invalid_params(format!("Invalid URL: {}", raw)))?;
    if !scheme_allowed(url.scheme()) {
        return Err(NodeError::invalid_params("Only http/https URLs are supported"));
    }
    let mut pairs: Vec<(&str, String)> = Vec::new();
    for (key, value) in query.into_iter().flatten() {
        let items: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        for item in items.into_iter().filter(|item| !item.is_null()) {
            pairs.push((key.as_str(), query_text(item)));
        }
    }
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

fn headers_to_headermap(headers: &BTreeMap<String, String>) -> Result<HeaderMap, NodeError> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| NodeError::invalid_params(format!("Invalid header name: {}", key)))?;
        let val = HeaderValue::from_str(value)
            .map_err(|_| NodeError::invalid_params(format!("Invalid value for header {}", key)))?;
        map.insert(name, val);
    }
    Ok(map)
}

fn map_reqwest_error(err: reqwest::Error) -> NodeError {
    if err.is_timeout() {
        return NodeError::transport_timeout("HTTP request timed out");
    }
    NodeError::transport(redact_text(&err.to_string(), usize::MAX))
}
