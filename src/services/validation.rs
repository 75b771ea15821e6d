use crate::constants::protocols::ALLOWED_HTTP;
use crate::errors::NodeError;
use std::collections::BTreeMap;
use url::Url;

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_identifier(&self, value: &str, label: &str) -> Result<String, NodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(NodeError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        if trimmed.contains('\0') {
            return Err(NodeError::invalid_params(format!(
                "{} must not contain null bytes",
                label
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn ensure_base_url(&self, value: &str) -> Result<String, NodeError> {
        let trimmed = value.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|_| NodeError::invalid_config(format!("Invalid base URL: {}", value)))?;
        if !scheme_allowed(parsed.scheme()) {
            return Err(NodeError::invalid_config("Only http/https base URLs are supported"));
        }
        Ok(trimmed.to_string())
    }

    pub fn ensure_headers(
        &self,
        headers: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, NodeError> {
        let mut out = BTreeMap::new();
        for (key, value) in headers {
            let name = key.trim();
            if name.is_empty() {
                continue;
            }
            if value.contains('\n') || value.contains('\r') {
                return Err(NodeError::invalid_params(format!(
                    "Header {} must not contain line breaks",
                    name
                )));
            }
            out.insert(name.to_string(), value.clone());
        }
        Ok(out)
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

pub fn scheme_allowed(scheme: &str) -> bool {
    let normalized = scheme.trim_end_matches(':');
    ALLOWED_HTTP
        .iter()
        .any(|allowed| allowed.trim_end_matches(':') == normalized)
}
