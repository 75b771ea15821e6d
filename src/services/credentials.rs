use crate::constants::{env, network::USER_AGENT};
use crate::errors::NodeError;
use std::collections::BTreeMap;
use std::fmt;

/// Attio access token; rendered once into the static request headers.
#[derive(Clone)]
pub struct AttioCredentials {
    access_token: String,
}

impl AttioCredentials {
    pub fn new(access_token: &str) -> Result<Self, NodeError> {
        let token = access_token.trim();
        if token.is_empty() {
            return Err(NodeError::invalid_config("Attio access token must not be empty")
                .with_hint(format!("Set {} or pass --access-token", env::ACCESS_TOKEN)));
        }
        Ok(Self {
            access_token: token.to_string(),
        })
    }

    pub fn static_headers(&self) -> BTreeMap<String, String> {
        let mut headers = base_headers();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.access_token),
        );
        headers
    }
}

/// Request defaults sent with every call, credentials excluded.
pub fn base_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    headers
}

impl fmt::Debug for AttioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttioCredentials")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bearer_header() {
        let credentials = AttioCredentials::new(" tok_123 ").expect("credentials");
        let headers = credentials.static_headers();
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer tok_123"));
        assert_eq!(headers.get("Accept").map(String::as_str), Some("application/json"));
        assert!(!format!("{:?}", credentials).contains("tok_123"));
    }

    #[test]
    fn rejects_blank_token() {
        let err = AttioCredentials::new("  ").unwrap_err();
        assert_eq!(err.code, "INVALID_CONFIG");
    }
}
