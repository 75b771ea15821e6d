use crate::constants::{env, network};
use crate::errors::NodeError;
use crate::services::validation::Validation;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub continue_on_fail: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            base_url: network::ATTIO_BASE_URL.to_string(),
            timeout_ms: network::TIMEOUT_API_REQUEST_MS,
            continue_on_fail: false,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl NodeConfig {
    /// Defaults overlaid with `ATTIO_*` environment variables.
    pub fn from_env() -> Result<Self, NodeError> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(env::BASE_URL) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(raw) = std::env::var(env::TIMEOUT_MS) {
            config.timeout_ms = raw.trim().parse::<u64>().map_err(|_| {
                NodeError::invalid_config(format!("{} must be a positive integer", env::TIMEOUT_MS))
            })?;
        }
        if let Ok(raw) = std::env::var(env::CONTINUE_ON_FAIL) {
            config.continue_on_fail = parse_flag(&raw).ok_or_else(|| {
                NodeError::invalid_config(format!("{} must be a boolean", env::CONTINUE_ON_FAIL))
            })?;
        }
        config.validate()
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if let Some(timeout_ms) = timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        self
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = self.continue_on_fail || enabled;
        self
    }

    pub fn validate(mut self) -> Result<Self, NodeError> {
        self.base_url = Validation::new().ensure_base_url(&self.base_url)?;
        if self.timeout_ms == 0 {
            return Err(NodeError::invalid_config("timeout_ms must be greater than zero"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_attio() {
        let config = NodeConfig::default().validate().expect("valid");
        assert_eq!(config.base_url, "https://api.attio.com");
        assert!(!config.continue_on_fail);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = NodeConfig::default()
            .with_base_url(Some("ftp://example.com".to_string()))
            .validate()
            .unwrap_err();
        assert_eq!(err.code, "INVALID_CONFIG");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = NodeConfig::default()
            .with_base_url(Some("http://localhost:8080/".to_string()))
            .validate()
            .expect("valid");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn parses_flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
