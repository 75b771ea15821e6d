use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeErrorKind {
    InvalidParams,
    InvalidConfig,
    OperationNotFound,
    RoutingMissing,
    UnresolvedPathPlaceholder,
    Transport,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeError {
    pub kind: NodeErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl NodeError {
    pub fn new(kind: NodeErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::InvalidConfig, "INVALID_CONFIG", message)
    }

    pub fn operation_not_found(resource: &str, operation: &str) -> Self {
        Self::new(
            NodeErrorKind::OperationNotFound,
            "OPERATION_NOT_FOUND",
            format!(
                "Operation {} not found for resource {}",
                operation, resource
            ),
        )
    }

    pub fn routing_missing(operation: &str, what: &str) -> Self {
        Self::new(
            NodeErrorKind::RoutingMissing,
            "ROUTING_MISSING",
            format!("Operation configuration not found for {}: {}", operation, what),
        )
    }

    pub fn unresolved_placeholders(url: &str, names: &[String]) -> Self {
        Self::new(
            NodeErrorKind::UnresolvedPathPlaceholder,
            "UNRESOLVED_PATH_PLACEHOLDER",
            format!(
                "Missing value for path parameter(s) {} in {}",
                names.join(", "),
                url
            ),
        )
        .with_details(serde_json::json!({ "url": url, "missing": names }))
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Transport, "TRANSPORT_ERROR", message)
    }

    pub fn transport_timeout(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Transport, "TRANSPORT_TIMEOUT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Internal, "INTERNAL", message)
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for NodeError {}

impl From<std::io::Error> for NodeError {
    fn from(err: std::io::Error) -> Self {
        NodeError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::invalid_params(format!("Invalid JSON: {}", err))
    }
}
