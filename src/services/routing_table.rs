use crate::errors::NodeError;
use crate::services::validation::Validation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Path,
    Query,
    Body,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRule {
    pub name: String,
    pub destination: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default)]
    pub kind: ValueKind,
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl ParameterRule {
    pub fn new(name: &str, destination: Destination) -> Self {
        Self {
            name: name.to_string(),
            destination,
            property: None,
            kind: ValueKind::Plain,
            default_value: None,
        }
    }

    pub fn with_property(mut self, property: &str) -> Self {
        self.property = Some(property.to_string());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Field name used in the body or query string.
    pub fn target_field(&self) -> &str {
        self.property
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingEntry {
    pub resource: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterRule>,
}

impl RoutingEntry {
    pub fn new(resource: &str, operation: &str, method: &str, url: &str) -> Self {
        Self {
            resource: resource.to_string(),
            operation: operation.to_string(),
            method: Some(method.to_string()),
            url: Some(url.to_string()),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, rule: ParameterRule) -> Self {
        self.parameters.push(rule);
        self
    }
}

#[derive(Debug, Deserialize)]
struct RoutingDocument {
    entries: Vec<RoutingEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    entries: Vec<RoutingEntry>,
    index: HashMap<(String, String), usize>,
}

impl RoutingTable {
    pub fn from_entries(entries: Vec<RoutingEntry>) -> Result<Self, NodeError> {
        let validation = Validation::new();
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let resource = validation
                .ensure_identifier(&entry.resource, "resource")
                .map_err(|err| NodeError::invalid_config(err.message))?;
            let operation = validation
                .ensure_identifier(&entry.operation, "operation")
                .map_err(|err| NodeError::invalid_config(err.message))?;
            if index
                .insert((resource.clone(), operation.clone()), position)
                .is_some()
            {
                return Err(NodeError::invalid_config(format!(
                    "Duplicate routing entry for resource {} operation {}",
                    resource, operation
                )));
            }
        }
        Ok(Self { entries, index })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, NodeError> {
        let document: RoutingDocument = serde_json::from_str(raw)
            .map_err(|err| NodeError::invalid_config(format!("Invalid routing table: {}", err)))?;
        Self::from_entries(document.entries)
    }

    pub fn load(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            NodeError::invalid_config(format!(
                "Failed to read routing table {}: {}",
                path.display(),
                err
            ))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, resource: &str, operation: &str) -> Option<&RoutingEntry> {
        self.index
            .get(&(resource.to_string(), operation.to_string()))
            .and_then(|position| self.entries.get(*position))
    }

    pub fn entries(&self) -> &[RoutingEntry] {
        &self.entries
    }

    pub fn operations_for(&self, resource: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.resource.trim() == resource)
            .map(|entry| entry.operation.trim().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
