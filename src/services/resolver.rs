use crate::constants::limits::MAX_OPERATION_SUGGESTIONS;
use crate::errors::NodeError;
use crate::services::routing_table::{ParameterRule, RoutingEntry, RoutingTable};
use crate::services::validation::Validation;
use crate::utils::suggest::suggest;
use reqwest::Method;

/// A routing entry whose method and URL template are known to be usable.
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'a> {
    pub entry: &'a RoutingEntry,
    pub method: Method,
    pub url_template: &'a str,
}

impl<'a> ResolvedRoute<'a> {
    pub fn parameters(&self) -> &'a [ParameterRule] {
        &self.entry.parameters
    }
}

pub fn resolve<'a>(
    resource: &str,
    operation: &str,
    table: &'a RoutingTable,
) -> Result<ResolvedRoute<'a>, NodeError> {
    let validation = Validation::new();
    let resource = validation.ensure_identifier(resource, "resource")?;
    let operation = validation.ensure_identifier(operation, "operation")?;

    let Some(entry) = table.get(&resource, &operation) else {
        return Err(not_found(&resource, &operation, table));
    };

    let method = entry
        .method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| NodeError::routing_missing(&operation, "missing HTTP method"))?;
    let method = Method::from_bytes(method.to_uppercase().as_bytes()).map_err(|_| {
        NodeError::routing_missing(&operation, &format!("invalid HTTP method {}", method))
    })?;
    let url_template = entry
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| NodeError::routing_missing(&operation, "missing URL template"))?;

    Ok(ResolvedRoute {
        entry,
        method,
        url_template,
    })
}

fn not_found(resource: &str, operation: &str, table: &RoutingTable) -> NodeError {
    let known = table.operations_for(resource);
    let err = NodeError::operation_not_found(resource, operation);
    if known.is_empty() {
        return err.with_hint(format!("Resource {} has no operations", resource));
    }
    let suggestions = suggest(operation, &known, MAX_OPERATION_SUGGESTIONS);
    let err = err.with_details(serde_json::json!({
        "resource": resource,
        "operation": operation,
        "did_you_mean": suggestions,
    }));
    if suggestions.is_empty() {
        err
    } else {
        err.with_hint(format!("Did you mean: {}?", suggestions.join(", ")))
    }
}
