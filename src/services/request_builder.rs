use crate::constants::routing::EXPRESSION_PREFIX;
use crate::errors::NodeError;
use crate::services::logger::Logger;
use crate::services::parameters::{decode_json_value, is_meaningful, is_present, ParameterValues};
use crate::services::resolver::ResolvedRoute;
use crate::services::routing_table::{Destination, ValueKind};
use crate::utils::body_rules::{classify, normalize};
use crate::utils::placeholders::{
    encode_path_segment, placeholder_names, render_path_value, substitute,
};
use crate::utils::text::{has_url_scheme, join_origin, strip_expression_prefix};
use reqwest::Method;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    logger: Logger,
    base_url: String,
}

impl RequestBuilder {
    pub fn new(logger: Logger, base_url: &str) -> Self {
        Self {
            logger: logger.child("request"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build(
        &self,
        route: &ResolvedRoute<'_>,
        values: &ParameterValues,
        static_headers: &BTreeMap<String, String>,
    ) -> Result<RequestDescriptor, NodeError> {
        let rules = route.parameters();
        let template = strip_expression_prefix(route.url_template, EXPRESSION_PREFIX);

        let mut body: Option<Map<String, Value>> = None;
        let mut query: Option<Map<String, Value>> = None;

        for rule in rules {
            if rule.destination == Destination::Path {
                continue;
            }
            let Some(value) = values.lookup(&rule.name, rules) else {
                self.logger.debug(
                    "parameter skipped",
                    Some(&serde_json::json!({ "parameter": rule.name })),
                );
                continue;
            };
            if !is_present(value) {
                continue;
            }
            let processed = match rule.kind {
                ValueKind::Json => decode_json_value(value),
                ValueKind::Plain => value.clone(),
            };
            let field = rule.target_field().to_string();
            match rule.destination {
                Destination::Body => {
                    body.get_or_insert_with(Map::new).insert(field, processed);
                }
                Destination::Query => {
                    if is_meaningful(&processed) {
                        query.get_or_insert_with(Map::new).insert(field, processed);
                    }
                }
                Destination::Path => {}
            }
        }

        let mut segments: HashMap<String, String> = HashMap::new();
        for name in placeholder_names(template) {
            let Some(raw) = values.lookup(&name, rules).and_then(render_path_value) else {
                continue;
            };
            let encoded = encode_path_segment(&raw).ok_or_else(|| {
                NodeError::invalid_params(format!(
                    "Path parameter {} must not be a dot segment",
                    name
                ))
            })?;
            segments.insert(name, encoded);
        }
        let path = substitute(template, |name| segments.get(name).cloned())
            .map_err(|missing| NodeError::unresolved_placeholders(template, &missing))?;

        let url = if has_url_scheme(&path) {
            path
        } else {
            join_origin(&self.base_url, &path)
        };

        let shape = classify(&route.method, &url);
        let (body, query) = normalize(shape, body, query);

        Ok(RequestDescriptor {
            method: route.method.clone(),
            url,
            headers: static_headers.clone(),
            body: body.map(Value::Object),
            query,
        })
    }
}
