use crate::errors::NodeError;
use crate::managers::transport::Transport;
use crate::services::logger::Logger;
use crate::services::parameters::ParameterValues;
use crate::services::request_builder::{RequestBuilder, RequestDescriptor};
use crate::services::resolver::resolve;
use crate::services::routing_table::RoutingTable;
use crate::utils::redact::redact_value;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub resource: String,
    pub operation: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl InputRecord {
    pub fn new(resource: &str, operation: &str, parameters: Value) -> Self {
        Self {
            resource: resource.to_string(),
            operation: operation.to_string(),
            parameters: parameters.as_object().cloned().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputItem {
    pub json: Value,
    pub paired_item: usize,
}

impl OutputItem {
    fn failed(err: &NodeError, index: usize) -> Self {
        Self {
            json: serde_json::json!({ "error": err.message }),
            paired_item: index,
        }
    }
}

/// Sequential batch executor: resolve, build, then dispatch each record.
#[derive(Clone)]
pub struct AttioNode {
    logger: Logger,
    table: Arc<RoutingTable>,
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    static_headers: BTreeMap<String, String>,
    continue_on_fail: bool,
}

impl AttioNode {
    pub fn new(
        logger: Logger,
        table: Arc<RoutingTable>,
        builder: RequestBuilder,
        transport: Arc<dyn Transport>,
        static_headers: BTreeMap<String, String>,
        continue_on_fail: bool,
    ) -> Self {
        Self {
            logger: logger.child("node"),
            table,
            builder,
            transport,
            static_headers,
            continue_on_fail,
        }
    }

    pub fn build_request(&self, record: &InputRecord) -> Result<RequestDescriptor, NodeError> {
        let route = resolve(&record.resource, &record.operation, &self.table)?;
        let values = ParameterValues::new(record.parameters.clone());
        self.builder.build(&route, &values, &self.static_headers)
    }

    pub async fn execute(&self, records: &[InputRecord]) -> Result<Vec<OutputItem>, NodeError> {
        let mut out = Vec::with_capacity(records.len());
        let mut failed = 0usize;
        for (index, record) in records.iter().enumerate() {
            match self.execute_one(record).await {
                Ok(json) => out.push(OutputItem {
                    json,
                    paired_item: index,
                }),
                Err(err) => {
                    let meta = serde_json::json!({
                        "item": index,
                        "code": err.code,
                        "error": err.message,
                    });
                    if !self.continue_on_fail {
                        self.logger.error("record failed, aborting batch", Some(&meta));
                        return Err(err);
                    }
                    self.logger.warn("record failed", Some(&meta));
                    failed += 1;
                    out.push(OutputItem::failed(&err, index));
                }
            }
        }
        self.logger.info(
            "batch complete",
            Some(&serde_json::json!({ "items": records.len(), "failed": failed })),
        );
        Ok(out)
    }

    /// Same walk as [`AttioNode::execute`] without dispatching; descriptors are redacted.
    pub fn build_requests(&self, records: &[InputRecord]) -> Result<Vec<OutputItem>, NodeError> {
        let mut out = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match self.build_request(record) {
                Ok(request) => {
                    let json = serde_json::to_value(&request)
                        .map_err(|err| NodeError::internal(err.to_string()))?;
                    out.push(OutputItem {
                        json: redact_value(&json),
                        paired_item: index,
                    });
                }
                Err(err) if self.continue_on_fail => out.push(OutputItem::failed(&err, index)),
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }

    async fn execute_one(&self, record: &InputRecord) -> Result<Value, NodeError> {
        let request = self.build_request(record)?;
        if let Ok(json) = serde_json::to_value(&request) {
            self.logger.debug("dispatch", Some(&redact_value(&json)));
        }
        self.transport.send(&request).await
    }
}
