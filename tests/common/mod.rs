#![allow(dead_code)]

use async_trait::async_trait;
use attio_node::app::App;
use attio_node::errors::NodeError;
use attio_node::managers::transport::Transport;
use attio_node::services::config::NodeConfig;
use attio_node::services::credentials::AttioCredentials;
use attio_node::services::logger::Logger;
use attio_node::services::request_builder::RequestDescriptor;
use attio_node::services::routing_table::RoutingTable;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "attio_test_token_123456";

pub const ROUTING_TABLE: &str = r#"{
  "entries": [
    {
      "resource": "Records",
      "operation": "post-v2-objects-object-records",
      "method": "POST",
      "url": "=/v2/objects/{{$parameter[\"object\"]}}/records",
      "parameters": [
        { "name": "object", "destination": "path" },
        { "name": "email", "destination": "body", "property": "email_addresses" },
        { "name": "data", "destination": "body", "kind": "json" }
      ]
    },
    {
      "resource": "Records",
      "operation": "post-v2-objects-object-records-query",
      "method": "POST",
      "url": "=/v2/objects/{{$parameter[\"object\"]}}/records/query",
      "parameters": [
        { "name": "object", "destination": "path" },
        { "name": "filter", "destination": "query", "kind": "json" },
        { "name": "limit", "destination": "query", "default": 25 },
        { "name": "sorts", "destination": "body", "kind": "json" }
      ]
    },
    {
      "resource": "Records",
      "operation": "get-v2-objects-object-records-record-id",
      "method": "GET",
      "url": "/v2/objects/{object}/records/{record_id}",
      "parameters": [
        { "name": "object", "destination": "path" },
        { "name": "record_id", "destination": "path" }
      ]
    },
    {
      "resource": "Records",
      "operation": "patch-v2-objects-object-records-record-id",
      "method": "PATCH",
      "url": "/v2/objects/{object}/records/{record_id}",
      "parameters": [
        { "name": "object", "destination": "path" },
        { "name": "record_id", "destination": "path" },
        { "name": "name", "destination": "body" },
        { "name": "values", "destination": "body", "kind": "json" }
      ]
    },
    {
      "resource": "Notes",
      "operation": "get-v2-notes",
      "method": "GET",
      "url": "=/v2/notes",
      "parameters": [
        { "name": "limit", "destination": "query" },
        { "name": "parent_object", "destination": "query" },
        { "name": "filter", "destination": "query", "kind": "json" }
      ]
    },
    {
      "resource": "Notes",
      "operation": "post-v2-notes",
      "method": "POST",
      "url": "=/v2/notes",
      "parameters": [
        { "name": "data", "destination": "body", "kind": "json" }
      ]
    },
    {
      "resource": "Webhooks",
      "operation": "get-v2-webhooks",
      "parameters": []
    }
  ]
}"#;

pub fn table() -> RoutingTable {
    RoutingTable::from_json_str(ROUTING_TABLE).expect("fixture routing table")
}

/// Records every request and answers from a scripted queue.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<RequestDescriptor>>,
    pub responses: Mutex<Vec<Result<Value, NodeError>>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: Vec<Result<Value, NodeError>>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, NodeError> {
        self.sent.lock().expect("sent lock").push(request.clone());
        let mut responses = self.responses.lock().expect("responses lock");
        if responses.is_empty() {
            return Ok(serde_json::json!({ "data": { "ok": true } }));
        }
        responses.remove(0)
    }
}

pub fn app(continue_on_fail: bool, transport: Arc<RecordingTransport>) -> App {
    let config = NodeConfig::default().with_continue_on_fail(continue_on_fail);
    App::with_transport(
        Logger::new("test"),
        table(),
        config,
        Some(AttioCredentials::new(TOKEN).expect("credentials")),
        transport,
    )
    .expect("app")
}
