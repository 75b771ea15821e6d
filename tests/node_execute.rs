mod common;

use attio_node::errors::{NodeError, NodeErrorKind};
use attio_node::managers::node::InputRecord;
use common::RecordingTransport;
use serde_json::json;
use std::sync::Arc;

fn create_person(email: &str) -> InputRecord {
    InputRecord::new(
        "Records",
        "post-v2-objects-object-records",
        json!({"object": "people", "email": email}),
    )
}

#[tokio::test]
async fn dispatches_records_in_order() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![
        Ok(json!({"data": {"id": 1}})),
        Ok(json!({"data": [{"id": 2}]})),
    ]));
    let app = common::app(false, transport.clone());

    let items = app
        .node
        .execute(&[
            create_person("a@b.com"),
            InputRecord::new("Notes", "get-v2-notes", json!({"limit": 5})),
        ])
        .await
        .expect("execute");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].json, json!({"data": {"id": 1}}));
    assert_eq!(items[0].paired_item, 0);
    assert_eq!(items[1].paired_item, 1);

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].url, "https://api.attio.com/v2/objects/people/records");
    assert_eq!(sent[1].url, "https://api.attio.com/v2/notes");
    assert_eq!(sent[1].query.as_ref().and_then(|q| q.get("limit")), Some(&json!(5)));
}

#[tokio::test]
async fn continue_on_fail_pairs_errors_with_items() {
    let transport = Arc::new(RecordingTransport::default());
    let app = common::app(true, transport.clone());

    let items = app
        .node
        .execute(&[
            create_person("a@b.com"),
            InputRecord::new("Records", "delete-everything", json!({})),
            InputRecord::new("Webhooks", "get-v2-webhooks", json!({})),
            create_person("c@d.com"),
        ])
        .await
        .expect("execute");

    assert_eq!(items.len(), 4);
    assert_eq!(
        items[1].json,
        json!({"error": "Operation delete-everything not found for resource Records"})
    );
    assert_eq!(items[1].paired_item, 1);
    assert!(items[2].json["error"].is_string());
    assert_eq!(items[2].paired_item, 2);
    assert_eq!(items[3].json, json!({"data": {"ok": true}}));
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn first_failure_aborts_without_continue_on_fail() {
    let transport = Arc::new(RecordingTransport::default());
    let app = common::app(false, transport.clone());

    let err = app
        .node
        .execute(&[
            create_person("a@b.com"),
            InputRecord::new(
                "Records",
                "get-v2-objects-object-records-record-id",
                json!({"object": "people"}),
            ),
            create_person("c@d.com"),
        ])
        .await
        .unwrap_err();

    assert_eq!(err.kind, NodeErrorKind::UnresolvedPathPlaceholder);
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn transport_errors_are_reported_per_item() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![Err(
        NodeError::transport("Attio responded with 404 Not Found"),
    )]));
    let app = common::app(true, transport.clone());

    let items = app
        .node
        .execute(&[create_person("a@b.com"), create_person("c@d.com")])
        .await
        .expect("execute");

    assert_eq!(
        items[0].json,
        json!({"error": "Attio responded with 404 Not Found"})
    );
    assert_eq!(items[1].json, json!({"data": {"ok": true}}));
}

#[tokio::test]
async fn transport_error_propagates_without_continue_on_fail() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![Err(
        NodeError::transport("connection refused"),
    )]));
    let app = common::app(false, transport);

    let err = app
        .node
        .execute(&[create_person("a@b.com")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, NodeErrorKind::Transport);
}

#[tokio::test]
async fn empty_batch_produces_no_items() {
    let transport = Arc::new(RecordingTransport::default());
    let app = common::app(false, transport.clone());

    let items = app.node.execute(&[]).await.expect("execute");
    assert!(items.is_empty());
    assert!(transport.sent().is_empty());
}

#[test]
fn build_requests_redacts_authorization() {
    let transport = Arc::new(RecordingTransport::default());
    let app = common::app(false, transport.clone());

    let items = app
        .node
        .build_requests(&[create_person("a@b.com")])
        .expect("build");

    let request = &items[0].json;
    assert_eq!(request["method"], json!("POST"));
    assert_eq!(request["headers"]["Authorization"], json!("[REDACTED]"));
    assert_eq!(request["headers"]["Accept"], json!("application/json"));
    assert_eq!(
        request["body"],
        json!({"data": {"values": {"email_addresses": "a@b.com"}}})
    );
    assert!(transport.sent().is_empty());
}

#[test]
fn build_request_keeps_token_for_dispatch() {
    let app = common::app(false, Arc::new(RecordingTransport::default()));
    let request = app
        .node
        .build_request(&create_person("a@b.com"))
        .expect("request");
    assert_eq!(
        request.headers.get("Authorization").map(String::as_str),
        Some(format!("Bearer {}", common::TOKEN).as_str())
    );
}

#[test]
fn build_requests_reports_bad_records_under_continue_on_fail() {
    let app = common::app(true, Arc::new(RecordingTransport::default()));

    let items = app
        .node
        .build_requests(&[
            InputRecord::new("Webhooks", "get-v2-webhooks", json!({})),
            InputRecord::new("Notes", "get-v2-notes", json!({"limit": 3})),
        ])
        .expect("build");

    assert_eq!(items.len(), 2);
    assert!(items[0].json["error"].is_string());
    assert_eq!(items[1].json["url"], json!("https://api.attio.com/v2/notes"));
    assert_eq!(items[1].json["query"], json!({"limit": 3}));
    assert_eq!(items[1].paired_item, 1);
}
