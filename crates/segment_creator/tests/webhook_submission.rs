//! End-to-end submission tests against a local one-shot HTTP responder.

mod common;

use common::respond_once;
use pretty_assertions::assert_eq;
use segment_creator::{
    config::Config,
    segment::SegmentEditor,
    submit::{SubmitError, WebhookClient, FALLBACK_MESSAGE},
};
use serde_json::json;
use tokio::net::TcpListener;

fn vip_editor() -> SegmentEditor {
    let mut editor = SegmentEditor::new();
    editor.open();
    let draft = editor.draft_mut().unwrap();
    draft.set_name("VIP Users");
    draft.set_pending("first_name");
    draft.add_pending();
    draft.set_pending("city");
    draft.add_pending();
    editor
}

#[tokio::test]
async fn ok_response_closes_editor_and_posts_payload() {
    let (url, server) = respond_once("200 OK").await;
    let client = WebhookClient::new(url);
    let mut editor = vip_editor();

    let result = client.save(&mut editor).await;
    assert_eq!(result, Some(Ok(())));
    assert!(!editor.is_open());
    assert!(editor.draft().is_empty());

    let request = server.await.unwrap();
    assert!(request.head.starts_with("post /hook http/1.1"));
    assert!(request.head.contains("content-type: application/json"));
    assert_eq!(
        request.json(),
        json!({
            "segment_name": "VIP Users",
            "schema": [{"first_name": "First Name"}, {"city": "City"}]
        })
    );
}

#[tokio::test]
async fn any_2xx_counts_as_success() {
    let (url, server) = respond_once("204 No Content").await;
    let client = WebhookClient::new(url);
    let mut editor = vip_editor();
    assert_eq!(client.save(&mut editor).await, Some(Ok(())));
    assert!(!editor.is_open());
    server.await.unwrap();
}

#[tokio::test]
async fn not_found_keeps_draft_and_reports_webhook_url() {
    let (url, server) = respond_once("404 Not Found").await;
    let client = WebhookClient::new(url);
    let mut editor = vip_editor();
    let before = editor.draft().clone();

    let result = client.save(&mut editor).await;
    assert_eq!(result, Some(Err(SubmitError::NotFound)));
    assert!(editor.is_open());
    assert!(!editor.is_saving());
    assert_eq!(editor.draft(), &before);
    let message = editor.error().unwrap();
    assert!(message.contains("not found"));
    assert!(message.contains("verify the webhook URL"));
    server.await.unwrap();
}

#[tokio::test]
async fn forbidden_status_message() {
    let (url, server) = respond_once("403 Forbidden").await;
    let client = WebhookClient::new(url);
    let mut editor = vip_editor();
    client.save(&mut editor).await;
    assert!(editor.error().unwrap().contains("forbidden"));
    server.await.unwrap();
}

#[tokio::test]
async fn server_error_message_carries_status() {
    let (url, server) = respond_once("500 Internal Server Error").await;
    let client = WebhookClient::new(url);
    let mut editor = vip_editor();
    let result = client.save(&mut editor).await;
    assert_eq!(result, Some(Err(SubmitError::Status(500))));
    assert!(editor.error().unwrap().contains("500"));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = WebhookClient::new(format!("http://{addr}/hook"));
    let mut editor = vip_editor();
    let result = client.save(&mut editor).await;
    match result {
        Some(Err(SubmitError::Transport(message))) => assert!(!message.is_empty()),
        other => panic!("expected transport error, got {other:?}"),
    }
    let shown = editor.error().unwrap();
    assert!(!shown.is_empty());
    assert_ne!(shown, FALLBACK_MESSAGE);
    assert!(editor.is_open());
}

#[tokio::test]
async fn closed_editor_is_not_submitted() {
    let client = WebhookClient::new("http://127.0.0.1:9/hook");
    let mut editor = SegmentEditor::new();
    assert_eq!(client.save(&mut editor).await, None);
}

#[tokio::test]
async fn headless_submit_posts_and_succeeds() {
    let (url, server) = respond_once("200 OK").await;
    segment_creator::submit(
        Config::with_endpoint(url),
        "VIP Users".into(),
        vec!["first_name".into(), "city".into()],
    )
    .await
    .unwrap();
    let request = server.await.unwrap();
    assert_eq!(
        request.json(),
        json!({
            "segment_name": "VIP Users",
            "schema": [{"first_name": "First Name"}, {"city": "City"}]
        })
    );
}

#[tokio::test]
async fn headless_submit_fails_with_user_message() {
    let (url, server) = respond_once("404 Not Found").await;
    let err = segment_creator::submit(
        Config::with_endpoint(url),
        "VIP Users".into(),
        vec!["age".into()],
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to save segment. Endpoint not found. Please verify the webhook URL."
    );
    server.await.unwrap();
}

#[tokio::test]
async fn headless_submit_refuses_repeated_schema_before_sending() {
    // Nothing listens here; a request would surface as a transport error.
    let err = segment_creator::submit(
        Config::with_endpoint("http://127.0.0.1:9/hook"),
        "x".into(),
        vec!["age".into(), "age".into()],
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("already part of the segment"));
}
