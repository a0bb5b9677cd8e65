// ABOUTME: Tests for outbound request construction and completion handling
// ABOUTME: Exercises the request builder, shared client, and completion logger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]

mod common;

use common::RecordingTransport;
use td_analytics::{
    log_completion, shared_client, AnalyticsTransport, CompletionEvent, OutboundRequest,
};

#[test]
fn post_json_sets_method_url_headers_and_body() {
    let request = OutboundRequest::post_json(
        "https://ingest.example.com/db/sessions".to_owned(),
        "wk/secret",
        "{\"start_time\":1}".to_owned(),
    );

    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(request.url, "https://ingest.example.com/db/sessions");
    assert_eq!(request.body, "{\"start_time\":1}");
    assert_eq!(
        request.headers,
        vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("X-TD-Write-Key".to_owned(), "wk/secret".to_owned()),
        ]
    );
}

#[test]
fn shared_client_is_process_wide() {
    let first = shared_client();
    let second = shared_client();
    assert!(std::ptr::eq(first, second));
}

#[tokio::test]
async fn recording_transport_reports_delivery() {
    let transport = RecordingTransport::new();
    let request = OutboundRequest::post_json(
        "https://ingest.example.com/db/events".to_owned(),
        "wk/secret",
        "{}".to_owned(),
    );

    let event = transport.execute(request).await;
    assert!(event.success);
    let response = event.response.as_ref().expect("response is present");
    assert_eq!(response.status, 200);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn log_completion_handles_both_outcomes() {
    let request = OutboundRequest::post_json(
        "https://ingest.example.com/db/events".to_owned(),
        "wk/secret",
        "{}".to_owned(),
    );

    log_completion(&CompletionEvent {
        request: request.clone(),
        response: Some(td_analytics::TransportResponse {
            status: 200,
            body: "ok".to_owned(),
        }),
        success: true,
    });

    log_completion(&CompletionEvent {
        request,
        response: None,
        success: false,
    });
}
