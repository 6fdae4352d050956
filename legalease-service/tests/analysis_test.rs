//! Citation formatting and category detection.

mod common;

use common::TestApp;
use legalease_service::services::providers::mock::MockTextProvider;
use legalease_service::services::providers::ProviderError;
use std::sync::Arc;

#[tokio::test]
async fn citation_is_formatted_by_provider() {
    let (app, provider) = TestApp::spawn().await;

    let response = app
        .post_json("/api/cite", serde_json::json!({ "citation": " 15 usc 45 " }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["original"], "15 usc 45");
    assert!(body["formatted"].as_str().unwrap().starts_with("Mock response"));

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Bluebook"));
    assert!(prompts[0].contains("\"15 usc 45\""));
    assert!(app.state.assistant.store().is_empty());
}

#[tokio::test]
async fn blank_citation_is_rejected() {
    let (app, provider) = TestApp::spawn().await;

    let response = app
        .post_json("/api/cite", serde_json::json!({ "citation": "  " }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Citation text required");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn category_analysis_truncates_long_text() {
    let (app, _) = TestApp::spawn().await;
    let text = "My employer changed my contract without notice. ".repeat(5);

    let response = app
        .post_json("/api/analyze-category", serde_json::json!({ "text": text }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let echoed = body["text"].as_str().unwrap();
    assert!(echoed.ends_with("..."));
    assert_eq!(echoed.chars().count(), 103);
    assert!(body["category_analysis"].is_string());
}

#[tokio::test]
async fn short_category_text_is_echoed_unchanged() {
    let (app, _) = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/analyze-category",
            serde_json::json!({ "text": "Can my landlord keep my deposit?" }),
        )
        .await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["text"], "Can my landlord keep my deposit?");
}

#[tokio::test]
async fn blank_category_text_is_rejected() {
    let (app, _) = TestApp::spawn().await;

    let response = app
        .post_json("/api/analyze-category", serde_json::json!({}))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Text required");
}

#[tokio::test]
async fn category_provider_failure_is_reported() {
    let provider =
        Arc::new(MockTextProvider::new().fail_next(ProviderError::ContentFiltered));
    let app = TestApp::spawn_with(Some(provider), &[]).await;

    let response = app
        .post_json(
            "/api/analyze-category",
            serde_json::json!({ "text": "something" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Error analyzing category: Content filtered");
}

#[tokio::test]
async fn citation_without_provider_is_a_server_error() {
    let app = TestApp::spawn_with(None, &[]).await;

    let response = app
        .post_json("/api/cite", serde_json::json!({ "citation": "15 usc 45" }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
}
