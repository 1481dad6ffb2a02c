use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use slot_gateway::config::Config;
use slot_gateway::domain::RawSlotRecord;
use slot_gateway::error::{GatewayError, Result};
use slot_gateway::router::app_router;
use slot_gateway::state::AppState;
use slot_gateway::upstream::{mock_slot_listings, SlotSource};

/// Serves the same payload as the mock upstream route, without going over
/// the network.
struct FixtureSource;

#[async_trait]
impl SlotSource for FixtureSource {
    async fn fetch_slots(&self) -> Result<Vec<RawSlotRecord>> {
        Ok(mock_slot_listings())
    }
}

/// Simulates an unreachable or misbehaving upstream.
struct BrokenSource;

#[async_trait]
impl SlotSource for BrokenSource {
    async fn fetch_slots(&self) -> Result<Vec<RawSlotRecord>> {
        Err(GatewayError::Config("upstream unreachable".to_string()))
    }
}

fn test_state() -> AppState {
    AppState {
        source: Arc::new(FixtureSource),
        config: Arc::new(Config {
            port: 0,
            upstream_url: "http://127.0.0.1:0".to_string(),
            api_keys: vec!["abc123".to_string(), "xyz789".to_string()],
        }),
    }
}

async fn get(uri: &str, api_key: Option<&str>) -> (StatusCode, Value) {
    let app = app_router(test_state());

    let mut builder = Request::builder().uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn missing_api_key_is_rejected() {
    let (status, body) = get("/api/available-slots", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_API_KEY");
    assert_eq!(body["error"], "API key is required");
}

#[tokio::test]
async fn unknown_api_key_is_rejected_with_distinct_code() {
    let (status, body) = get("/api/available-slots", Some("nope")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_API_KEY");
}

#[tokio::test]
async fn returns_paginated_envelope_over_normalized_fixture() {
    let (status, body) = get("/api/available-slots", Some("abc123")).await;

    assert_eq!(status, StatusCode::OK);
    // The 12-record fixture normalizes to 13 canonical slots; default
    // page/limit is 1/10
    assert_eq!(body["total"], 13);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    // First entry comes from the first fixture record, order preserved
    assert_eq!(
        body["data"][0],
        serde_json::json!({
            "date": "2025-07-20",
            "start_time": "09:00",
            "provider": "Dr. Smith",
        })
    );
}

#[tokio::test]
async fn second_page_holds_the_remainder() {
    let (status, body) = get("/api/available-slots?page=2", Some("abc123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 13);
    assert_eq!(body["page"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn provider_filter_is_case_insensitive() {
    let (status, body) = get("/api/available-slots?provider=dr.%20lee", Some("abc123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    for slot in body["data"].as_array().unwrap() {
        assert_eq!(slot["provider"], "Dr. Lee");
    }
}

#[tokio::test]
async fn date_filter_matches_converted_dates() {
    let (status, body) = get("/api/available-slots?date=2025-07-21", Some("abc123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    for slot in body["data"].as_array().unwrap() {
        assert_eq!(slot["date"], "2025-07-21");
    }
}

#[tokio::test]
async fn slash_formatted_date_filter_is_a_client_error() {
    let (status, body) = get("/api/available-slots?date=2025%2F07%2F21", Some("abc123")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE");
    assert_eq!(body["error"], "Invalid date format. Use YYYY-MM-DD");
}

#[tokio::test]
async fn non_positive_pagination_is_a_client_error() {
    for uri in [
        "/api/available-slots?page=0",
        "/api/available-slots?limit=0",
        "/api/available-slots?page=-1",
        "/api/available-slots?limit=abc",
    ] {
        let (status, body) = get(uri, Some("abc123")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {uri}");
        assert_eq!(body["code"], "INVALID_PAGINATION");
    }
}

#[tokio::test]
async fn non_utf8_api_key_is_invalid_not_missing() {
    let app = app_router(test_state());

    let request = Request::builder()
        .uri("/api/available-slots")
        .header("X-API-Key", HeaderValue::from_bytes(&[0xFF]).unwrap())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_API_KEY");
}

#[tokio::test]
async fn upstream_failure_maps_to_generic_server_error() {
    let state = AppState {
        source: Arc::new(BrokenSource),
        config: test_state().config,
    };
    let app = app_router(state);

    let request = Request::builder()
        .uri("/api/available-slots")
        .header("X-API-Key", "abc123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // The cause stays server-side; the body carries only the generic message
    assert_eq!(
        body,
        serde_json::json!({ "error": "Internal server error", "code": "SERVER_ERROR" })
    );
}

#[tokio::test]
async fn mock_upstream_route_is_open_and_serves_the_fixture() {
    let (status, body) = get("/mock-external-api/slots", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 12);
}
