//! Integration tests for the HTTP API.
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use prism_engine::application::services::{DEFAULT_SOURCE_TIMEOUT, SignalCollector};
use prism_engine::application::use_cases::{ProbabilityEngine, initialize_catalog};
use prism_engine::domain::risk_catalog::seed_risks;
use prism_engine::infrastructure::http::{AppState, create_router};
use prism_engine::infrastructure::persistence::InMemoryStore;
use prism_engine::infrastructure::signals::{SIMULATED_SOURCE_NAMES, build_sources};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let store = Arc::new(InMemoryStore::new());
    initialize_catalog(store.as_ref(), &seed_risks().unwrap())
        .await
        .unwrap();
    let sources = build_sources(&SIMULATED_SOURCE_NAMES, "Global").unwrap();
    let engine = Arc::new(ProbabilityEngine::new(
        Arc::clone(&store),
        SignalCollector::new(sources, DEFAULT_SOURCE_TIMEOUT),
    ));
    create_router(AppState::new(store, engine))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn close(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|v| (v - expected).abs() < 0.005)
}

#[tokio::test]
async fn test_health_reports_store_contents() {
    let app = app().await;

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["risks_loaded"], 13);
    assert_eq!(body["total_updates"], 0);
    assert_eq!(body["total_signals"], 0);
}

#[tokio::test]
async fn test_update_then_query_live_state() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Request::post("/api/probabilities/update")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["result"]["risks_updated"], 6);
    assert_eq!(body["result"]["signals_collected"], 4);

    let (status, risk) = get(&app, "/api/risks/D1.1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(close(&risk["probability_live"], 63.25));
    assert!(close(&risk["change_from_baseline"], 8.25));
    assert!(close(&risk["change_percent"], 15.0));
    assert_eq!(risk["update_count"], 1);

    let (_, listing) = get(&app, "/api/risks/live").await;
    assert_eq!(listing["total_count"], 13);
    assert_eq!(listing["risks"][0]["id"], "D1.1");

    let (_, history) = get(&app, "/api/risks/D1.1/history?limit=5").await;
    assert_eq!(history["total_updates"], 1);
    let update_id = history["updates"][0]["id"].as_str().unwrap().to_string();

    let (status, audit) = get(&app, &format!("/api/audit/{update_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audit["risk_id"], "D1.1");
    assert_eq!(audit["data_sources_checked"].as_array().unwrap().len(), 5);

    let (_, signals) = get(&app, "/api/signals/recent?hours=1").await;
    assert_eq!(signals["total_count"], 4);
    assert_eq!(signals["time_range_hours"], 1);
    assert_eq!(signals["by_source"][0]["source"], "CISA");

    let (_, sources) = get(&app, "/api/data-sources").await;
    assert_eq!(sources["sources"].as_array().unwrap().len(), 5);
    assert_eq!(sources["sources"][4]["name"], "USGS");
    assert_eq!(sources["sources"][4]["recent_signals"], 0);
}

#[tokio::test]
async fn test_domains_cover_all_four() {
    let app = app().await;

    let (status, body) = get(&app, "/api/domains").await;

    assert_eq!(status, StatusCode::OK);
    let domains = body["domains"].as_array().unwrap();
    assert_eq!(domains.len(), 4);
    let total: u64 = domains
        .iter()
        .map(|d| d["risk_count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 13);
}

#[tokio::test]
async fn test_calculate_reference_example() {
    let app = app().await;
    let request = json!({
        "client_data": {
            "client_name": "Acme Manufacturing",
            "industry": "Manufacturing",
            "processes": [
                {"id": "P1", "name": "Production", "criticality_eur_per_day": 100000.0}
            ],
            "assessments": [
                {"process_id": "P1", "risk_id": "P1.1", "vulnerability": 50.0, "resilience": 20.0}
            ]
        }
    });

    let (status, body) = post_json(&app, "/api/calculate", &request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(close(&body["exposures"][0]["base_exposure_eur"], 1_752_000.0));
    assert!(close(&body["summary"]["total_overall_exposure"], 1_752_000.0));
    assert_eq!(body["client_name"], "Acme Manufacturing");
}

#[tokio::test]
async fn test_calculate_rejects_malformed_body() {
    let app = app().await;

    let (status, body) = post_json(&app, "/api/calculate", &json!({"client_data": {}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_upload_validation() {
    let app = app().await;
    let document = json!({
        "client_name": "Acme",
        "industry": "Chemicals",
        "processes": [{"id": "P1"}, {"id": "P2"}],
        "assessments": [{"process_id": "P1"}]
    });

    let (status, body) = post_json(&app, "/api/upload", &document).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["processes_count"], 2);
    assert_eq!(body["assessments_count"], 1);

    let (status, body) =
        post_json(&app, "/api/upload", &json!({"client_name": "Acme"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "industry");

    let (status, _) = send(
        &app,
        Request::post("/api/upload")
            .body(Body::from("not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_not_found_errors_carry_codes() {
    let app = app().await;

    let (status, body) = get(&app, "/api/risks/Z9.9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RISK_NOT_FOUND");

    let (status, body) = get(&app, "/api/audit/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UPDATE_NOT_FOUND");
}

#[tokio::test]
async fn test_huge_signal_window_covers_all_history() {
    let app = app().await;
    send(
        &app,
        Request::post("/api/probabilities/update")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let (status, body) = get(&app, "/api/signals/recent?hours=4000000000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 4);
    assert_eq!(body["time_range_hours"], 4_000_000_000_u64);
}
