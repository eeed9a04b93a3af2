//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::application::dto::{
    CalculationRequestDto, CalculationResponseDto, DataSourcesDto, DomainsDto, HealthDto,
    LiveRiskDto, RecentSignalsDto, RiskHistoryDto, RiskListDto, UploadSummaryDto,
};
use crate::application::ports::StorePort;
use crate::application::use_cases::{
    CalculateExposureUseCase, ProbabilityEngine, RiskQueryUseCase, validate_client_upload,
};
use crate::domain::live_probability::ProbabilityUpdate;
use crate::domain::shared::{RiskId, UpdateId};
use crate::error::EngineError;

use super::request::{HistoryQuery, SignalWindowQuery};
use super::response::{ExportTemplateResponse, ProbabilityUpdateResponse, RootResponse};

type ApiResult<T> = Result<Json<T>, EngineError>;

/// Application state shared across handlers.
pub struct AppState<S>
where
    S: StorePort,
{
    /// Live probability engine.
    pub engine: Arc<ProbabilityEngine<S>>,
    /// Exposure calculation use case.
    pub calculate: Arc<CalculateExposureUseCase<S>>,
    /// Read-side queries.
    pub queries: Arc<RiskQueryUseCase<S>>,
    /// Application version.
    pub version: String,
}

impl<S> AppState<S>
where
    S: StorePort,
{
    /// Wire every use case onto one store.
    pub fn new(store: Arc<S>, engine: Arc<ProbabilityEngine<S>>) -> Self {
        let sources = engine.sources();
        Self {
            calculate: Arc::new(CalculateExposureUseCase::new(Arc::clone(&store))),
            queries: Arc::new(RiskQueryUseCase::new(store, sources)),
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl<S> Clone for AppState<S>
where
    S: StorePort,
{
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            calculate: Arc::clone(&self.calculate),
            queries: Arc::clone(&self.queries),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: StorePort + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/risks", get(list_risks))
        .route("/api/risks/live", get(list_risks))
        .route("/api/risks/{id}", get(get_risk))
        .route("/api/risks/{id}/history", get(risk_history))
        .route("/api/signals/recent", get(recent_signals))
        .route("/api/probabilities/update", post(trigger_update))
        .route("/api/audit/{id}", get(audit_record))
        .route("/api/domains", get(domains))
        .route("/api/calculate", post(calculate))
        .route("/api/upload", post(upload))
        .route("/api/export", get(export_template))
        .route("/api/data-sources", get(data_sources))
        .with_state(state)
}

async fn root<S: StorePort>(State(state): State<AppState<S>>) -> Json<RootResponse> {
    Json(RootResponse::new(&state.version))
}

async fn health_check<S: StorePort>(State(state): State<AppState<S>>) -> ApiResult<HealthDto> {
    Ok(Json(state.queries.health().await?))
}

async fn list_risks<S: StorePort>(State(state): State<AppState<S>>) -> ApiResult<RiskListDto> {
    Ok(Json(state.queries.list_live_risks().await?))
}

async fn get_risk<S: StorePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<LiveRiskDto> {
    Ok(Json(state.queries.get_risk(&RiskId::new(id)).await?))
}

async fn risk_history<S: StorePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<RiskHistoryDto> {
    Ok(Json(
        state
            .queries
            .risk_history(&RiskId::new(id), query.limit)
            .await?,
    ))
}

async fn recent_signals<S: StorePort>(
    State(state): State<AppState<S>>,
    Query(query): Query<SignalWindowQuery>,
) -> ApiResult<RecentSignalsDto> {
    Ok(Json(state.queries.recent_signals(query.hours).await?))
}

async fn trigger_update<S: StorePort>(
    State(state): State<AppState<S>>,
) -> ApiResult<ProbabilityUpdateResponse> {
    let summary = state.engine.update_all_probabilities().await?;
    Ok(Json(summary.into()))
}

async fn audit_record<S: StorePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<ProbabilityUpdate> {
    Ok(Json(state.queries.audit_record(&UpdateId::new(id)).await?))
}

async fn domains<S: StorePort>(State(state): State<AppState<S>>) -> ApiResult<DomainsDto> {
    Ok(Json(state.queries.domain_statistics().await?))
}

async fn calculate<S: StorePort>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CalculationRequestDto>, JsonRejection>,
) -> ApiResult<CalculationResponseDto> {
    let Json(request) = payload.map_err(|e| EngineError::invalid_request(e.body_text()))?;
    Ok(Json(state.calculate.execute(request).await?))
}

async fn upload(body: Bytes) -> ApiResult<UploadSummaryDto> {
    Ok(Json(validate_client_upload(&body)?))
}

async fn export_template() -> Json<ExportTemplateResponse> {
    Json(ExportTemplateResponse::default())
}

async fn data_sources<S: StorePort>(
    State(state): State<AppState<S>>,
) -> ApiResult<DataSourcesDto> {
    Ok(Json(state.queries.data_sources().await?))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::application::services::{DEFAULT_SOURCE_TIMEOUT, SignalCollector};
    use crate::domain::risk_catalog::seed_risks;
    use crate::infrastructure::persistence::InMemoryStore;

    async fn router() -> Router {
        let store = Arc::new(InMemoryStore::new());
        for risk in seed_risks().unwrap() {
            store.put_risk(&risk).await.unwrap();
        }
        let engine = Arc::new(ProbabilityEngine::new(
            Arc::clone(&store),
            SignalCollector::new(vec![], DEFAULT_SOURCE_TIMEOUT),
        ));
        create_router(AppState::new(store, engine))
    }

    async fn get_status(uri: &str) -> StatusCode {
        router()
            .await
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn root_names_service() {
        let response = router()
            .await
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let root: RootResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(root.name, "PRISM Brain API");
    }

    #[tokio::test]
    async fn export_lists_report_sheets() {
        let response = router()
            .await
            .oneshot(Request::get("/api/export").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let export: ExportTemplateResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(export.template_structure.len(), 5);
        assert_eq!(export.template_structure[2].sheet, "Cascading Analysis");
    }

    #[tokio::test]
    async fn unknown_risk_is_404() {
        assert_eq!(get_status("/api/risks/Z9.9").await, StatusCode::NOT_FOUND);
        assert_eq!(
            get_status("/api/risks/Z9.9/history").await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status("/api/audit/nope").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn live_route_is_not_an_id() {
        assert_eq!(get_status("/api/risks/live").await, StatusCode::OK);
        assert_eq!(get_status("/api/risks/D1.1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_calculation_is_400() {
        let response = router()
            .await
            .oneshot(
                Request::post("/api/calculate")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"client_data\": 1}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
