use crate::infra::{AppState, EligibilityView};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;
use study_eligibility::catalog::Catalog;
use study_eligibility::eligibility::{evaluate, StudentProfile};
use study_eligibility::error::AppError;
use tracing::info;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/catalog", get(catalog_endpoint))
        .route("/api/v1/catalog/reload", post(reload_endpoint))
        .route("/api/v1/eligibility", post(eligibility_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if !state.catalog.is_loaded() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        );
    }

    let catalog = state.catalog.snapshot();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "universities": catalog.len(),
            "loaded_at": catalog.loaded_at(),
        })),
    )
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint(Extension(state): Extension<AppState>) -> Json<Catalog> {
    Json(state.catalog.snapshot().as_ref().clone())
}

pub(crate) async fn reload_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let catalog = state.loader.load(&state.catalog_url).await?;
    let catalog = state.catalog.replace(catalog);
    info!(universities = catalog.len(), "catalog reloaded");

    Ok(Json(json!({
        "status": "reloaded",
        "source": catalog.source(),
        "universities": catalog.len(),
        "loaded_at": catalog.loaded_at(),
    })))
}

pub(crate) async fn eligibility_endpoint(
    Extension(state): Extension<AppState>,
    Json(profile): Json<StudentProfile>,
) -> Json<EligibilityView> {
    let catalog = state.catalog.snapshot();
    Json(EligibilityView::from(evaluate(&profile, catalog.universities())))
}
