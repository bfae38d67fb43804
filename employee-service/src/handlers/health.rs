use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "employee-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.employees.ping().await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        AppError::ServiceUnavailable
    })?;

    Ok(Json(json!({ "status": "ready" })))
}
