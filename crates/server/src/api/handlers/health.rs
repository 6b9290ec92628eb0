use axum::Json;

use crate::error::AppError;

/// Readiness probe
#[utoipa::path(
    get,
    path = "/v1/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready")
    )
)]
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

/// Always fails, for exercising the error response shape
#[utoipa::path(
    get,
    path = "/v1/err",
    tag = "health",
    responses(
        (status = 400, description = "The standard error body")
    )
)]
pub async fn err() -> AppError {
    AppError::bad_request("Something went wrong")
}
