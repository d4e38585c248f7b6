// Health check endpoint handler

use axum::Json;
use serde::Serialize;

// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    status: String,
}

// Handler for GET /health
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}
