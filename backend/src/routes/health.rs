use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: String,
}

/// Health check endpoint
///
/// Used for monitoring and deployment verification.
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
