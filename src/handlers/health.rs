use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /healthz, open to unauthenticated callers.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
