use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check() -> Json<HealthResponse> {
        debug!("Health check requested");
        Json(HealthResponse { status: "ok" })
    }
}
