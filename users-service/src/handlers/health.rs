//! Health check handler

use axum::Json;
use chrono::Utc;

use crate::models::HealthResponse;

/// Liveness check
///
/// Always answers `{"status": "ok"}` with the current server time.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let before = Utc::now();
        let Json(response) = health().await;
        assert_eq!(response.status, "ok");
        assert!(response.time >= before);
    }
}
