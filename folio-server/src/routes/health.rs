//! Liveness probes with fixed JSON payloads.

use axum::Json;
use serde_json::{json, Value};

use folio_core::constants::APP_VERSION;

/// `GET /` - API banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Portfolio API is running!",
        "status": "healthy",
    }))
}

/// `GET /health` - liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "database": "connected",
        "version": APP_VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_payload() {
        let Json(body) = root().await;
        assert_eq!(body["status"], "healthy");
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn test_health_payload() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }
}
