//! Health check endpoints

use axum::Json;

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Queen Cell API running" }))
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "queen-cloud",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
