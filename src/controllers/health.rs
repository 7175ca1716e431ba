use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::config::Config;

pub const SERVICE_NAME: &str = "VoiceForge API";

/// GET / - Liveness
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": SERVICE_NAME,
            "status": "running",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /health - Reports whether the upstream URL is configured
pub async fn health(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let colab_status = if config.is_upstream_configured() {
        "configured"
    } else {
        "not configured"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "colab_url": colab_status
        })),
    )
}
