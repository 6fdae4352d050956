use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    services::{metrics::get_metrics, providers::ProviderError},
    startup::AppState,
};

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "legalease-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Ready only when a generation provider is configured and answers its health check.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(provider) = state.assistant.provider() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "reason": "no AI provider configured"
            })),
        );
    };

    let timeout = state.config.genai.request_timeout();
    let check = match tokio::time::timeout(timeout, provider.health_check()).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::timed_out(timeout)),
    };

    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "provider": provider.name(),
                "model": provider.model()
            })),
        ),
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "Provider health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "reason": format!("AI provider unhealthy: {}", e)
                })),
            )
        }
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        get_metrics(),
    )
}
