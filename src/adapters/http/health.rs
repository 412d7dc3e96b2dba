//! Liveness check.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// State for the health endpoint.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// Display name of the active provider, e.g. `Claude`.
    pub provider_label: &'static str,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
}

/// GET / - Report liveness and the active provider.
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: format!("AMW Chatbot Server - {} API", state.provider_label),
    })
}

/// Creates the health route.
pub fn health_routes() -> Router<HealthState> {
    Router::new().route("/", get(health_check))
}
