use axum::Json;
use axum::extract::State;
use serde::Serialize;

use winter_core::game_registry::GameId;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub games: Vec<GameId>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        games: state.registry.ids().collect(),
    })
}
