use axum::Json;
use axum::extract::{Path, State};

use winter_core::game_registry::GameEntry;

use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/games`: the catalog in button order.
pub async fn list_games(State(state): State<AppState>) -> Json<Vec<GameEntry>> {
    Json(state.registry.entries().to_vec())
}

/// `GET /api/games/{id}`: one catalog entry, 404 for unknown ids.
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameEntry>, AppError> {
    let game = state.registry.resolve(&id)?;
    let entry = state
        .registry
        .get(game)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Game not registered: {game}")))?;
    Ok(Json(entry))
}
