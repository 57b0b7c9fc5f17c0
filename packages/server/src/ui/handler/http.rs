//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use kibitz_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::http::GameSnapshotDto, ui::state::AppState, usecase::GameSnapshot,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the current game snapshot
pub async fn get_game(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GameSnapshotDto>, StatusCode> {
    match state.get_game_snapshot_usecase.execute().await {
        Ok(snapshot) => Ok(Json(to_dto(snapshot))),
        Err(e) => {
            tracing::error!("Failed to read game snapshot: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Clear the identity cookie
pub async fn logout() -> impl IntoResponse {
    (
        [(
            header::SET_COOKIE,
            "token=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        )],
        Json(serde_json::json!({"ok": true})),
    )
}

// Domain Model から DTO への変換
fn to_dto(snapshot: GameSnapshot) -> GameSnapshotDto {
    GameSnapshotDto {
        fen: snapshot.fen,
        turn: snapshot.side_to_move.as_code().to_string(),
        players: (&snapshot.roster).into(),
        game_over: snapshot.game_over.map(Into::into),
        started_at: timestamp_to_jst_rfc3339(snapshot.started_at.value()),
    }
}
