//! HTTP API response DTOs.

use serde::Serialize;

use super::websocket::{GameOverPayload, PlayersPayload};

/// Snapshot of the single game room (`GET /api/game`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshotDto {
    pub fen: String,
    /// `"w"` or `"b"`
    pub turn: String,
    pub players: PlayersPayload,
    pub game_over: Option<GameOverPayload>,
    /// RFC 3339 (JST)
    pub started_at: Option<String>,
}
