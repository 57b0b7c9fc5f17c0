//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame of the form `{"type": <event>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// `"w"` or `"b"`
    #[serde(rename = "playerRole")]
    PlayerRole(String),
    #[serde(rename = "spectatorRole")]
    SpectatorRole,
    /// FEN of the current position
    #[serde(rename = "boardState")]
    BoardState(String),
    #[serde(rename = "move")]
    Move(MovePayload),
    /// `not-player`, `not-your-turn`, `illegal` or `error`
    #[serde(rename = "InvalidMove")]
    InvalidMove(String),
    #[serde(rename = "gameOver")]
    GameOver(GameOverPayload),
    #[serde(rename = "playersUpdate")]
    PlayersUpdate(PlayersPayload),
}

/// Client → server events
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "move")]
    Move(MovePayload),
}

/// Move descriptor, e.g. `{"from":"e2","to":"e4","promotion":"q"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverPayload {
    pub is_game_over: bool,
    pub reason: String,
    /// `"White"` or `"Black"`, checkmate only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerInfo {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayersPayload {
    pub white: Option<PlayerInfo>,
    pub black: Option<PlayerInfo>,
    pub spectators: usize,
}
