//! サーバーからクライアントへ送るイベント
//!
//! ワイヤ形式（JSON）への変換は Infrastructure 層の DTO が担う。

use super::{
    entity::Roster,
    rules::GameOver,
    value_object::{MoveDescriptor, Side},
};

/// 指し手が拒否された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// 観戦者または未登録の接続
    NotPlayer,
    /// 手番ではない
    NotYourTurn,
    /// ルール上不正な手
    Illegal,
    /// ルールエンジンの内部エラー
    Error,
}

impl MoveRejection {
    /// ワイヤ上の理由コード
    pub fn as_code(self) -> &'static str {
        match self {
            MoveRejection::NotPlayer => "not-player",
            MoveRejection::NotYourTurn => "not-your-turn",
            MoveRejection::Illegal => "illegal",
            MoveRejection::Error => "error",
        }
    }
}

/// サーバー → クライアントのイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// プレイヤー席に座った（接続時に 1 回だけ）
    PlayerRole(Side),
    /// 観戦者になった（接続時に 1 回だけ）
    SpectatorRole,
    /// 現在の盤面（FEN）
    BoardState(String),
    /// 受理された指し手のエコー
    Move(MoveDescriptor),
    /// 指し手の拒否（送信者のみに送る）
    InvalidMove(MoveRejection),
    /// 終局
    GameOver(GameOver),
    /// 座席状況の更新
    PlayersUpdate(Roster),
}

impl GameEvent {
    /// ログ用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PlayerRole(_) => "playerRole",
            GameEvent::SpectatorRole => "spectatorRole",
            GameEvent::BoardState(_) => "boardState",
            GameEvent::Move(_) => "move",
            GameEvent::InvalidMove(_) => "InvalidMove",
            GameEvent::GameOver(_) => "gameOver",
            GameEvent::PlayersUpdate(_) => "playersUpdate",
        }
    }
}
