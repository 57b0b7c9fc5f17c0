//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::MoveRejection;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// 指し手の拒否・失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitMoveError {
    /// 観戦者または未登録の接続
    #[error("connection is not seated as a player")]
    NotPlayer,

    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("illegal move")]
    Illegal,

    /// ルールエンジンの内部エラー（状態は変更されない）
    #[error("move could not be processed: {0}")]
    Engine(String),
}

impl SubmitMoveError {
    /// 送信者に通知する拒否理由
    pub fn rejection(&self) -> MoveRejection {
        match self {
            SubmitMoveError::NotPlayer => MoveRejection::NotPlayer,
            SubmitMoveError::NotYourTurn => MoveRejection::NotYourTurn,
            SubmitMoveError::Illegal => MoveRejection::Illegal,
            SubmitMoveError::Engine(_) => MoveRejection::Error,
        }
    }
}

/// スナップショット取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("game state could not be read: {0}")]
    Engine(String),
}
