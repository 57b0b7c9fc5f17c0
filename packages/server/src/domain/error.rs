//! Domain 層のエラー型

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 同じ接続 ID が既に登録されている
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    Encode(String),
}

/// ルールエンジンの内部エラー
///
/// 不正な手（illegal move）はエラーではなく `MoveOutcome::Rejected` で表す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// 保持している盤面が解釈できない
    #[error("corrupt game state: {0}")]
    CorruptState(String),

    #[error("rules engine failure: {0}")]
    Engine(String),
}
