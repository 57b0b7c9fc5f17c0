//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{GameState, Roster, SeatAssignment},
    error::RepositoryError,
    value_object::{ConnectionId, Identity, Seat, Timestamp},
};

/// Session Repository trait
///
/// 座席割り当て（Session Registry）へのアクセス。各操作は不可分に実行される。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 接続に座席を割り当てる
    async fn assign_seat(
        &self,
        connection_id: ConnectionId,
        identity: Option<Identity>,
        connected_at: Timestamp,
    ) -> Result<Seat, RepositoryError>;

    /// 接続を取り除き、座席を解放する（2 回目以降は `None`）
    async fn release_seat(&self, connection_id: &ConnectionId) -> Option<SeatAssignment>;

    /// 接続の座席を取得
    async fn seat_of(&self, connection_id: &ConnectionId) -> Option<Seat>;

    /// 座席状況のスナップショットを取得
    async fn roster(&self) -> Roster;

    /// 接続中の全ての接続 ID を取得
    async fn get_all_connection_ids(&self) -> Vec<ConnectionId>;

    /// 接続数を取得
    async fn count_connections(&self) -> usize;
}

/// Game State Repository trait（Game State Holder）
///
/// 唯一の対局状態を保持する。書き込みは指し手のユースケースからのみ行う。
#[async_trait]
pub trait GameStateRepository: Send + Sync {
    /// 現在の対局状態を取得
    async fn current(&self) -> GameState;

    /// 対局状態を置き換える
    async fn replace(&self, state: GameState);

    /// 対局の開始時刻
    async fn started_at(&self) -> Timestamp;
}
