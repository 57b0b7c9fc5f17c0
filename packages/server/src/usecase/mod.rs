//! UseCase 層
//!
//! 接続・切断・指し手・スナップショット取得のアプリケーションロジック。
//!
//! ## 排他制御
//!
//! ルームの状態を変える操作（座席の割り当て・解放、指し手の適用）は全て
//! `RoomLock` の下で直列に実行する。特に指し手は「座席確認 → 手番確認 →
//! ルール検証 → 状態の置き換え」を 1 つの不可分な単位として扱うため、
//! 同じ局面に対して 2 つの手が同時に手番チェックを通ることはない。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{GameEvent, MessagePusher, SessionRepository};

pub mod connect_player;
pub mod disconnect_player;
pub mod error;
pub mod get_game_snapshot;
pub mod submit_move;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_player::ConnectPlayerUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::{ConnectError, SnapshotError, SubmitMoveError};
pub use get_game_snapshot::{GameSnapshot, GetGameSnapshotUseCase};
pub use submit_move::{MoveApplied, SubmitMoveUseCase};

/// ルーム全体の排他ロック
pub type RoomLock = Arc<Mutex<()>>;

pub fn new_room_lock() -> RoomLock {
    Arc::new(Mutex::new(()))
}

/// 現在の座席状況を全ての接続にブロードキャスト
async fn broadcast_roster(
    session_repository: &dyn SessionRepository,
    message_pusher: &dyn MessagePusher,
) {
    let roster = session_repository.roster().await;
    let targets = session_repository.get_all_connection_ids().await;
    if let Err(e) = message_pusher
        .broadcast(targets, &GameEvent::PlayersUpdate(roster))
        .await
    {
        tracing::warn!("Failed to broadcast playersUpdate: {}", e);
    }
}
