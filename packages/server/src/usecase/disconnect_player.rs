//! UseCase: 切断処理
//!
//! 座席を解放して送信チャンネルを登録解除し、残りの全員に座席状況を送る。
//! 同じ接続に対する 2 回目以降の呼び出しは何もしない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, SeatAssignment, SessionRepository};

use super::{RoomLock, broadcast_roster};

/// 切断のユースケース
pub struct DisconnectPlayerUseCase {
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    room_lock: RoomLock,
}

impl DisconnectPlayerUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        room_lock: RoomLock,
    ) -> Self {
        Self {
            session_repository,
            message_pusher,
            room_lock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 解放した座席割り当て。未登録の接続なら `None`。
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<SeatAssignment> {
        let _room = self.room_lock.lock().await;

        let released = self.session_repository.release_seat(&connection_id).await;
        self.message_pusher.unregister_client(&connection_id).await;

        match &released {
            Some(assignment) => {
                tracing::info!(
                    "Connection '{}' left, {:?} seat released",
                    connection_id,
                    assignment.seat
                );
                broadcast_roster(
                    self.session_repository.as_ref(),
                    self.message_pusher.as_ref(),
                )
                .await;
            }
            None => {
                tracing::debug!("Connection '{}' was already removed", connection_id);
            }
        }

        released
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.session_repository.count_connections().await
    }
}
