//! UseCase: 接続処理
//!
//! 1. 認証トークンから Identity を解決（失敗したら匿名）
//! 2. 座席を割り当て、送信チャンネルを登録
//! 3. 本人に座席（`playerRole` / `spectatorRole`）と現在の盤面（`boardState`）を送信
//! 4. 全員に座席状況（`playersUpdate`）をブロードキャスト

use std::sync::Arc;

use kibitz_shared::time::Clock;

use crate::domain::{
    ConnectionId, GameEvent, GameStateRepository, IdentityResolver, MessagePusher,
    PusherChannel, RepositoryError, Seat, SessionRepository, Timestamp,
};

use super::{RoomLock, broadcast_roster, error::ConnectError};

/// 接続のユースケース
pub struct ConnectPlayerUseCase {
    identity_resolver: Arc<dyn IdentityResolver>,
    session_repository: Arc<dyn SessionRepository>,
    game_repository: Arc<dyn GameStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    room_lock: RoomLock,
}

impl ConnectPlayerUseCase {
    pub fn new(
        identity_resolver: Arc<dyn IdentityResolver>,
        session_repository: Arc<dyn SessionRepository>,
        game_repository: Arc<dyn GameStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        room_lock: RoomLock,
    ) -> Self {
        Self {
            identity_resolver,
            session_repository,
            game_repository,
            message_pusher,
            clock,
            room_lock,
        }
    }

    /// 接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `token` - cookie `token` の値（なければ `None`）
    /// * `sender` - クライアントへの送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Seat)` - 割り当てられた座席
    /// * `Err(ConnectError)` - 接続 ID が重複している
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        token: Option<&str>,
        sender: PusherChannel,
    ) -> Result<Seat, ConnectError> {
        let identity = self.identity_resolver.resolve(token);
        let connected_at = Timestamp::new(self.clock.now_jst_millis());
        let email = identity.as_ref().map(|i| i.email().to_string());

        let _room = self.room_lock.lock().await;

        let seat = self
            .session_repository
            .assign_seat(connection_id, identity, connected_at)
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
            })?;
        tracing::info!(
            "Connection '{}' ({}) seated as {:?}",
            connection_id,
            email.as_deref().unwrap_or("anonymous"),
            seat
        );

        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        let role = match seat.side() {
            Some(side) => GameEvent::PlayerRole(side),
            None => GameEvent::SpectatorRole,
        };
        self.push(&connection_id, &role).await;

        // ロック下で読むので、この後に届く move より古い盤面になることはない
        let board = self.game_repository.current().await;
        self.push(&connection_id, &GameEvent::BoardState(board.fen().to_string()))
            .await;

        broadcast_roster(
            self.session_repository.as_ref(),
            self.message_pusher.as_ref(),
        )
        .await;

        Ok(seat)
    }

    async fn push(&self, connection_id: &ConnectionId, event: &GameEvent) {
        if let Err(e) = self.message_pusher.push_to(connection_id, event).await {
            tracing::warn!(
                "Failed to send '{}' to '{}': {}",
                event.name(),
                connection_id,
                e
            );
        }
    }
}
