//! UseCase テスト用のフィクスチャ

use std::sync::Arc;

use kibitz_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{
    ConnectPlayerUseCase, DisconnectPlayerUseCase, GetGameSnapshotUseCase, RoomLock,
    SubmitMoveUseCase, new_room_lock,
};
use crate::{
    domain::{
        ConnectionId, GameStateRepository, Identity, IdentityResolver, MessagePusher,
        RulesEngine, Seat, SessionRepository, Timestamp,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryGameStateRepository, InMemorySessionRepository},
        rules::ShakmatyRulesEngine,
    },
};

/// トークン文字列をそのまま email として扱う（`None` は匿名）
pub(crate) struct StubIdentityResolver;

impl IdentityResolver for StubIdentityResolver {
    fn resolve(&self, token: Option<&str>) -> Option<Identity> {
        let email = token?;
        Identity::new(format!("id-{email}"), email, None).ok()
    }
}

/// インメモリ実装で組み立てた 1 つのルーム
pub(crate) struct TestRoom {
    pub session_repository: Arc<dyn SessionRepository>,
    pub game_repository: Arc<dyn GameStateRepository>,
    pub connect: ConnectPlayerUseCase,
    pub disconnect: DisconnectPlayerUseCase,
    pub submit_move: Arc<SubmitMoveUseCase>,
    pub snapshot: GetGameSnapshotUseCase,
}

impl TestRoom {
    pub fn new() -> Self {
        Self::with_rules(Arc::new(ShakmatyRulesEngine::new()))
    }

    pub fn with_rules(rules: Arc<dyn RulesEngine>) -> Self {
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(InMemorySessionRepository::default());
        let game_repository: Arc<dyn GameStateRepository> = Arc::new(
            InMemoryGameStateRepository::new(rules.initial_state(), Timestamp::new(1_000)),
        );
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());
        let room_lock: RoomLock = new_room_lock();

        Self {
            connect: ConnectPlayerUseCase::new(
                Arc::new(StubIdentityResolver),
                session_repository.clone(),
                game_repository.clone(),
                message_pusher.clone(),
                Arc::new(FixedClock::new(1_000)),
                room_lock.clone(),
            ),
            disconnect: DisconnectPlayerUseCase::new(
                session_repository.clone(),
                message_pusher.clone(),
                room_lock.clone(),
            ),
            submit_move: Arc::new(SubmitMoveUseCase::new(
                session_repository.clone(),
                game_repository.clone(),
                rules.clone(),
                message_pusher.clone(),
                room_lock.clone(),
            )),
            snapshot: GetGameSnapshotUseCase::new(
                session_repository.clone(),
                game_repository.clone(),
                rules,
                room_lock,
            ),
            session_repository,
            game_repository,
        }
    }

    /// 新しい接続を参加させる
    pub async fn join(
        &self,
        token: Option<&str>,
    ) -> (ConnectionId, Seat, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        let seat = self
            .connect
            .execute(connection_id, token, tx)
            .await
            .unwrap();
        (connection_id, seat, rx)
    }
}

/// 受信済みのフレームを全て取り出して JSON として返す
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(text) = rx.try_recv() {
        frames.push(serde_json::from_str(&text).unwrap());
    }
    frames
}

/// 指定した type のフレームだけを取り出す
pub(crate) fn of_type<'a>(frames: &'a [Value], event: &str) -> Vec<&'a Value> {
    frames.iter().filter(|f| f["type"] == event).collect()
}
