//! UseCase: 対局状況のスナップショット取得

use std::sync::Arc;

use crate::domain::{
    GameOver, GameStateRepository, Roster, RulesEngine, SessionRepository, Side, Timestamp,
};

use super::{RoomLock, error::SnapshotError};

/// ある時点の対局状況
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub fen: String,
    pub side_to_move: Side,
    pub roster: Roster,
    pub game_over: Option<GameOver>,
    pub started_at: Timestamp,
}

/// スナップショット取得のユースケース
pub struct GetGameSnapshotUseCase {
    session_repository: Arc<dyn SessionRepository>,
    game_repository: Arc<dyn GameStateRepository>,
    rules: Arc<dyn RulesEngine>,
    room_lock: RoomLock,
}

impl GetGameSnapshotUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        game_repository: Arc<dyn GameStateRepository>,
        rules: Arc<dyn RulesEngine>,
        room_lock: RoomLock,
    ) -> Self {
        Self {
            session_repository,
            game_repository,
            rules,
            room_lock,
        }
    }

    /// 盤面と座席状況を同じ時点で読み出す
    pub async fn execute(&self) -> Result<GameSnapshot, SnapshotError> {
        let _room = self.room_lock.lock().await;

        let state = self.game_repository.current().await;
        let side_to_move = self
            .rules
            .side_to_move(&state)
            .map_err(|e| SnapshotError::Engine(e.to_string()))?;
        let game_over = self
            .rules
            .terminal_status(&state)
            .map_err(|e| SnapshotError::Engine(e.to_string()))?;

        Ok(GameSnapshot {
            fen: state.fen().to_string(),
            side_to_move,
            roster: self.session_repository.roster().await,
            game_over,
            started_at: self.game_repository.started_at().await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{GameState, MockRulesEngine, MoveDescriptor, RulesError},
        usecase::test_support::TestRoom,
    };

    #[tokio::test]
    async fn test_snapshot_of_fresh_room() {
        // テスト項目: 開始直後のスナップショットは初期局面・White の手番・空席
        // given (前提条件):
        let room = TestRoom::new();

        // when (操作):
        let snapshot = room.snapshot.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(
            snapshot.fen,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(snapshot.side_to_move, Side::White);
        assert_eq!(snapshot.roster, Roster::default());
        assert_eq!(snapshot.game_over, None);
        assert_eq!(snapshot.started_at, Timestamp::new(1_000));
    }

    #[tokio::test]
    async fn test_snapshot_reflects_moves_and_seats() {
        // テスト項目: 指し手と座席状況がスナップショットに反映される
        // given (前提条件):
        let room = TestRoom::new();
        let (alice, _, _rx_a) = room.join(Some("alice@x.com")).await;
        room.join(Some("bob@x.com")).await;
        room.join(None).await;
        room.submit_move
            .execute(alice, MoveDescriptor::new("e2", "e4", None))
            .await
            .unwrap();

        // when (操作):
        let snapshot = room.snapshot.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.side_to_move, Side::Black);
        assert_eq!(snapshot.roster.white.as_deref(), Some("alice@x.com"));
        assert_eq!(snapshot.roster.black.as_deref(), Some("bob@x.com"));
        assert_eq!(snapshot.roster.spectators, 1);
    }

    #[tokio::test]
    async fn test_snapshot_engine_error() {
        // テスト項目: ルールエンジンのエラーはスナップショットのエラーになる
        // given (前提条件):
        let mut rules = MockRulesEngine::new();
        rules
            .expect_initial_state()
            .returning(|| GameState::new("garbage", vec![]));
        rules
            .expect_side_to_move()
            .returning(|_| Err(RulesError::CorruptState("garbage".to_string())));
        let room = TestRoom::with_rules(Arc::new(rules));

        // when (操作):
        let result = room.snapshot.execute().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SnapshotError::Engine(
                "corrupt game state: garbage".to_string()
            ))
        );
    }
}
