//! UseCase: 指し手の処理
//!
//! 1. 送信者がプレイヤー席に座っているか確認
//! 2. 送信者の色が手番か確認
//! 3. ルールエンジンで合法性を検証
//! 4. 受理されたら対局状態を置き換え、全員に `move` / `boardState`（終局なら `gameOver`）を送信
//!
//! 拒否された場合は送信者にだけ `InvalidMove` を返し、状態は変更しない。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, GameEvent, GameOver, GameStateRepository, MessagePusher, MoveDescriptor,
    MoveOutcome, RulesEngine, SessionRepository,
};

use super::{RoomLock, error::SubmitMoveError};

/// 受理された指し手の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveApplied {
    pub fen: String,
    pub game_over: Option<GameOver>,
}

/// 指し手のユースケース
pub struct SubmitMoveUseCase {
    session_repository: Arc<dyn SessionRepository>,
    game_repository: Arc<dyn GameStateRepository>,
    rules: Arc<dyn RulesEngine>,
    message_pusher: Arc<dyn MessagePusher>,
    room_lock: RoomLock,
}

impl SubmitMoveUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        game_repository: Arc<dyn GameStateRepository>,
        rules: Arc<dyn RulesEngine>,
        message_pusher: Arc<dyn MessagePusher>,
        room_lock: RoomLock,
    ) -> Self {
        Self {
            session_repository,
            game_repository,
            rules,
            message_pusher,
            room_lock,
        }
    }

    /// 指し手を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `mv` - 指し手
    ///
    /// # Returns
    ///
    /// * `Ok(MoveApplied)` - 受理され、全員にブロードキャスト済み
    /// * `Err(SubmitMoveError)` - 拒否され、送信者に `InvalidMove` を送信済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        mv: MoveDescriptor,
    ) -> Result<MoveApplied, SubmitMoveError> {
        let _room = self.room_lock.lock().await;

        match self.apply(&connection_id, &mv).await {
            Ok(applied) => {
                tracing::info!("Move {} by '{}' accepted", mv, connection_id);
                self.broadcast_applied(&mv, &applied).await;
                Ok(applied)
            }
            Err(e) => {
                match &e {
                    SubmitMoveError::Engine(detail) => tracing::error!(
                        "Rules engine failed on {} by '{}': {}",
                        mv,
                        connection_id,
                        detail
                    ),
                    _ => tracing::debug!("Move {} by '{}' rejected: {}", mv, connection_id, e),
                }
                let event = GameEvent::InvalidMove(e.rejection());
                if let Err(push_err) = self.message_pusher.push_to(&connection_id, &event).await {
                    tracing::warn!(
                        "Failed to send 'InvalidMove' to '{}': {}",
                        connection_id,
                        push_err
                    );
                }
                Err(e)
            }
        }
    }

    /// 検証して状態を置き換える（ロック取得済みで呼ぶ）
    async fn apply(
        &self,
        connection_id: &ConnectionId,
        mv: &MoveDescriptor,
    ) -> Result<MoveApplied, SubmitMoveError> {
        let side = self
            .session_repository
            .seat_of(connection_id)
            .await
            .and_then(|seat| seat.side())
            .ok_or(SubmitMoveError::NotPlayer)?;

        let state = self.game_repository.current().await;
        let to_move = self
            .rules
            .side_to_move(&state)
            .map_err(|e| SubmitMoveError::Engine(e.to_string()))?;
        if to_move != side {
            return Err(SubmitMoveError::NotYourTurn);
        }

        let outcome = self
            .rules
            .apply_move(&state, mv)
            .map_err(|e| SubmitMoveError::Engine(e.to_string()))?;
        match outcome {
            MoveOutcome::Rejected => Err(SubmitMoveError::Illegal),
            MoveOutcome::Accepted {
                new_state,
                game_over,
            } => {
                let fen = new_state.fen().to_string();
                self.game_repository.replace(new_state).await;
                Ok(MoveApplied { fen, game_over })
            }
        }
    }

    async fn broadcast_applied(&self, mv: &MoveDescriptor, applied: &MoveApplied) {
        let targets = self.session_repository.get_all_connection_ids().await;

        let mut events = vec![
            GameEvent::Move(mv.clone()),
            GameEvent::BoardState(applied.fen.clone()),
        ];
        if let Some(game_over) = applied.game_over {
            tracing::info!(
                "Game over: {} (winner: {})",
                game_over.reason.as_str(),
                game_over.winner.map_or("none", |side| side.as_label())
            );
            events.push(GameEvent::GameOver(game_over));
        }

        for event in &events {
            if let Err(e) = self.message_pusher.broadcast(targets.clone(), event).await {
                tracing::warn!("Failed to broadcast '{}': {}", event.name(), e);
            }
        }
    }
}
