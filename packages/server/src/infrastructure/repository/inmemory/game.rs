//! InMemory Game State Repository 実装（Game State Holder）

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{GameState, GameStateRepository, Timestamp};

/// 唯一の対局状態をメモリ上に保持する
pub struct InMemoryGameStateRepository {
    state: RwLock<GameState>,
    started_at: Timestamp,
}

impl InMemoryGameStateRepository {
    pub fn new(initial: GameState, started_at: Timestamp) -> Self {
        Self {
            state: RwLock::new(initial),
            started_at,
        }
    }
}

#[async_trait]
impl GameStateRepository for InMemoryGameStateRepository {
    async fn current(&self) -> GameState {
        self.state.read().await.clone()
    }

    async fn replace(&self, state: GameState) {
        *self.state.write().await = state;
    }

    async fn started_at(&self) -> Timestamp {
        self.started_at
    }
}
