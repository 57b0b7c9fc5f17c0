//! InMemory Session Repository 実装
//!
//! `SessionRegistry` ドメインモデルを Mutex で保護して保持します。
//! 全ての操作はロック下で行われるため、切断による座席の解放は
//! 後続の座席割り当てより必ず先に反映されます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Identity, RepositoryError, Roster, Seat, SeatAssignment, SessionRegistry,
    SessionRepository, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    registry: Arc<Mutex<SessionRegistry>>,
}

impl InMemorySessionRepository {
    pub fn new(registry: Arc<Mutex<SessionRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(SessionRegistry::new())))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn assign_seat(
        &self,
        connection_id: ConnectionId,
        identity: Option<Identity>,
        connected_at: Timestamp,
    ) -> Result<Seat, RepositoryError> {
        let mut registry = self.registry.lock().await;
        registry.on_connect(connection_id, identity, connected_at)
    }

    async fn release_seat(&self, connection_id: &ConnectionId) -> Option<SeatAssignment> {
        let mut registry = self.registry.lock().await;
        registry.on_disconnect(connection_id)
    }

    async fn seat_of(&self, connection_id: &ConnectionId) -> Option<Seat> {
        let registry = self.registry.lock().await;
        registry.seat_of(connection_id)
    }

    async fn roster(&self) -> Roster {
        let registry = self.registry.lock().await;
        registry.roster_snapshot()
    }

    async fn get_all_connection_ids(&self) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.connection_ids()
    }

    async fn count_connections(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}
