//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectPlayerUseCase, DisconnectPlayerUseCase, GetGameSnapshotUseCase, SubmitMoveUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectPlayerUseCase（接続のユースケース）
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    /// DisconnectPlayerUseCase（切断のユースケース）
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    /// SubmitMoveUseCase（指し手のユースケース）
    pub submit_move_usecase: Arc<SubmitMoveUseCase>,
    /// GetGameSnapshotUseCase（対局状況取得のユースケース）
    pub get_game_snapshot_usecase: Arc<GetGameSnapshotUseCase>,
}
