//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectPlayerUseCase, DisconnectPlayerUseCase, GetGameSnapshotUseCase, SubmitMoveUseCase,
};

use super::{
    handler::{get_game, health_check, logout, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chess server
///
/// Hosts a single game room. Every connection to `/ws` joins it.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_player_usecase,
///     disconnect_player_usecase,
///     submit_move_usecase,
///     get_game_snapshot_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectPlayerUseCase（接続のユースケース）
    connect_player_usecase: Arc<ConnectPlayerUseCase>,
    /// DisconnectPlayerUseCase（切断のユースケース）
    disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    /// SubmitMoveUseCase（指し手のユースケース）
    submit_move_usecase: Arc<SubmitMoveUseCase>,
    /// GetGameSnapshotUseCase（対局状況取得のユースケース）
    get_game_snapshot_usecase: Arc<GetGameSnapshotUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_player_usecase: Arc<ConnectPlayerUseCase>,
        disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
        submit_move_usecase: Arc<SubmitMoveUseCase>,
        get_game_snapshot_usecase: Arc<GetGameSnapshotUseCase>,
    ) -> Self {
        Self {
            connect_player_usecase,
            disconnect_player_usecase,
            submit_move_usecase,
            get_game_snapshot_usecase,
        }
    }

    /// Build the router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_player_usecase: self.connect_player_usecase,
            disconnect_player_usecase: self.disconnect_player_usecase,
            submit_move_usecase: self.submit_move_usecase,
            get_game_snapshot_usecase: self.get_game_snapshot_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/game", get(get_game))
            .route("/auth/logout", post(logout))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chess server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
