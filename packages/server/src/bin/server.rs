//! Real-time multiplayer chess server.
//!
//! Hosts a single game: the first two authenticated connections play White and
//! Black, everyone else spectates.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kibitz-server
//! cargo run --bin kibitz-server -- --host 0.0.0.0 --port 3000
//! JWT_SECRET=... cargo run --bin kibitz-server
//! ```

use std::sync::Arc;

use clap::Parser;
use kibitz_server::{
    domain::{RulesEngine, Timestamp},
    infrastructure::{
        identity::JwtIdentityResolver,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryGameStateRepository, InMemorySessionRepository},
        rules::ShakmatyRulesEngine,
    },
    ui::Server,
    usecase::{
        ConnectPlayerUseCase, DisconnectPlayerUseCase, GetGameSnapshotUseCase, SubmitMoveUseCase,
        new_room_lock,
    },
};
use kibitz_shared::{
    logger::setup_logger,
    time::{SystemClock, get_jst_timestamp},
};

/// Secret used when none is configured. Only suitable for local development.
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Parser, Debug)]
#[command(name = "kibitz-server")]
#[command(about = "Real-time multiplayer chess server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// HS256 secret used to verify identity tokens
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_env_values = true)]
    jwt_secret: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    if args.jwt_secret == DEV_JWT_SECRET {
        tracing::warn!("JWT_SECRET is not set, using the development secret");
    }

    // Initialize dependencies in order:
    // 1. Rules engine and repositories
    // 2. MessagePusher and IdentityResolver
    // 3. UseCases
    // 4. Server

    // 1. Rules engine and repositories (in-memory)
    let rules = Arc::new(ShakmatyRulesEngine::new());
    let session_repository = Arc::new(InMemorySessionRepository::default());
    let game_repository = Arc::new(InMemoryGameStateRepository::new(
        rules.initial_state(),
        Timestamp::new(get_jst_timestamp()),
    ));
    tracing::info!("New game started");

    // 2. MessagePusher (WebSocket) and IdentityResolver (JWT)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    let identity_resolver = Arc::new(JwtIdentityResolver::new(args.jwt_secret.as_bytes()));

    // 3. Create UseCases sharing one room lock
    let room_lock = new_room_lock();
    let connect_player_usecase = Arc::new(ConnectPlayerUseCase::new(
        identity_resolver,
        session_repository.clone(),
        game_repository.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
        room_lock.clone(),
    ));
    let disconnect_player_usecase = Arc::new(DisconnectPlayerUseCase::new(
        session_repository.clone(),
        message_pusher.clone(),
        room_lock.clone(),
    ));
    let submit_move_usecase = Arc::new(SubmitMoveUseCase::new(
        session_repository.clone(),
        game_repository.clone(),
        rules.clone(),
        message_pusher,
        room_lock.clone(),
    ));
    let get_game_snapshot_usecase = Arc::new(GetGameSnapshotUseCase::new(
        session_repository,
        game_repository,
        rules,
        room_lock,
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_player_usecase,
        disconnect_player_usecase,
        submit_move_usecase,
        get_game_snapshot_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
