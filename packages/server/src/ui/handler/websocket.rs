//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, header},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, MoveDescriptor},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::{MoveApplied, SubmitMoveError, SubmitMoveUseCase},
};

/// Cookie carrying the identity token
const TOKEN_COOKIE: &str = "token";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = token_from_cookies(&headers);
    let connection_id = ConnectionId::generate();
    tracing::debug!(
        "Upgrading connection '{}' (token: {})",
        connection_id,
        if token.is_some() { "present" } else { "absent" }
    );

    // 座席の割り当てはアップグレード成功後に行う
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, token))
}

/// Extract the `token` cookie value from the request headers.
fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for events addressed to this connection
/// * `sender` - WebSocket sink to send messages to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Runs one move submission on its own task.
///
/// Aborting the receive loop only drops the handle, so an accepted move is
/// always broadcast.
fn spawn_submit(
    usecase: Arc<SubmitMoveUseCase>,
    connection_id: ConnectionId,
    mv: MoveDescriptor,
) -> JoinHandle<Result<MoveApplied, SubmitMoveError>> {
    tokio::spawn(async move { usecase.execute(connection_id, mv).await })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    token: Option<String>,
) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // 送信タスクを先に起動し、接続処理で積まれたイベントをそのまま流す
    let mut send_task = pusher_loop(rx, sender);

    if let Err(e) = state
        .connect_player_usecase
        .execute(connection_id, token.as_deref(), tx)
        .await
    {
        tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
        send_task.abort();
        return;
    }

    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let parsed = serde_json::from_str::<ClientMessage>(text.as_str());
                    let mv: MoveDescriptor = match parsed {
                        Ok(ClientMessage::Move(payload)) => payload.into(),
                        Err(e) => {
                            tracing::debug!(
                                "Ignoring unparseable frame from '{}': {}",
                                connection_id,
                                e
                            );
                            continue;
                        }
                    };
                    // 結果の通知はユースケース内で送信済み
                    let _ = spawn_submit(
                        state_for_recv.submit_move_usecase.clone(),
                        connection_id,
                        mv,
                    )
                    .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_player_usecase
        .execute(connection_id)
        .await;
    tracing::info!(
        "Connection '{}' closed, {} remaining",
        connection_id,
        state
            .disconnect_player_usecase
            .count_remaining_connections()
            .await
    );
}
