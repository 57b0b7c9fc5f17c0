//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのイベント送信（通知）の抽象化。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::GameEvent, value_object::ConnectionId};

/// クライアントへの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信の trait
///
/// 送信は fire-and-forget で、配送確認や再送は行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントに送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &GameEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントに送信（一部の送信失敗は許容する）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &GameEvent,
    ) -> Result<(), MessagePushError>;
}
