//! Domain 層
//!
//! 座席割り当て・手番・盤面状態のドメインモデルと、
//! Infrastructure 層が実装するインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod identity;
pub mod message_pusher;
pub mod repository;
pub mod rules;
pub mod value_object;

pub use entity::{GameState, Roster, SeatAssignment, SessionRegistry};
pub use error::{MessagePushError, RepositoryError, RulesError, ValueObjectError};
pub use event::{GameEvent, MoveRejection};
pub use identity::IdentityResolver;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{GameStateRepository, SessionRepository};
pub use rules::{GameOver, GameOverReason, MoveOutcome, RulesEngine};
pub use value_object::{ConnectionId, Identity, MoveDescriptor, Seat, Side, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use rules::MockRulesEngine;
