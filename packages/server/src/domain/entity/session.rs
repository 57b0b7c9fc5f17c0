//! 座席管理（Session Registry）
//!
//! 接続ごとの座席割り当てを保持する状態機械。
//!
//! ```text
//! Unassigned --on_connect--> {White, Black, Spectator} --on_disconnect--> Closed
//! ```
//!
//! ## 不変条件
//!
//! - `White` を持つ接続は高々 1 つ、`Black` も高々 1 つ
//! - 匿名の接続は常に `Spectator`
//! - 割り当ては接続中に変化しない（途中での昇格・降格はない）
//!
//! 座席は先着順（White → Black）。再接続したユーザーが以前と同じ色になる保証はない。

use std::collections::HashMap;

use crate::domain::{
    error::RepositoryError,
    value_object::{ConnectionId, Identity, Seat, Timestamp},
};

/// 1 接続分の座席割り当て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatAssignment {
    pub connection_id: ConnectionId,
    pub seat: Seat,
    pub identity: Option<Identity>,
    pub connected_at: Timestamp,
}

/// 座席の占有状況（ブロードキャスト用の読み取り専用スナップショット）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// White 席のユーザーの email
    pub white: Option<String>,
    /// Black 席のユーザーの email
    pub black: Option<String>,
    pub spectators: usize,
}

/// 接続 → 座席 の対応表
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    assignments: HashMap<ConnectionId, SeatAssignment>,
    white: Option<ConnectionId>,
    black: Option<ConnectionId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい接続に座席を割り当てる
    ///
    /// 認証済みなら空いている White、次に Black。それ以外（満席・匿名）は Spectator。
    ///
    /// # Errors
    ///
    /// 同じ接続 ID が既に登録されている場合は `RepositoryError::DuplicateConnection`。
    /// 既存の割り当ては変更されない。
    pub fn on_connect(
        &mut self,
        connection_id: ConnectionId,
        identity: Option<Identity>,
        connected_at: Timestamp,
    ) -> Result<Seat, RepositoryError> {
        if self.assignments.contains_key(&connection_id) {
            return Err(RepositoryError::DuplicateConnection(
                connection_id.to_string(),
            ));
        }

        let seat = match identity {
            Some(_) if self.white.is_none() => {
                self.white = Some(connection_id);
                Seat::White
            }
            Some(_) if self.black.is_none() => {
                self.black = Some(connection_id);
                Seat::Black
            }
            _ => Seat::Spectator,
        };

        self.assignments.insert(
            connection_id,
            SeatAssignment {
                connection_id,
                seat,
                identity,
                connected_at,
            },
        );

        Ok(seat)
    }

    /// 接続を取り除き、プレイヤー席なら空ける
    ///
    /// 未登録（または既に取り除かれた）接続に対しては何もしない。
    pub fn on_disconnect(&mut self, connection_id: &ConnectionId) -> Option<SeatAssignment> {
        let assignment = self.assignments.remove(connection_id)?;

        match assignment.seat {
            Seat::White if self.white == Some(*connection_id) => self.white = None,
            Seat::Black if self.black == Some(*connection_id) => self.black = None,
            _ => {}
        }

        Some(assignment)
    }

    pub fn seat_of(&self, connection_id: &ConnectionId) -> Option<Seat> {
        self.assignments.get(connection_id).map(|a| a.seat)
    }

    /// 現在の座席状況を射影する
    pub fn roster_snapshot(&self) -> Roster {
        let email_of = |seat: Option<ConnectionId>| {
            seat.and_then(|id| self.assignments.get(&id))
                .and_then(|a| a.identity.as_ref())
                .map(|identity| identity.email().to_string())
        };

        Roster {
            white: email_of(self.white),
            black: email_of(self.black),
            spectators: self
                .assignments
                .values()
                .filter(|a| a.seat == Seat::Spectator)
                .count(),
        }
    }

    /// 接続中の全ての接続 ID（接続時刻順）
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        let mut assignments: Vec<&SeatAssignment> = self.assignments.values().collect();
        assignments.sort_by_key(|a| a.connected_at);
        assignments.into_iter().map(|a| a.connection_id).collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
