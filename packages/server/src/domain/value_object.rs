//! Value Object 定義
//!
//! 接続 ID・認証済みユーザー・座席・手番・指し手など、
//! 不変で値として比較されるドメインの概念。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 1 本の WebSocket 接続を表す不透明な ID
///
/// 接続の生存期間中だけ存在する。Transport 層が生成し、Domain はその参照だけを保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix タイムスタンプ（JST, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 認証済みユーザー
///
/// 署名付きトークンから接続ごとに一度だけ導出され、接続中は変化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
    email: String,
    name: Option<String>,
}

impl Identity {
    /// 新しい Identity を作成
    ///
    /// # Errors
    ///
    /// * `ValueObjectError::EmptyUserId` - user_id が空
    /// * `ValueObjectError::InvalidEmail` - email に `@` が含まれない
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        name: Option<String>,
    ) -> Result<Self, ValueObjectError> {
        let user_id = user_id.into();
        let email = email.into();

        if user_id.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        if !email.contains('@') {
            return Err(ValueObjectError::InvalidEmail(email));
        }

        Ok(Self {
            user_id,
            email,
            name,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// 手番（どちらの色が指すか）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// ワイヤ上の短い表記（`"w"` / `"b"`）
    pub fn as_code(self) -> &'static str {
        match self {
            Side::White => "w",
            Side::Black => "b",
        }
    }

    /// 表示用の名前（`"White"` / `"Black"`）
    pub fn as_label(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// 接続に割り当てられる座席
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    White,
    Black,
    Spectator,
}

impl Seat {
    /// プレイヤー席なら対応する手番を返す（観戦者は `None`）
    pub fn side(self) -> Option<Side> {
        match self {
            Seat::White => Some(Side::White),
            Seat::Black => Some(Side::Black),
            Seat::Spectator => None,
        }
    }
}

/// クライアントから送られる指し手
///
/// 合法性の判断はルールエンジンに委ねるため、ここでは文字列のまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDescriptor {
    pub from: String,
    pub to: String,
    pub promotion: Option<String>,
}

impl MoveDescriptor {
    pub fn new(from: impl Into<String>, to: impl Into<String>, promotion: Option<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            promotion,
        }
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = &self.promotion {
            write!(f, "={promotion}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_new_valid() {
        // テスト項目: 正しい user_id と email で Identity が作成できる
        // given (前提条件):
        let user_id = "u-1";
        let email = "alice@x.com";

        // when (操作):
        let result = Identity::new(user_id, email, Some("Alice".to_string()));

        // then (期待する結果):
        let identity = result.unwrap();
        assert_eq!(identity.user_id(), "u-1");
        assert_eq!(identity.email(), "alice@x.com");
        assert_eq!(identity.name(), Some("Alice"));
    }

    #[test]
    fn test_identity_new_rejects_empty_user_id() {
        // テスト項目: 空の user_id は拒否される
        // given (前提条件):
        let user_id = "  ";

        // when (操作):
        let result = Identity::new(user_id, "alice@x.com", None);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyUserId));
    }

    #[test]
    fn test_identity_new_rejects_invalid_email() {
        // テスト項目: `@` を含まない email は拒否される
        // given (前提条件):
        let email = "alice";

        // when (操作):
        let result = Identity::new("u-1", email, None);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidEmail("alice".to_string()))
        );
    }

    #[test]
    fn test_side_codes_and_opposite() {
        // テスト項目: 手番の表記と反転が正しい
        // given (前提条件):
        let white = Side::White;

        // when (操作):
        let black = white.opposite();

        // then (期待する結果):
        assert_eq!(white.as_code(), "w");
        assert_eq!(black.as_code(), "b");
        assert_eq!(black.as_label(), "Black");
        assert_eq!(black.opposite(), Side::White);
    }

    #[test]
    fn test_seat_side() {
        // テスト項目: プレイヤー席だけが手番を持つ
        // given (前提条件):
        let seats = [Seat::White, Seat::Black, Seat::Spectator];

        // when (操作):
        let sides: Vec<Option<Side>> = seats.iter().map(|s| s.side()).collect();

        // then (期待する結果):
        assert_eq!(sides, vec![Some(Side::White), Some(Side::Black), None]);
    }

    #[test]
    fn test_move_descriptor_display() {
        // テスト項目: 指し手がログ用に整形される
        // given (前提条件):
        let plain = MoveDescriptor::new("e2", "e4", None);
        let promotion = MoveDescriptor::new("a7", "a8", Some("q".to_string()));

        // when (操作):
        let plain_str = plain.to_string();
        let promotion_str = promotion.to_string();

        // then (期待する結果):
        assert_eq!(plain_str, "e2e4");
        assert_eq!(promotion_str, "a7a8=q");
    }
}
