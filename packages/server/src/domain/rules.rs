//! Rules Engine trait 定義
//!
//! 指し手の合法性判定と終局判定はルールエンジンに委ねる。
//! 本サーバーはチェスのルールを実装せず、この trait を満たす実装なら差し替え可能。

use super::{
    entity::GameState,
    error::RulesError,
    value_object::{MoveDescriptor, Side},
};

/// 終局の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    /// その他の引き分け（50 手ルールなど）
    Draw,
}

impl GameOverReason {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOverReason::Checkmate => "checkmate",
            GameOverReason::Stalemate => "stalemate",
            GameOverReason::ThreefoldRepetition => "threefold_repetition",
            GameOverReason::InsufficientMaterial => "insufficient_material",
            GameOverReason::Draw => "draw",
        }
    }
}

/// 終局情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub reason: GameOverReason,
    /// 勝者（チェックメイトのときのみ）
    pub winner: Option<Side>,
}

impl GameOver {
    pub fn checkmate(winner: Side) -> Self {
        Self {
            reason: GameOverReason::Checkmate,
            winner: Some(winner),
        }
    }

    pub fn draw(reason: GameOverReason) -> Self {
        Self {
            reason,
            winner: None,
        }
    }
}

/// 指し手の適用結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// 不正な手（終局後の手を含む）
    Rejected,
    /// 受理された手と、その結果の状態
    Accepted {
        new_state: GameState,
        game_over: Option<GameOver>,
    },
}

/// ルールエンジン
///
/// CPU バウンドで高速な同期処理を想定している。
#[cfg_attr(test, mockall::automock)]
pub trait RulesEngine: Send + Sync {
    /// 標準の開始局面
    fn initial_state(&self) -> GameState;

    /// 手番
    fn side_to_move(&self, state: &GameState) -> Result<Side, RulesError>;

    /// 指し手を適用する（`state` 自体は変更しない）
    ///
    /// 終局済みの局面では全ての手を `MoveOutcome::Rejected` とする。
    fn apply_move(
        &self,
        state: &GameState,
        mv: &MoveDescriptor,
    ) -> Result<MoveOutcome, RulesError>;

    /// 局面が終局していればその情報を返す
    fn terminal_status(&self, state: &GameState) -> Result<Option<GameOver>, RulesError>;
}
