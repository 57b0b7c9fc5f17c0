//! shakmaty を使った RulesEngine 実装
//!
//! 盤面は FEN として保持し、指し手ごとに shakmaty の `Chess` に復元して検証する。
//! 千日手の判定には `GameState` の局面キー履歴を使う（局面キー = FEN の先頭 4 フィールド）。

use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role, Square, fen::Fen,
    uci::UciMove,
};

use crate::domain::{
    GameOver, GameOverReason, GameState, MoveDescriptor, MoveOutcome, RulesEngine, RulesError,
    Side,
};

/// 50 手ルール（半手数 100）
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// 同一局面 3 回で千日手
const REPETITION_LIMIT: usize = 3;

/// shakmaty による標準チェスのルールエンジン
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyRulesEngine;

impl ShakmatyRulesEngine {
    pub fn new() -> Self {
        Self
    }

    fn load(state: &GameState) -> Result<Chess, RulesError> {
        let fen: Fen = state
            .fen()
            .parse()
            .map_err(|e| RulesError::CorruptState(format!("{e}")))?;
        fen.into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::CorruptState(format!("{e}")))
    }

    fn fen_of(position: &Chess) -> String {
        Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
    }

    /// 千日手判定用の局面キー（配置・手番・キャスリング権・アンパッサン）
    fn position_key(fen: &str) -> String {
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }

    fn side_of(color: Color) -> Side {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    /// 終局判定（優先順: チェックメイト, ステイルメイト, 千日手, 駒不足, 50 手ルール）
    fn evaluate(position: &Chess, state: &GameState) -> Option<GameOver> {
        if position.is_checkmate() {
            // 手番側が詰んでいるので、直前に指した側の勝ち
            Some(GameOver::checkmate(Self::side_of(position.turn()).opposite()))
        } else if position.is_stalemate() {
            Some(GameOver::draw(GameOverReason::Stalemate))
        } else if state.occurrences(&Self::position_key(state.fen())) >= REPETITION_LIMIT {
            Some(GameOver::draw(GameOverReason::ThreefoldRepetition))
        } else if position.is_insufficient_material() {
            Some(GameOver::draw(GameOverReason::InsufficientMaterial))
        } else if position.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            Some(GameOver::draw(GameOverReason::Draw))
        } else {
            None
        }
    }

    /// `{from, to, promotion?}` を合法手に変換する
    ///
    /// クライアントは昇格しない手にも `promotion` を付けてくるため、
    /// 昇格付きで解釈できなければ昇格なしで解釈し直す。
    /// キャスリングはキングの 2 マス移動だけを受け付ける（`e1h1` は不可）。
    fn parse_move(position: &Chess, mv: &MoveDescriptor) -> Option<Move> {
        let from: Square = mv.from.parse().ok()?;
        let to: Square = mv.to.parse().ok()?;
        let hint = mv.promotion.as_deref().and_then(Self::promotion_role);

        let resolve = |promotion: Option<Role>| {
            UciMove::Normal {
                from,
                to,
                promotion,
            }
            .to_move(position)
            .ok()
            .filter(|m| {
                matches!(
                    m.to_uci(CastlingMode::Standard),
                    UciMove::Normal { from: f, to: t, .. } if f == from && t == to
                )
            })
        };

        match hint {
            Some(_) => resolve(hint).or_else(|| resolve(None)),
            None => resolve(None),
        }
    }

    /// 1 文字の昇格指定（`q`, `r`, `b`, `n`）。解釈できなければ指定なし扱い
    fn promotion_role(hint: &str) -> Option<Role> {
        let mut chars = hint.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Role::from_char(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

impl RulesEngine for ShakmatyRulesEngine {
    fn initial_state(&self) -> GameState {
        let fen = Self::fen_of(&Chess::default());
        let key = Self::position_key(&fen);
        GameState::new(fen, vec![key])
    }

    fn side_to_move(&self, state: &GameState) -> Result<Side, RulesError> {
        Ok(Self::side_of(Self::load(state)?.turn()))
    }

    fn apply_move(
        &self,
        state: &GameState,
        mv: &MoveDescriptor,
    ) -> Result<MoveOutcome, RulesError> {
        let position = Self::load(state)?;

        if Self::evaluate(&position, state).is_some() {
            tracing::debug!("Refusing move {} on a finished game", mv);
            return Ok(MoveOutcome::Rejected);
        }

        let Some(m) = Self::parse_move(&position, mv) else {
            return Ok(MoveOutcome::Rejected);
        };
        if !position.is_legal(&m) {
            return Ok(MoveOutcome::Rejected);
        }

        let next = position
            .play(&m)
            .map_err(|_| RulesError::Engine(format!("failed to play {mv}")))?;
        let fen = Self::fen_of(&next);
        let key = Self::position_key(&fen);
        let new_state = state.advanced(fen, key);
        let game_over = Self::evaluate(&next, &new_state);

        Ok(MoveOutcome::Accepted {
            new_state,
            game_over,
        })
    }

    fn terminal_status(&self, state: &GameState) -> Result<Option<GameOver>, RulesError> {
        let position = Self::load(state)?;
        Ok(Self::evaluate(&position, state))
    }
}
