//! 対局状態（Game State）
//!
//! 唯一の対局の盤面。盤面の解釈はルールエンジンに委ね、ここでは
//! FEN と、千日手判定に必要な局面キーの履歴だけを保持する。

/// 共有される対局状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// 現在の局面（FEN）
    fen: String,
    /// 開始局面から現在までに現れた局面キー（現在の局面を含む）
    position_keys: Vec<String>,
}

impl GameState {
    pub fn new(fen: impl Into<String>, position_keys: Vec<String>) -> Self {
        Self {
            fen: fen.into(),
            position_keys,
        }
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn position_keys(&self) -> &[String] {
        &self.position_keys
    }

    /// 指定した局面キーが履歴に現れた回数
    pub fn occurrences(&self, key: &str) -> usize {
        self.position_keys.iter().filter(|k| k.as_str() == key).count()
    }

    /// 新しい局面に進めた状態を返す（自身は変更しない）
    pub fn advanced(&self, fen: impl Into<String>, key: impl Into<String>) -> Self {
        let mut position_keys = self.position_keys.clone();
        position_keys.push(key.into());
        Self {
            fen: fen.into(),
            position_keys,
        }
    }
}
