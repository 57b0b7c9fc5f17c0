//! Conversion logic between DTOs and domain models.

use crate::domain::{GameEvent, GameOver, MoveDescriptor, Roster};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Model
// ========================================

impl From<dto::MovePayload> for MoveDescriptor {
    fn from(dto: dto::MovePayload) -> Self {
        MoveDescriptor::new(dto.from, dto.to, dto.promotion)
    }
}

// ========================================
// Domain Model → DTO
// ========================================

impl From<&MoveDescriptor> for dto::MovePayload {
    fn from(model: &MoveDescriptor) -> Self {
        Self {
            from: model.from.clone(),
            to: model.to.clone(),
            promotion: model.promotion.clone(),
        }
    }
}

impl From<&Roster> for dto::PlayersPayload {
    fn from(model: &Roster) -> Self {
        let player = |email: &Option<String>| {
            email.as_ref().map(|email| dto::PlayerInfo {
                email: email.clone(),
            })
        };
        Self {
            white: player(&model.white),
            black: player(&model.black),
            spectators: model.spectators,
        }
    }
}

impl From<GameOver> for dto::GameOverPayload {
    fn from(model: GameOver) -> Self {
        Self {
            is_game_over: true,
            reason: model.reason.as_str().to_string(),
            winner: model.winner.map(|side| side.as_label().to_string()),
        }
    }
}

impl From<&GameEvent> for dto::ServerMessage {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::PlayerRole(side) => Self::PlayerRole(side.as_code().to_string()),
            GameEvent::SpectatorRole => Self::SpectatorRole,
            GameEvent::BoardState(fen) => Self::BoardState(fen.clone()),
            GameEvent::Move(mv) => Self::Move(mv.into()),
            GameEvent::InvalidMove(rejection) => {
                Self::InvalidMove(rejection.as_code().to_string())
            }
            GameEvent::GameOver(game_over) => Self::GameOver((*game_over).into()),
            GameEvent::PlayersUpdate(roster) => Self::PlayersUpdate(roster.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameOverReason, MoveRejection, Side};
    use serde_json::json;

    fn encode(event: &GameEvent) -> serde_json::Value {
        serde_json::to_value(dto::ServerMessage::from(event)).unwrap()
    }

    #[test]
    fn test_role_events_to_json() {
        // テスト項目: 座席イベントがワイヤ形式に変換される
        // given (前提条件):
        let player = GameEvent::PlayerRole(Side::Black);
        let spectator = GameEvent::SpectatorRole;

        // when (操作):
        let player_json = encode(&player);
        let spectator_json = encode(&spectator);

        // then (期待する結果):
        assert_eq!(player_json, json!({"type": "playerRole", "data": "b"}));
        assert_eq!(spectator_json, json!({"type": "spectatorRole"}));
    }

    #[test]
    fn test_players_update_to_json() {
        // テスト項目: 座席状況が email オブジェクトと観戦者数に変換される
        // given (前提条件):
        let roster = Roster {
            white: Some("alice@x.com".to_string()),
            black: None,
            spectators: 2,
        };

        // when (操作):
        let value = encode(&GameEvent::PlayersUpdate(roster));

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "playersUpdate",
                "data": {"white": {"email": "alice@x.com"}, "black": null, "spectators": 2}
            })
        );
    }

    #[test]
    fn test_game_over_to_json() {
        // テスト項目: 終局イベントは勝者がいるときだけ winner を含む
        // given (前提条件):
        let checkmate = GameEvent::GameOver(GameOver::checkmate(Side::White));
        let stalemate = GameEvent::GameOver(GameOver::draw(GameOverReason::Stalemate));

        // when (操作):
        let checkmate_json = encode(&checkmate);
        let stalemate_json = encode(&stalemate);

        // then (期待する結果):
        assert_eq!(
            checkmate_json,
            json!({
                "type": "gameOver",
                "data": {"isGameOver": true, "reason": "checkmate", "winner": "White"}
            })
        );
        assert_eq!(
            stalemate_json,
            json!({"type": "gameOver", "data": {"isGameOver": true, "reason": "stalemate"}})
        );
    }

    #[test]
    fn test_invalid_move_to_json() {
        // テスト項目: 拒否理由がコード文字列に変換される
        // given (前提条件):
        let event = GameEvent::InvalidMove(MoveRejection::NotYourTurn);

        // when (操作):
        let value = encode(&event);

        // then (期待する結果):
        assert_eq!(value, json!({"type": "InvalidMove", "data": "not-your-turn"}));
    }

    #[test]
    fn test_client_move_from_json() {
        // テスト項目: クライアントの move イベントがドメインの指し手に変換される
        // given (前提条件):
        let text = r#"{"type":"move","data":{"from":"e2","to":"e4","promotion":"q"}}"#;

        // when (操作):
        let dto::ClientMessage::Move(payload) = serde_json::from_str(text).unwrap();
        let mv: MoveDescriptor = payload.into();

        // then (期待する結果):
        assert_eq!(mv, MoveDescriptor::new("e2", "e4", Some("q".to_string())));
    }
}
