use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameStateSnapshot, PlayerId, RoomId};

/// Frames sent by a client. Disconnection is not a frame; the gateway
/// reports it when the socket closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
#[ts(export)]
pub enum ClientMessage {
    FindMatch,
    CancelMatch,
    UpdateGuess(GuessPayload),
    SubmitGuess(GuessPayload),
    NewRound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessPayload {
    pub guess: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
#[ts(export)]
pub enum ServerMessage {
    WaitingForOpponent,
    MatchFound(MatchFound),
    GameStart(GameStart),
    GameUpdate(GameStateSnapshot),
    GameOver(GameOver),
    OpponentDisconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MatchFound {
    pub room_id: RoomId,
    pub opponent_id: PlayerId,
    pub your_id: PlayerId,
}

/// Word length is chosen per round; clients size their board from this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameStart {
    pub target_word_length: u32,
    pub game_state: GameStateSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameOver {
    /// `None` on a draw.
    pub winner_id: Option<PlayerId>,
    pub target_word: String,
    pub game_state: GameStateSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_client_message_wire_names() {
        let find: ClientMessage = serde_json::from_str(r#"{"type":"findMatch"}"#).unwrap();
        assert_eq!(find, ClientMessage::FindMatch);

        let submit: ClientMessage =
            serde_json::from_str(r#"{"type":"submitGuess","payload":{"guess":"שולחן"}}"#).unwrap();
        assert_eq!(
            submit,
            ClientMessage::SubmitGuess(GuessPayload {
                guess: "שולחן".to_string()
            })
        );

        let update: ClientMessage =
            serde_json::from_str(r#"{"type":"updateGuess","payload":{"guess":""}}"#).unwrap();
        assert!(matches!(update, ClientMessage::UpdateGuess(_)));
    }

    #[test]
    fn test_unknown_client_message_is_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"leaveGame"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_server_message_payload_shape() {
        let your_id = uuid::Uuid::new_v4();
        let opponent_id = uuid::Uuid::new_v4();
        let message = ServerMessage::MatchFound(MatchFound {
            room_id: "room-1".to_string(),
            opponent_id,
            your_id,
        });

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "matchFound");
        assert_eq!(value["payload"]["roomId"], "room-1");
        assert_eq!(value["payload"]["yourId"], your_id.to_string());
        assert_eq!(value["payload"]["opponentId"], opponent_id.to_string());
    }

    #[test]
    fn test_game_over_draw_has_null_winner() {
        let message = ServerMessage::GameOver(GameOver {
            winner_id: None,
            target_word: "ספרים".to_string(),
            game_state: GameStateSnapshot {
                players: HashMap::new(),
                game_started: true,
                is_game_over: true,
            },
        });

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "gameOver");
        assert!(value["payload"]["winnerId"].is_null());
        assert_eq!(value["payload"]["gameState"]["isGameOver"], true);
    }

    #[test]
    fn test_unit_server_message_has_no_payload() {
        let value = serde_json::to_value(&ServerMessage::OpponentDisconnected).unwrap();
        assert_eq!(value["type"], "opponentDisconnected");
        assert!(value.get("payload").is_none());
    }
}
