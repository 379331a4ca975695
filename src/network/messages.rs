use serde::{Deserialize, Serialize};

use crate::game::simulation::TickEvent;
use crate::game::state::GameState;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessage {
    Ping,
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        #[serde(default)]
        room_id: Option<String>,
    },
    PaddleMove {
        y: f64,
    },
    StartGame,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub enum ServerEvent {
    Pong,
    #[serde(rename_all = "camelCase")]
    PlayerAssigned {
        player_number: u8,
        room_id: String,
    },
    #[serde(rename_all = "camelCase")]
    PlayerJoined {
        player_number: u8,
        players_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        player_number: u8,
        players_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    RoomFull {
        room_id: String,
    },
    GameReady(GameState),
    GameStarted(GameState),
    #[serde(rename = "gameState")]
    Snapshot(GameState),
    PaddleHit {
        player: u8,
        x: f64,
        y: f64,
    },
    WallHit {
        x: f64,
        y: f64,
    },
    Score {
        player: u8,
        score: u32,
    },
    GameOver {
        winner: u8,
    },
}

impl From<TickEvent> for ServerEvent {
    fn from(event: TickEvent) -> Self {
        match event {
            TickEvent::WallHit { x, y } => ServerEvent::WallHit { x, y },
            TickEvent::PaddleHit { player, x, y } => ServerEvent::PaddleHit { player, x, y },
            TickEvent::Scored { player, score } => ServerEvent::Score { player, score },
            TickEvent::GameOver { winner } => ServerEvent::GameOver { winner },
        }
    }
}

pub fn deserialize_message(json: &str) -> Result<ClientMessage, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn serialize_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_join_room_with_identifier() {
        let message = deserialize_message(r#"{"joinRoom":{"roomId":"AB12CD"}}"#).unwrap();

        match message {
            ClientMessage::JoinRoom { room_id } => assert_eq!(room_id.as_deref(), Some("AB12CD")),
            other => panic!("Expected JoinRoom, got {:?}", other),
        }
    }

    #[test]
    fn deserialize_join_room_without_identifier() {
        let message = deserialize_message(r#"{"joinRoom":{}}"#).unwrap();
        assert!(matches!(message, ClientMessage::JoinRoom { room_id: None }));

        let message = deserialize_message(r#"{"joinRoom":{"roomId":null}}"#).unwrap();
        assert!(matches!(message, ClientMessage::JoinRoom { room_id: None }));
    }

    #[test]
    fn deserialize_paddle_move() {
        let message = deserialize_message(r#"{"paddleMove":{"y":182.5}}"#).unwrap();

        match message {
            ClientMessage::PaddleMove { y } => assert_eq!(y, 182.5),
            other => panic!("Expected PaddleMove, got {:?}", other),
        }
    }

    #[test]
    fn deserialize_unit_messages() {
        assert!(matches!(
            deserialize_message(r#""startGame""#).unwrap(),
            ClientMessage::StartGame
        ));
        assert!(matches!(
            deserialize_message(r#""ping""#).unwrap(),
            ClientMessage::Ping
        ));
    }

    #[test]
    fn deserialize_rejects_unknown_messages() {
        assert!(deserialize_message(r#"{"launchMissiles":{}}"#).is_err());
        assert!(deserialize_message("not even json").is_err());
    }

    #[test]
    fn serialize_player_assigned_uses_wire_names() {
        let json = serialize_event(&ServerEvent::PlayerAssigned {
            player_number: 1,
            room_id: "AB12CD".to_string(),
        })
        .unwrap();

        assert_eq!(
            json,
            r#"{"playerAssigned":{"playerNumber":1,"roomId":"AB12CD"}}"#
        );
    }

    #[test]
    fn serialize_room_full() {
        let json = serialize_event(&ServerEvent::RoomFull {
            room_id: "AB12CD".to_string(),
        })
        .unwrap();

        assert_eq!(json, r#"{"roomFull":{"roomId":"AB12CD"}}"#);
    }

    #[test]
    fn serialize_score_and_game_over() {
        let json = serialize_event(&ServerEvent::Score { player: 2, score: 3 }).unwrap();
        assert_eq!(json, r#"{"score":{"player":2,"score":3}}"#);

        let json = serialize_event(&ServerEvent::GameOver { winner: 1 }).unwrap();
        assert_eq!(json, r#"{"gameOver":{"winner":1}}"#);
    }

    #[test]
    fn serialize_snapshot_carries_the_full_game_state() {
        let json = serialize_event(&ServerEvent::Snapshot(GameState::new())).unwrap();

        assert!(json.starts_with(r#"{"gameState":"#));
        assert!(json.contains(r#""ball":{"x":400.0"#));
        assert!(json.contains(r#""paddle1""#));
        assert!(json.contains(r#""paddle2""#));
        assert!(json.contains(r#""gameRunning":false"#));
        assert!(json.contains(r#""winner":null"#));
    }

    #[test]
    fn serialize_pong() {
        assert_eq!(serialize_event(&ServerEvent::Pong).unwrap(), r#""pong""#);
    }

    #[test]
    fn tick_events_map_onto_wire_events() {
        let event = ServerEvent::from(TickEvent::Scored {
            player: 1,
            score: 4,
        });
        assert!(matches!(
            event,
            ServerEvent::Score {
                player: 1,
                score: 4
            }
        ));

        let event = ServerEvent::from(TickEvent::GameOver { winner: 2 });
        assert!(matches!(event, ServerEvent::GameOver { winner: 2 }));
    }
}
