use log::debug;

use crate::errors::AppResult;
use crate::network::gateway::SessionGateway;
use crate::network::messages::{deserialize_message, ClientMessage};

pub struct MessageHandler;

impl MessageHandler {
    pub async fn handle_text_message(
        text: &str,
        connection_id: &str,
        gateway: &SessionGateway,
    ) -> AppResult<()> {
        let message = match deserialize_message(text) {
            Ok(message) => message,
            Err(err) => {
                // Malformed input is never surfaced back to the sender.
                debug!("Dropping malformed message from {}: {}", connection_id, err);
                return Ok(());
            }
        };

        match message {
            ClientMessage::Ping => gateway.ping(connection_id),
            ClientMessage::JoinRoom { room_id } => {
                gateway.join_room(connection_id, room_id).await
            }
            ClientMessage::PaddleMove { y } => {
                gateway.paddle_move(connection_id, y).await;
                Ok(())
            }
            ClientMessage::StartGame => gateway.start_game(connection_id).await,
        }
    }
}
