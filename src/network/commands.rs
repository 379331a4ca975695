use futures_util::stream::SplitSink;
use log::debug;
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, WebSocketStream};

use crate::network::connection_manager::ConnectionManager;

#[derive(Debug)]
pub enum ConnectionCommand {
    AddConnection {
        id: String,
        sender: SplitSink<WebSocketStream<TcpStream>, Message>,
    },
    RemoveConnection {
        id: String,
    },
    SendToPlayer {
        connection_id: String,
        message: String,
    },
    SendToRoom {
        connections: Vec<String>,
        message: String,
    },
}

pub struct CommandProcessor;

impl CommandProcessor {
    pub async fn process_command(command: ConnectionCommand, manager: &mut ConnectionManager) {
        match command {
            ConnectionCommand::AddConnection { id, sender } => {
                manager.add_connection(id, sender);
            }
            ConnectionCommand::RemoveConnection { id } => {
                manager.remove_connection(&id);
            }
            ConnectionCommand::SendToPlayer {
                connection_id,
                message,
            } => {
                // A vanished recipient is a leave that already happened.
                if let Err(err) = manager.send_to_player(&connection_id, &message).await {
                    debug!("Dropping message for {}: {}", connection_id, err);
                }
            }
            ConnectionCommand::SendToRoom {
                connections,
                message,
            } => {
                manager.send_to_many(&connections, &message).await;
            }
        }
    }
}
