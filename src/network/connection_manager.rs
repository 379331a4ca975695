use futures_util::{stream::SplitSink, SinkExt};
use log::{debug, info};
use std::collections::HashMap;
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, WebSocketStream};

use crate::errors::{AppError, AppResult};

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;

/// Owns every live websocket sink, keyed by connection id. Only the command
/// processor task touches it, so sends never race.
pub struct ConnectionManager {
    connections: HashMap<String, WsSink>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    pub fn add_connection(&mut self, id: String, sender: WsSink) {
        info!("Registered connection {}", id);
        self.connections.insert(id, sender);
    }

    pub fn remove_connection(&mut self, id: &str) {
        if self.connections.remove(id).is_some() {
            info!("Removed connection {}", id);
        }
    }

    pub async fn send_to_player(&mut self, connection_id: &str, message: &str) -> AppResult<()> {
        let sender =
            self.connections
                .get_mut(connection_id)
                .ok_or_else(|| AppError::ConnectionNotFound {
                    connection_id: connection_id.to_string(),
                })?;

        sender
            .send(Message::Text(message.to_string()))
            .await
            .map_err(|_| AppError::MessageSendFailed {
                connection_id: connection_id.to_string(),
            })?;
        Ok(())
    }

    /// Best-effort fan-out; connections whose sends fail are pruned.
    pub async fn send_to_many(&mut self, connection_ids: &[String], message: &str) {
        let mut failed_connections = Vec::new();

        for connection_id in connection_ids {
            let Some(sender) = self.connections.get_mut(connection_id) else {
                continue;
            };
            if let Err(err) = sender.send(Message::Text(message.to_string())).await {
                debug!("Failed to send to connection {}: {}", connection_id, err);
                failed_connections.push(connection_id.clone());
            }
        }

        for connection_id in failed_connections {
            self.remove_connection(&connection_id);
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
