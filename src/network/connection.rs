use futures_util::StreamExt;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use crate::errors::{AppError, AppResult};
use crate::network::commands::ConnectionCommand;
use crate::network::gateway::SessionGateway;
use crate::network::handler::MessageHandler;

pub struct ConnectionHandler;

impl ConnectionHandler {
    pub async fn handle_connection(
        stream: TcpStream,
        connection_id: String,
        gateway: Arc<SessionGateway>,
        cmd_sender: UnboundedSender<ConnectionCommand>,
    ) -> AppResult<()> {
        let ws_stream = accept_async(stream).await?;
        info!("WebSocket connection {} established", connection_id);

        let (ws_sender, mut ws_receiver) = ws_stream.split();

        cmd_sender
            .send(ConnectionCommand::AddConnection {
                id: connection_id.clone(),
                sender: ws_sender,
            })
            .map_err(|_| AppError::CommandChannelClosed)?;

        while let Some(incoming) = ws_receiver.next().await {
            let msg = match incoming {
                Ok(msg) => msg,
                Err(err) => {
                    warn!("Connection {} errored: {}", connection_id, err);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if let Err(err) =
                        MessageHandler::handle_text_message(&text, &connection_id, &gateway).await
                    {
                        error!("Error handling message from {}: {}", connection_id, err);
                    }
                }
                Message::Close(_) => {
                    debug!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }

        // Abrupt loss and graceful close take the same leave path.
        if let Err(err) = gateway.disconnect(&connection_id).await {
            error!("Error detaching connection {}: {}", connection_id, err);
        }
        let _ = cmd_sender.send(ConnectionCommand::RemoveConnection {
            id: connection_id.clone(),
        });

        info!("Connection {} closed", connection_id);
        Ok(())
    }
}
