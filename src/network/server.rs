use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::network::commands::{CommandProcessor, ConnectionCommand};
use crate::network::connection::ConnectionHandler;
use crate::network::connection_manager::ConnectionManager;
use crate::network::gateway::SessionGateway;

pub struct WebsocketServer {
    address: String,
}

impl WebsocketServer {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let listener = TcpListener::bind(&self.address).await?;
        info!("Listening on {}", self.address);

        let (cmd_sender, mut cmd_receiver) = mpsc::unbounded_channel::<ConnectionCommand>();

        // Single task owns every outbound sink.
        tokio::spawn(async move {
            let mut manager = ConnectionManager::new();
            while let Some(command) = cmd_receiver.recv().await {
                CommandProcessor::process_command(command, &mut manager).await;
            }
        });

        let gateway = Arc::new(SessionGateway::new(cmd_sender.clone()));

        while let Ok((stream, addr)) = listener.accept().await {
            let connection_id = Uuid::new_v4().to_string();
            info!("New connection {} from {}", connection_id, addr);

            let gateway = gateway.clone();
            let cmd_sender = cmd_sender.clone();
            tokio::spawn(async move {
                if let Err(err) =
                    ConnectionHandler::handle_connection(stream, connection_id, gateway, cmd_sender)
                        .await
                {
                    error!("Error handling connection: {}", err);
                }
            });
        }

        Ok(())
    }
}
