use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Connection '{connection_id}' not found")]
    ConnectionNotFound { connection_id: String },

    #[error("Failed to send message to connection '{connection_id}'")]
    MessageSendFailed { connection_id: String },

    #[error("Outbound command channel closed")]
    CommandChannelClosed,

    #[error("Failed to serialize outbound event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
