pub mod commands;
pub mod connection;
pub mod connection_manager;
pub mod gateway;
pub mod handler;
pub mod messages;
pub mod server;

pub use commands::ConnectionCommand;
pub use connection::ConnectionHandler;
pub use gateway::SessionGateway;
pub use handler::MessageHandler;
pub use server::WebsocketServer;
