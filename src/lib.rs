pub mod errors;
pub mod game;
pub mod network;

// Re-export commonly used items for convenience
pub use errors::{AppError, AppResult};
pub use game::room::{JoinOutcome, Room};
pub use game::room_registry::RoomRegistry;
pub use network::gateway::SessionGateway;
pub use network::server::WebsocketServer;
