pub mod game_loop;
pub mod room;
pub mod room_registry;
pub mod simulation;
pub mod state;

pub use room::{JoinOutcome, LeaveOutcome, Room, Slot};
pub use room_registry::{RoomRegistry, SharedRoom};
pub use state::GameState;
