use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::game::room::Room;

pub type SharedRoom = Arc<Mutex<Room>>;

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ROOM_CODE_LEN: usize = 6;

/// Process-wide room table. Rooms are created on first reference and live
/// until their slot list empties; creation never fails.
pub struct RoomRegistry {
    rooms: DashMap<String, SharedRoom>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Returns the room for `requested`, creating it if unknown. With no
    /// identifier (or a blank one), synthesizes a fresh short code. The
    /// entry API keeps check-and-create atomic under concurrent first-joins.
    pub fn resolve(&self, requested: Option<String>) -> (String, SharedRoom) {
        match requested.filter(|id| !id.trim().is_empty()) {
            Some(room_id) => {
                let room = self
                    .rooms
                    .entry(room_id.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(Room::new(room_id.clone()))))
                    .clone();
                (room_id, room)
            }
            None => loop {
                let room_id = generate_room_code(&mut rand::rng());
                if let Entry::Vacant(vacant) = self.rooms.entry(room_id.clone()) {
                    let room = Arc::new(Mutex::new(Room::new(room_id.clone())));
                    vacant.insert(room.clone());
                    break (room_id, room);
                }
            },
        }
    }

    pub fn get(&self, room_id: &str) -> Option<SharedRoom> {
        self.rooms.get(room_id).map(|entry| entry.value().clone())
    }

    /// Drops a room from the table. Callers must have observed an empty slot
    /// list under the room's own lock.
    pub fn release(&self, room_id: &str) {
        self.rooms.remove(room_id);
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Short, human-transcribable match code.
fn generate_room_code<R: Rng>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}
