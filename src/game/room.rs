use rand::Rng;
use std::time::Instant;

use crate::game::simulation::{self, TickEvent, REFERENCE_TICK_MS};
use crate::game::state::{GameState, COURT_HEIGHT, PADDLE_HEIGHT};

/// A room's claim on one of the two player identities.
#[derive(Debug, Clone)]
pub struct Slot {
    pub player_number: u8,
    pub connection_id: String,
}

#[derive(Debug, PartialEq)]
pub enum JoinOutcome {
    Joined {
        player_number: u8,
        players_count: usize,
        room_ready: bool,
    },
    Full,
}

#[derive(Debug, PartialEq)]
pub struct LeaveOutcome {
    pub player_number: u8,
    pub players_count: usize,
}

/// One match: authoritative state plus its two player slots.
#[derive(Debug)]
pub struct Room {
    id: String,
    slots: Vec<Slot>,
    state: GameState,
    last_tick: Instant,
}

impl Room {
    pub const MAX_PLAYERS: usize = 2;

    pub fn new(id: String) -> Self {
        Self {
            id,
            slots: Vec::new(),
            state: GameState::new(),
            last_tick: Instant::now(),
        }
    }

    /// Claims a slot for `connection_id`. The first live slot is always
    /// player 1: a joiner after player 1 departs inherits that number, while
    /// occupied numbers are never reassigned.
    pub fn join(&mut self, connection_id: &str) -> JoinOutcome {
        if self.slots.len() >= Self::MAX_PLAYERS {
            return JoinOutcome::Full;
        }

        let player_number = if self.slots.iter().any(|slot| slot.player_number == 1) {
            2
        } else {
            1
        };
        self.slots.push(Slot {
            player_number,
            connection_id: connection_id.to_string(),
        });

        JoinOutcome::Joined {
            player_number,
            players_count: self.slots.len(),
            room_ready: self.slots.len() == Self::MAX_PLAYERS,
        }
    }

    /// Removes the slot bound to `connection_id`, if any. A match cannot
    /// continue short-handed, so the game stops immediately.
    pub fn leave(&mut self, connection_id: &str) -> Option<LeaveOutcome> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.connection_id == connection_id)?;
        let slot = self.slots.remove(index);
        self.state.game_running = false;

        Some(LeaveOutcome {
            player_number: slot.player_number,
            players_count: self.slots.len(),
        })
    }

    /// Transitions into a running match. A no-op unless both slots are
    /// filled, the game is idle, and no winner has been decided.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.slots.len() != Self::MAX_PLAYERS
            || self.state.game_running
            || self.state.winner.is_some()
        {
            return false;
        }

        self.state.game_running = true;
        self.state.reset_ball(rng);
        self.last_tick = Instant::now();
        true
    }

    /// Writes a clamped paddle position. Player numbers other than 1 or 2
    /// are stale input after a slot change, not an error.
    pub fn apply_paddle_input(&mut self, player_number: u8, target_y: f64) {
        let clamped = target_y.clamp(0.0, COURT_HEIGHT - PADDLE_HEIGHT);
        match player_number {
            1 => self.state.paddle1.y = clamped,
            2 => self.state.paddle2.y = clamped,
            _ => {}
        }
    }

    /// Runs one simulation step scaled by the wall time elapsed since the
    /// previous tick.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Vec<TickEvent> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64() * 1000.0 / REFERENCE_TICK_MS;
        self.last_tick = now;
        simulation::step(&mut self.state, dt, rng)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.game_running
    }

    pub fn player_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn member_connections(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.connection_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn full_room() -> Room {
        let mut room = Room::new("TEST01".to_string());
        room.join("conn1");
        room.join("conn2");
        room
    }

    #[test]
    fn joiners_get_player_numbers_in_order() {
        let mut room = Room::new("TEST01".to_string());

        assert_eq!(
            room.join("conn1"),
            JoinOutcome::Joined {
                player_number: 1,
                players_count: 1,
                room_ready: false,
            }
        );
        assert_eq!(
            room.join("conn2"),
            JoinOutcome::Joined {
                player_number: 2,
                players_count: 2,
                room_ready: true,
            }
        );
    }

    #[test]
    fn third_join_is_rejected_and_room_unchanged() {
        let mut room = full_room();

        assert_eq!(room.join("conn3"), JoinOutcome::Full);
        assert_eq!(room.player_count(), 2);
        assert_eq!(room.member_connections(), vec!["conn1", "conn2"]);
    }

    #[test]
    fn joiner_after_player_one_departs_becomes_player_one() {
        let mut room = full_room();
        room.leave("conn1");

        let outcome = room.join("conn3");

        assert_eq!(
            outcome,
            JoinOutcome::Joined {
                player_number: 1,
                players_count: 2,
                room_ready: true,
            }
        );
    }

    #[test]
    fn leave_stops_a_running_match() {
        let mut room = full_room();
        assert!(room.start(&mut rng()));

        let outcome = room.leave("conn2").unwrap();

        assert_eq!(outcome.player_number, 2);
        assert_eq!(outcome.players_count, 1);
        assert!(!room.is_running());
    }

    #[test]
    fn leave_of_unknown_connection_is_a_no_op() {
        let mut room = full_room();

        assert!(room.leave("ghost").is_none());
        assert_eq!(room.player_count(), 2);
    }

    #[test]
    fn start_requires_two_idle_players() {
        let mut room = Room::new("TEST01".to_string());
        room.join("conn1");

        assert!(!room.start(&mut rng()));

        room.join("conn2");
        assert!(room.start(&mut rng()));
        assert!(room.is_running());

        // Already running: no-op.
        assert!(!room.start(&mut rng()));
    }

    #[test]
    fn start_serves_from_center() {
        let mut room = full_room();
        room.start(&mut rng());

        assert_eq!(room.state().ball.x, 400.0);
        assert_eq!(room.state().ball.y, 200.0);
        assert_eq!(room.state().ball.dx.abs(), 5.0);
    }

    #[test]
    fn decided_match_never_restarts() {
        let mut room = full_room();
        room.state.winner = Some(1);

        assert!(!room.start(&mut rng()));
        assert!(!room.is_running());
    }

    #[test]
    fn paddle_input_is_clamped_to_the_court() {
        let mut room = full_room();

        room.apply_paddle_input(1, -50.0);
        assert_eq!(room.state().paddle1.y, 0.0);

        room.apply_paddle_input(1, 10_000.0);
        assert_eq!(room.state().paddle1.y, 300.0);

        room.apply_paddle_input(2, 120.0);
        assert_eq!(room.state().paddle2.y, 120.0);
    }

    #[test]
    fn unknown_player_number_input_is_ignored() {
        let mut room = full_room();
        let before1 = room.state().paddle1.y;
        let before2 = room.state().paddle2.y;

        room.apply_paddle_input(7, 42.0);

        assert_eq!(room.state().paddle1.y, before1);
        assert_eq!(room.state().paddle2.y, before2);
    }
}
