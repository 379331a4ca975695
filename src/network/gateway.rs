use dashmap::DashMap;
use log::{debug, info};
use tokio::sync::mpsc::UnboundedSender;

use crate::errors::{AppError, AppResult};
use crate::game::game_loop;
use crate::game::room::JoinOutcome;
use crate::game::room_registry::RoomRegistry;
use crate::network::commands::ConnectionCommand;
use crate::network::messages::{serialize_event, ServerEvent};

/// A connection's current room/slot claim.
#[derive(Debug, Clone)]
struct Session {
    room_id: String,
    player_number: u8,
}

/// Routes client messages to the owning room and relays room events back to
/// member connections. Messages from connections without a room are stale by
/// definition and dropped without an error.
pub struct SessionGateway {
    registry: RoomRegistry,
    sessions: DashMap<String, Session>,
    cmd_sender: UnboundedSender<ConnectionCommand>,
}

impl SessionGateway {
    pub fn new(cmd_sender: UnboundedSender<ConnectionCommand>) -> Self {
        Self {
            registry: RoomRegistry::new(),
            sessions: DashMap::new(),
            cmd_sender,
        }
    }

    pub async fn join_room(
        &self,
        connection_id: &str,
        requested: Option<String>,
    ) -> AppResult<()> {
        if self.sessions.contains_key(connection_id) {
            debug!(
                "Connection {} already holds a slot, ignoring join",
                connection_id
            );
            return Ok(());
        }

        let (room_id, room) = self.registry.resolve(requested);
        let mut room = room.lock().await;

        match room.join(connection_id) {
            JoinOutcome::Full => {
                debug!("Room {} is full, rejecting {}", room_id, connection_id);
                self.send_to_connection(connection_id, &ServerEvent::RoomFull { room_id })
            }
            JoinOutcome::Joined {
                player_number,
                players_count,
                room_ready,
            } => {
                info!(
                    "Connection {} joined room {} as player {}",
                    connection_id, room_id, player_number
                );
                self.sessions.insert(
                    connection_id.to_string(),
                    Session {
                        room_id: room_id.clone(),
                        player_number,
                    },
                );

                self.send_to_connection(
                    connection_id,
                    &ServerEvent::PlayerAssigned {
                        player_number,
                        room_id,
                    },
                )?;
                self.send_to_room(
                    room.member_connections(),
                    &ServerEvent::PlayerJoined {
                        player_number,
                        players_count,
                    },
                )?;
                if room_ready {
                    self.send_to_room(
                        room.member_connections(),
                        &ServerEvent::GameReady(room.state().clone()),
                    )?;
                }
                Ok(())
            }
        }
    }

    pub async fn paddle_move(&self, connection_id: &str, y: f64) {
        let Some(session) = self.session_of(connection_id) else {
            debug!("Paddle input from {} outside any room, dropping", connection_id);
            return;
        };
        let Some(room) = self.registry.get(&session.room_id) else {
            return;
        };

        let mut room = room.lock().await;
        room.apply_paddle_input(session.player_number, y);
    }

    pub async fn start_game(&self, connection_id: &str) -> AppResult<()> {
        let Some(session) = self.session_of(connection_id) else {
            debug!("Start request from {} outside any room, dropping", connection_id);
            return Ok(());
        };
        let Some(room) = self.registry.get(&session.room_id) else {
            return Ok(());
        };

        let mut locked = room.lock().await;
        if !locked.start(&mut rand::rng()) {
            debug!("Start request for room {} ignored", session.room_id);
            return Ok(());
        }

        info!(
            "Room {} started by player {}",
            session.room_id, session.player_number
        );
        self.send_to_room(
            locked.member_connections(),
            &ServerEvent::GameStarted(locked.state().clone()),
        )?;
        drop(locked);

        game_loop::spawn_game_loop(room, self.cmd_sender.clone());
        Ok(())
    }

    pub fn ping(&self, connection_id: &str) -> AppResult<()> {
        self.send_to_connection(connection_id, &ServerEvent::Pong)
    }

    /// The single leave path: graceful close and abrupt loss both land here.
    pub async fn disconnect(&self, connection_id: &str) -> AppResult<()> {
        let Some((_, session)) = self.sessions.remove(connection_id) else {
            return Ok(());
        };
        let Some(room) = self.registry.get(&session.room_id) else {
            return Ok(());
        };

        let mut room = room.lock().await;
        let Some(outcome) = room.leave(connection_id) else {
            return Ok(());
        };

        info!(
            "Player {} left room {} ({} remaining)",
            outcome.player_number, session.room_id, outcome.players_count
        );
        self.send_to_room(
            room.member_connections(),
            &ServerEvent::PlayerLeft {
                player_number: outcome.player_number,
                players_count: outcome.players_count,
            },
        )?;
        self.send_to_room(
            room.member_connections(),
            &ServerEvent::Snapshot(room.state().clone()),
        )?;

        if room.is_empty() {
            self.registry.release(&session.room_id);
            info!("Room {} released", session.room_id);
        }
        Ok(())
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    fn session_of(&self, connection_id: &str) -> Option<Session> {
        self.sessions
            .get(connection_id)
            .map(|entry| entry.value().clone())
    }

    fn send_to_connection(&self, connection_id: &str, event: &ServerEvent) -> AppResult<()> {
        let message = serialize_event(event)?;
        self.cmd_sender
            .send(ConnectionCommand::SendToPlayer {
                connection_id: connection_id.to_string(),
                message,
            })
            .map_err(|_| AppError::CommandChannelClosed)
    }

    fn send_to_room(&self, connections: Vec<String>, event: &ServerEvent) -> AppResult<()> {
        if connections.is_empty() {
            return Ok(());
        }
        let message = serialize_event(event)?;
        self.cmd_sender
            .send(ConnectionCommand::SendToRoom {
                connections,
                message,
            })
            .map_err(|_| AppError::CommandChannelClosed)
    }
}
