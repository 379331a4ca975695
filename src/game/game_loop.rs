use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::game::room_registry::SharedRoom;
use crate::network::commands::ConnectionCommand;
use crate::network::messages::{serialize_event, ServerEvent};

pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Drives one started match on a detached task. The next tick is armed only
/// after the current one completes, so a slow room can never pile up pending
/// ticks, and a cleared running flag (win or departure) ends the loop at the
/// next check.
pub fn spawn_game_loop(room: SharedRoom, cmd_sender: UnboundedSender<ConnectionCommand>) {
    tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;

            let mut room = room.lock().await;
            if !room.is_running() {
                break;
            }

            let events = room.tick(&mut rng);
            let members = room.member_connections();
            for event in events {
                broadcast(&cmd_sender, members.clone(), &ServerEvent::from(event));
            }

            if room.is_running() {
                broadcast(
                    &cmd_sender,
                    members,
                    &ServerEvent::Snapshot(room.state().clone()),
                );
            } else {
                break;
            }
        }
    });
}

fn broadcast(
    cmd_sender: &UnboundedSender<ConnectionCommand>,
    connections: Vec<String>,
    event: &ServerEvent,
) {
    match serialize_event(event) {
        Ok(message) => {
            if cmd_sender
                .send(ConnectionCommand::SendToRoom {
                    connections,
                    message,
                })
                .is_err()
            {
                error!("Outbound command channel closed, dropping event");
            }
        }
        Err(err) => error!("Failed to serialize game event: {}", err),
    }
}
