use super::{GameSession, PlayerId, PlayerList, PlayerSummary, ServerMessage};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Fan-out helpers. Public state goes to everyone in the registry, private
/// state only ever to the player it belongs to.
pub struct Broadcaster {}

impl Broadcaster {
    pub fn game_state(session: &GameSession, players: &PlayerList) -> ServerMessage {
        ServerMessage::GameState {
            current_round: session.current_round(),
            total_rounds: session.total_rounds(),
            chain: session.chain().to_vec(),
            players: players
                .iter()
                .map(|(_, player)| PlayerSummary {
                    name: player.name.clone(),
                    score: player.score,
                })
                .collect(),
            round_winner: session.round_winner().map(str::to_string),
        }
    }

    pub fn broadcast(players: &PlayerList, message: &ServerMessage) {
        for (id, player) in players.iter() {
            if !player.send(message.clone()) {
                warn!(player_id = %id, "Failed to queue broadcast");
            }
        }
    }

    pub fn broadcast_game_state(session: &GameSession, players: &PlayerList) {
        Self::broadcast(players, &Self::game_state(session, players));
    }

    pub fn log(players: &PlayerList, message: impl Into<String>) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        Self::broadcast(
            players,
            &ServerMessage::Log {
                message: message.into(),
                timestamp,
            },
        );
    }

    pub fn send(players: &PlayerList, player_id: &PlayerId, message: ServerMessage) {
        let Some(player) = players.get(player_id) else {
            return;
        };
        if !player.send(message) {
            warn!(player_id = %player_id, "Failed to queue message");
        }
    }

    pub fn send_player_state(players: &PlayerList, player_id: &PlayerId) {
        let Some(player) = players.get(player_id) else {
            return;
        };
        let message = ServerMessage::PlayerState {
            revealed_letters: player.revealed_letters().to_vec(),
        };
        if !player.send(message) {
            warn!(player_id = %player_id, "Failed to queue player state");
        }
    }

    pub fn send_all_player_states(players: &PlayerList) {
        for (id, _) in players.iter() {
            Self::send_player_state(players, id);
        }
    }
}
