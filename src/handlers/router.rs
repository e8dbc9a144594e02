use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::models::{ClientMessage, Game, PlayerId, ServerMessage};

/// Turns raw client frames into game calls.
pub struct MessageRouter {}

impl MessageRouter {
    /// Parses one text frame and dispatches it. Frames that do not parse are
    /// logged and otherwise ignored; the connection stays open.
    pub fn route(
        game: &mut Game,
        player_id: &PlayerId,
        sender: &UnboundedSender<ServerMessage>,
        text: &str,
        now: Instant,
    ) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => Self::dispatch(game, player_id, sender, message, now),
            Err(error) => warn!(player_id = %player_id, %error, "Ignoring malformed message"),
        }
    }

    pub fn dispatch(
        game: &mut Game,
        player_id: &PlayerId,
        sender: &UnboundedSender<ServerMessage>,
        message: ClientMessage,
        now: Instant,
    ) {
        debug!(player_id = %player_id, ?message, "Dispatching");
        match message {
            ClientMessage::Join { name } => game.join(player_id, sender.clone(), name, now),
            ClientMessage::UpdateName { name } => game.update_name(player_id, &name),
            ClientMessage::RevealLetter { word_index } => {
                game.reveal_letter(player_id, word_index, now)
            }
            ClientMessage::Guess { word_index, guess } => {
                game.guess(player_id, word_index, &guess, now)
            }
        }
    }
}
