use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Messages a client may send. Anything that does not parse into one of these
/// is logged and dropped by the socket loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        name: Option<String>,
    },
    UpdateName {
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    RevealLetter { word_index: usize },
    #[serde(rename_all = "camelCase")]
    Guess { word_index: usize, guess: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Connected { player_id: String },
    #[serde(rename_all = "camelCase")]
    GameState {
        current_round: usize,
        total_rounds: usize,
        chain: Vec<String>,
        players: Vec<PlayerSummary>,
        round_winner: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerState {
        revealed_letters: Vec<BTreeSet<usize>>,
    },
    #[serde(rename_all = "camelCase")]
    RevealCooldown { word_index: usize, remaining_ms: u64 },
    RoundComplete {},
    Log { message: String, timestamp: u64 },
    GameEnd { winners: Vec<String>, message: String },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
