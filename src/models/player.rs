use super::ServerMessage;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

/// Minimum wait between two manual reveals of the same word by one player.
pub const REVEAL_COOLDOWN: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn placeholder_name(&self) -> String {
        let short: String = self.0.chars().take(4).collect();
        format!("Player {short}")
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub sender: UnboundedSender<ServerMessage>,
    revealed: Vec<BTreeSet<usize>>,
    cooldowns: Vec<Option<Instant>>,
}

impl Player {
    pub fn new(sender: UnboundedSender<ServerMessage>, name: String) -> Self {
        Self {
            name,
            score: 0,
            sender,
            revealed: Vec::new(),
            cooldowns: Vec::new(),
        }
    }

    /// Fresh reveal state for a new chain. The first and last words start out
    /// fully revealed; every other word starts hidden with no cooldown.
    pub fn reset_for_chain(&mut self, chain: &[String]) {
        let last = chain.len().saturating_sub(1);
        self.revealed = chain
            .iter()
            .enumerate()
            .map(|(index, word)| {
                if index == 0 || index == last {
                    (0..letter_count(word)).collect()
                } else {
                    BTreeSet::new()
                }
            })
            .collect();
        self.cooldowns = vec![None; chain.len()];
    }

    pub fn revealed_letters(&self) -> &[BTreeSet<usize>] {
        &self.revealed
    }

    pub fn cooldown_remaining(&self, word_index: usize, now: Instant) -> Option<Duration> {
        let last_reveal = (*self.cooldowns.get(word_index)?)?;
        let elapsed = now.saturating_duration_since(last_reveal);
        REVEAL_COOLDOWN
            .checked_sub(elapsed)
            .filter(|remaining| !remaining.is_zero())
    }

    pub fn start_cooldown(&mut self, word_index: usize, now: Instant) {
        if let Some(slot) = self.cooldowns.get_mut(word_index) {
            *slot = Some(now);
        }
    }

    /// Reveals the lowest hidden letter of `word`, never its final letter.
    /// Returns the revealed index, or `None` when nothing is left to reveal.
    pub fn reveal_next_letter(&mut self, word_index: usize, word: &str) -> Option<usize> {
        let revealed = self.revealed.get_mut(word_index)?;
        let next = (0..letter_count(word).saturating_sub(1)).find(|i| !revealed.contains(i))?;
        revealed.insert(next);
        Some(next)
    }

    pub fn reveal_word(&mut self, word_index: usize, word: &str) {
        if let Some(revealed) = self.revealed.get_mut(word_index) {
            revealed.extend(0..letter_count(word));
        }
    }

    /// True once every interior word of `chain` is fully revealed.
    pub fn has_solved(&self, chain: &[String]) -> bool {
        if self.revealed.len() != chain.len() || chain.len() < 2 {
            return false;
        }
        chain[1..chain.len() - 1]
            .iter()
            .zip(&self.revealed[1..])
            .all(|(word, revealed)| (0..letter_count(word)).all(|i| revealed.contains(&i)))
    }

    pub fn send(&self, message: ServerMessage) -> bool {
        self.sender.send(message).is_ok()
    }
}

pub fn letter_count(word: &str) -> usize {
    word.chars().count()
}

/// Connected players, kept in join order.
#[derive(Debug, Default)]
pub struct PlayerList {
    players: HashMap<PlayerId, Player>,
    order: Vec<PlayerId>,
}

impl PlayerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, id: PlayerId, player: Player) {
        if self.players.insert(id.clone(), player).is_none() {
            self.order.push(id);
        }
    }

    pub fn remove(&mut self, player_id: &PlayerId) -> Option<Player> {
        let removed = self.players.remove(player_id)?;
        self.order.retain(|id| id != player_id);
        Some(removed)
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn get_mut(&mut self, player_id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(player_id)
    }

    pub fn contains_key(&self, player_id: &PlayerId) -> bool {
        self.players.contains_key(player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Player)> {
        self.order
            .iter()
            .filter_map(|id| self.players.get(id).map(|player| (id, player)))
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn reset_for_chain(&mut self, chain: &[String]) {
        for player in self.players.values_mut() {
            player.reset_for_chain(chain);
        }
    }

    pub fn clear_scores(&mut self) {
        for player in self.players.values_mut() {
            player.score = 0;
        }
    }

    /// Names of every player tied at the highest score, in join order.
    pub fn leaders(&self) -> (Vec<String>, u32) {
        let top = self.iter().map(|(_, p)| p.score).max().unwrap_or(0);
        let names = self
            .iter()
            .filter(|(_, p)| p.score == top)
            .map(|(_, p)| p.name.clone())
            .collect();
        (names, top)
    }
}
