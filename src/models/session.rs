use std::time::{Duration, Instant};

pub const TOTAL_ROUNDS: usize = 10;

/// Number of chain words for rounds 1 through 10.
pub const ROUND_WORD_COUNTS: [usize; TOTAL_ROUNDS] = [5, 4, 6, 4, 7, 4, 7, 4, 7, 5];

pub const NEXT_ROUND_DELAY: Duration = Duration::from_millis(5_000);
pub const GAME_END_DELAY: Duration = Duration::from_millis(3_000);
pub const NEW_GAME_DELAY: Duration = Duration::from_millis(10_000);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RoundActive,
    RoundWon,
    GameEnded,
}

/// A delayed lifecycle step, stamped with the epoch it was scheduled in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    NextRound { epoch: u64 },
    EndGame { epoch: u64 },
    NewGame { epoch: u64 },
}

impl Transition {
    pub fn delay(&self) -> Duration {
        match self {
            Transition::NextRound { .. } => NEXT_ROUND_DELAY,
            Transition::EndGame { .. } => GAME_END_DELAY,
            Transition::NewGame { .. } => NEW_GAME_DELAY,
        }
    }

    pub fn epoch(&self) -> u64 {
        match *self {
            Transition::NextRound { epoch }
            | Transition::EndGame { epoch }
            | Transition::NewGame { epoch } => epoch,
        }
    }

    fn expected_phase(&self) -> Phase {
        match self {
            Transition::NextRound { .. } | Transition::EndGame { .. } => Phase::RoundWon,
            Transition::NewGame { .. } => Phase::GameEnded,
        }
    }
}

/// Authoritative round and game state. Only lifecycle methods mutate it.
#[derive(Debug)]
pub struct GameSession {
    current_round: usize,
    chain: Vec<String>,
    round_started_at: Option<Instant>,
    round_winner: Option<String>,
    phase: Phase,
    epoch: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            current_round: 1,
            chain: Vec::new(),
            round_started_at: None,
            round_winner: None,
            phase: Phase::Idle,
            epoch: 0,
        }
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn total_rounds(&self) -> usize {
        TOTAL_ROUNDS
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    pub fn round_winner(&self) -> Option<&str> {
        self.round_winner.as_deref()
    }

    pub fn round_started_at(&self) -> Option<Instant> {
        self.round_started_at
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= TOTAL_ROUNDS
    }

    pub fn word_count(&self) -> usize {
        word_count_for_round(self.current_round)
    }

    /// Word index that can be revealed or guessed: inside the chain and not
    /// the always-visible first or last word.
    pub fn playable_word(&self, word_index: usize) -> Option<&str> {
        if word_index == 0 || word_index + 1 >= self.chain.len() {
            return None;
        }
        self.chain.get(word_index).map(String::as_str)
    }

    /// Installs a new chain for the current round and bumps the epoch so
    /// transitions scheduled for earlier rounds are dropped.
    pub fn begin_round(&mut self, chain: Vec<String>, now: Instant) {
        self.chain = chain;
        self.round_started_at = Some(now);
        self.round_winner = None;
        self.phase = Phase::RoundActive;
        self.epoch += 1;
    }

    /// Latches the round winner. Returns false if the round already has one.
    pub fn latch_winner(&mut self, name: &str) -> bool {
        if self.phase != Phase::RoundActive || self.round_winner.is_some() {
            return false;
        }
        self.round_winner = Some(name.to_string());
        self.phase = Phase::RoundWon;
        true
    }

    /// The delayed step that follows a latched win.
    pub fn follow_up(&self) -> Transition {
        if self.is_final_round() {
            Transition::EndGame { epoch: self.epoch }
        } else {
            Transition::NextRound { epoch: self.epoch }
        }
    }

    pub fn accepts(&self, transition: &Transition) -> bool {
        transition.epoch() == self.epoch && transition.expected_phase() == self.phase
    }

    pub fn advance_round(&mut self) {
        self.current_round = (self.current_round + 1).min(TOTAL_ROUNDS);
    }

    pub fn end_game(&mut self) {
        self.phase = Phase::GameEnded;
    }

    pub fn reset(&mut self) {
        self.current_round = 1;
        self.phase = Phase::Idle;
    }
}

pub fn word_count_for_round(round: usize) -> usize {
    let index = round.clamp(1, TOTAL_ROUNDS) - 1;
    ROUND_WORD_COUNTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn round_table_matches_configuration() {
        let counts: Vec<usize> = (1..=TOTAL_ROUNDS).map(word_count_for_round).collect();
        assert_eq!(counts, [5, 4, 6, 4, 7, 4, 7, 4, 7, 5]);
    }

    #[test]
    fn winner_latches_once_per_round() {
        let mut session = GameSession::new();
        session.begin_round(words(4), Instant::now());

        assert!(session.latch_winner("ann"));
        assert!(!session.latch_winner("bob"));
        assert_eq!(session.round_winner(), Some("ann"));
        assert_eq!(session.phase(), Phase::RoundWon);

        session.advance_round();
        session.begin_round(words(4), Instant::now());
        assert_eq!(session.round_winner(), None);
        assert!(session.latch_winner("bob"));
    }

    #[test]
    fn no_winner_before_a_round_starts() {
        let mut session = GameSession::new();
        assert!(!session.latch_winner("ann"));
    }

    #[test]
    fn playable_word_excludes_ends_and_out_of_range() {
        let mut session = GameSession::new();
        session.begin_round(words(4), Instant::now());

        assert_eq!(session.playable_word(0), None);
        assert_eq!(session.playable_word(1), Some("word1"));
        assert_eq!(session.playable_word(2), Some("word2"));
        assert_eq!(session.playable_word(3), None);
        assert_eq!(session.playable_word(99), None);
    }

    #[test]
    fn stale_transitions_are_rejected() {
        let mut session = GameSession::new();
        session.begin_round(words(5), Instant::now());
        session.latch_winner("ann");

        let pending = session.follow_up();
        assert_eq!(pending, Transition::NextRound { epoch: 1 });
        assert!(session.accepts(&pending));

        session.reset();
        session.begin_round(words(5), Instant::now());
        assert!(!session.accepts(&pending));
    }

    #[test]
    fn final_round_schedules_game_end() {
        let mut session = GameSession::new();
        for _ in 1..TOTAL_ROUNDS {
            session.advance_round();
        }
        session.begin_round(words(5), Instant::now());
        session.latch_winner("ann");

        assert!(session.is_final_round());
        assert!(matches!(session.follow_up(), Transition::EndGame { .. }));
        assert_eq!(session.follow_up().delay(), GAME_END_DELAY);
    }
}
