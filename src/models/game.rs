use super::{
    Broadcaster, ChainGenerator, GameSession, Phase, Player, PlayerId, PlayerList,
    ServerMessage, Transition,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    Mutex,
};
use tracing::{debug, info, warn};

/// Owns the session, the player registry and the chain generator. Every
/// inbound message and timer runs through here while holding the game lock,
/// so state is always fully updated before anything is broadcast.
#[derive(Debug)]
pub struct Game {
    pub players: PlayerList,
    session: GameSession,
    generator: ChainGenerator,
    scheduler: UnboundedSender<Transition>,
}

impl Game {
    pub fn new(generator: ChainGenerator) -> Arc<Mutex<Self>> {
        let (game, timers) = Self::with_scheduler(generator);
        let game = Arc::new(Mutex::new(game));

        let game_clone = Arc::clone(&game);
        tokio::spawn(async move {
            Game::run_timers(game_clone, timers).await;
        });

        game
    }

    /// Builds a game without starting the timer loop. Scheduled transitions
    /// are delivered on the returned receiver.
    pub fn with_scheduler(generator: ChainGenerator) -> (Self, UnboundedReceiver<Transition>) {
        let (scheduler, timers) = mpsc::unbounded_channel();
        let game = Self {
            players: PlayerList::new(),
            session: GameSession::new(),
            generator,
            scheduler,
        };
        (game, timers)
    }

    pub async fn run_timers(game: Arc<Mutex<Self>>, mut timers: UnboundedReceiver<Transition>) {
        while let Some(transition) = timers.recv().await {
            let game = Arc::clone(&game);
            tokio::spawn(async move {
                tokio::time::sleep(transition.delay()).await;
                game.lock().await.apply(transition, Instant::now());
            });
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn join(
        &mut self,
        player_id: &PlayerId,
        sender: UnboundedSender<ServerMessage>,
        name: Option<String>,
        now: Instant,
    ) {
        if self.players.contains_key(player_id) {
            if let Some(name) = name {
                self.update_name(player_id, &name);
            }
            return;
        }

        let name = clean_name(name.as_deref()).unwrap_or_else(|| player_id.placeholder_name());
        let mut player = Player::new(sender, name.clone());
        player.reset_for_chain(self.session.chain());
        self.players.add_player(player_id.clone(), player);
        info!(player_id = %player_id, %name, "Player joined");

        Broadcaster::log(&self.players, format!("{name} joined the game"));
        if self.session.phase() == Phase::Idle {
            self.start_round(now);
        } else {
            Broadcaster::broadcast_game_state(&self.session, &self.players);
            Broadcaster::send_player_state(&self.players, player_id);
        }
    }

    pub fn update_name(&mut self, player_id: &PlayerId, name: &str) {
        let Some(name) = clean_name(Some(name)) else {
            return;
        };
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };
        if player.name == name {
            return;
        }

        let previous = std::mem::replace(&mut player.name, name.clone());
        debug!(player_id = %player_id, %previous, %name, "Player renamed");
        Broadcaster::log(&self.players, format!("{previous} is now known as {name}"));
        Broadcaster::broadcast_game_state(&self.session, &self.players);
    }

    pub fn remove_player(&mut self, player_id: &PlayerId) {
        let Some(player) = self.players.remove(player_id) else {
            return;
        };
        info!(player_id = %player_id, name = %player.name, "Player left");
        Broadcaster::log(&self.players, format!("{} left the game", player.name));
        Broadcaster::broadcast_game_state(&self.session, &self.players);
    }

    pub fn reveal_letter(&mut self, player_id: &PlayerId, word_index: usize, now: Instant) {
        let Some(word) = self.session.playable_word(word_index) else {
            return;
        };
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };

        if let Some(remaining) = player.cooldown_remaining(word_index, now) {
            Broadcaster::send(
                &self.players,
                player_id,
                ServerMessage::RevealCooldown {
                    word_index,
                    remaining_ms: remaining.as_nanos().div_ceil(1_000_000) as u64,
                },
            );
            return;
        }

        if player.reveal_next_letter(word_index, word).is_none() {
            return;
        }
        player.start_cooldown(word_index, now);
        Broadcaster::send_player_state(&self.players, player_id);
    }

    pub fn guess(
        &mut self,
        player_id: &PlayerId,
        word_index: usize,
        guess: &str,
        now: Instant,
    ) {
        let Some(word) = self.session.playable_word(word_index) else {
            return;
        };
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };

        let correct = guess.trim().to_lowercase() == word.to_lowercase();
        debug!(player_id = %player_id, word_index, correct, "Guess received");

        if correct {
            player.reveal_word(word_index, word);
        } else {
            player.reveal_next_letter(word_index, word);
        }
        let solved = correct && player.has_solved(self.session.chain());
        Broadcaster::send_player_state(&self.players, player_id);

        if solved {
            self.complete_round(player_id, now);
        }
    }

    /// Forces a fresh game from round one. Any pending timer from the previous
    /// game becomes stale because the round start bumps the epoch.
    pub fn new_game(&mut self, now: Instant) {
        info!("Starting new game");
        self.session.reset();
        self.players.clear_scores();
        self.start_round(now);
    }

    pub fn apply(&mut self, transition: Transition, now: Instant) {
        if !self.session.accepts(&transition) {
            debug!(?transition, epoch = self.session.epoch(), "Ignoring stale transition");
            return;
        }

        match transition {
            Transition::NextRound { .. } => {
                self.session.advance_round();
                self.start_round(now);
            }
            Transition::EndGame { epoch } => {
                self.session.end_game();
                self.finish_game();
                self.schedule(Transition::NewGame { epoch });
            }
            Transition::NewGame { .. } => self.new_game(now),
        }
    }

    fn start_round(&mut self, now: Instant) {
        let chain = self.generator.generate(self.session.word_count());
        self.session.begin_round(chain, now);
        self.players.reset_for_chain(self.session.chain());

        let round = self.session.current_round();
        info!(round, chain = ?self.session.chain(), "Round started");

        Broadcaster::log(
            &self.players,
            format!("Round {round} of {} has begun", self.session.total_rounds()),
        );
        Broadcaster::broadcast_game_state(&self.session, &self.players);
        Broadcaster::send_all_player_states(&self.players);
    }

    fn complete_round(&mut self, player_id: &PlayerId, now: Instant) {
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };
        if !self.session.latch_winner(&player.name) {
            return;
        }
        player.score += 1;
        let name = player.name.clone();
        let round = self.session.current_round();
        let solve_ms = self
            .session
            .round_started_at()
            .map(|started| now.saturating_duration_since(started).as_millis() as u64);
        info!(player_id = %player_id, %name, round, ?solve_ms, "Round won");

        Broadcaster::send(&self.players, player_id, ServerMessage::RoundComplete {});
        Broadcaster::log(&self.players, format!("{name} solved round {round}!"));
        Broadcaster::broadcast_game_state(&self.session, &self.players);

        self.schedule(self.session.follow_up());
    }

    fn finish_game(&mut self) {
        let (winners, top_score) = self.players.leaders();
        let message = end_of_game_message(&winners, top_score);
        info!(?winners, top_score, "Game over");

        Broadcaster::broadcast(&self.players, &ServerMessage::GameEnd { winners, message });
    }

    fn schedule(&self, transition: Transition) {
        debug!(?transition, "Scheduling transition");
        if self.scheduler.send(transition).is_err() {
            warn!(?transition, "Timer loop is gone, transition dropped");
        }
    }
}

fn clean_name(name: Option<&str>) -> Option<String> {
    let name = name?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn points(score: u32) -> String {
    if score == 1 {
        "1 point".to_string()
    } else {
        format!("{score} points")
    }
}

pub fn end_of_game_message(winners: &[String], top_score: u32) -> String {
    match winners {
        [] => "Game over! Nobody was left to claim the win.".to_string(),
        [winner] => format!("{winner} wins the game with {}!", points(top_score)),
        [rest @ .., last] => format!(
            "It's a tie between {} and {last} with {} each!",
            rest.join(", "),
            points(top_score)
        ),
    }
}
