mod broadcaster;
mod chain;
mod game;
mod messages;
mod player;
mod session;
mod word_graph;

pub use broadcaster::Broadcaster;
pub use chain::ChainGenerator;
pub use game::{end_of_game_message, Game};
pub use messages::{ClientMessage, PlayerSummary, ServerMessage};
pub use player::{letter_count, Player, PlayerId, PlayerList, REVEAL_COOLDOWN};
pub use session::{
    word_count_for_round, GameSession, Phase, Transition, GAME_END_DELAY, NEW_GAME_DELAY,
    NEXT_ROUND_DELAY, ROUND_WORD_COUNTS, TOTAL_ROUNDS,
};
pub use word_graph::WordGraph;
