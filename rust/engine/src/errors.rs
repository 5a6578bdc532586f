use thiserror::Error;

/// Construction and programming errors raised by games.
///
/// In-game mistakes (illegal commands, acting out of turn, acting after the
/// match ended) are not errors; they are reported through
/// [`TurnResult::info`](crate::game::TurnResult) with a negative reward.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{game} requires {expected} players, got {actual}")]
    PlayerCount {
        game: &'static str,
        expected: &'static str,
        actual: usize,
    },
    #[error("Duplicate actor: {0}")]
    DuplicateActor(String),
    #[error("Unknown actor: {0}")]
    UnknownActor(String),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Hand ranking needs 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("No house seat for {0}")]
    MissingHouseSeat(String),
    #[error("House seat {actor} made no progress after {turns} turns")]
    HouseStalled { actor: String, turns: usize },
}

/// Fatal orchestrator errors. A match that hits one of these has no
/// meaningful result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Agents missing for players: {}", .0.join(", "))]
    MissingAgents(Vec<String>),
    #[error("Agent for {actor} produced no command on turn {turn}")]
    NoCommand { actor: String, turn: usize },
    #[error(transparent)]
    Game(#[from] GameError),
}
