use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::GameError;

/// Free-form snapshot of the game as one actor is allowed to see it.
pub type Observation = Map<String, Value>;

/// Diagnostic fields attached to a turn (`invalid`, `reason`, `outcome`, ...).
pub type Info = Map<String, Value>;

/// Whole-match summary with no per-actor hiding.
pub type Status = Map<String, Value>;

/// Cumulative score per actor.
pub type Scores = BTreeMap<String, f64>;

/// Outcome of applying one command for one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// The acting actor's observation after the command.
    pub observation: Observation,
    /// Score change for the acting actor caused by this call alone.
    pub reward: f64,
    /// Whether the match is over.
    pub done: bool,
    pub info: Info,
}

/// Contract shared by every synchronous turn-based game.
///
/// Each implementation owns its round state outright; nothing outside the
/// instance mutates it. Constructors leave the game in a freshly reset state,
/// and [`reset`](TurnBasedGame::reset) may be called again to start another
/// match.
///
/// `apply` never fails for in-game mistakes:
/// - after the match is over it returns zero reward with `done = true`;
/// - an actor acting out of turn is penalized and nothing else changes;
/// - an illegal command is penalized, flagged with `invalid: true` and a
///   `reason` in `info`, and only advances play when the game treats the
///   attempt as forfeiting the move.
///
/// `Err` is reserved for actors the game has never heard of.
pub trait TurnBasedGame {
    /// Short machine name such as `"blackjack"`.
    fn name(&self) -> &'static str;

    /// Seats in turn order.
    fn players(&self) -> &[String];

    fn reset(&mut self);

    /// Actor expected to act next. Meaningless once terminal.
    fn current_actor(&self) -> &str;

    fn observation(&self, actor: &str) -> Result<Observation, GameError>;

    /// Commands `actor` may submit right now; empty when it is not their turn
    /// or the match is over.
    fn legal_actions(&self, actor: &str) -> Vec<String>;

    fn apply(&mut self, actor: &str, command: &str) -> Result<TurnResult, GameError>;

    fn is_terminal(&self) -> bool;

    /// Authoritative once terminal; live accumulators before that.
    fn final_scores(&self) -> Scores;

    fn status(&self) -> Status;
}

impl<G: TurnBasedGame + ?Sized> TurnBasedGame for Box<G> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn players(&self) -> &[String] {
        (**self).players()
    }
    fn reset(&mut self) {
        (**self).reset()
    }
    fn current_actor(&self) -> &str {
        (**self).current_actor()
    }
    fn observation(&self, actor: &str) -> Result<Observation, GameError> {
        (**self).observation(actor)
    }
    fn legal_actions(&self, actor: &str) -> Vec<String> {
        (**self).legal_actions(actor)
    }
    fn apply(&mut self, actor: &str, command: &str) -> Result<TurnResult, GameError> {
        (**self).apply(actor, command)
    }
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
    fn final_scores(&self) -> Scores {
        (**self).final_scores()
    }
    fn status(&self) -> Status {
        (**self).status()
    }
}

/// Validates a seat list: the expected count and no duplicates.
pub(crate) fn check_players(
    game: &'static str,
    players: &[String],
    expected: &'static str,
    count_ok: bool,
) -> Result<(), GameError> {
    if !count_ok {
        return Err(GameError::PlayerCount {
            game,
            expected,
            actual: players.len(),
        });
    }
    for (i, p) in players.iter().enumerate() {
        if players[..i].contains(p) {
            return Err(GameError::DuplicateActor(p.clone()));
        }
    }
    Ok(())
}

pub(crate) fn zero_scores(players: &[String]) -> Scores {
    players.iter().map(|p| (p.clone(), 0.0)).collect()
}

/// `info` for an actor acting while someone else holds the turn.
pub(crate) fn out_of_turn_info(legal_for_current: Vec<String>) -> Info {
    let mut info = Info::new();
    info.insert("invalid".into(), Value::Bool(true));
    info.insert("reason".into(), Value::from("out_of_turn"));
    info.insert("legal_moves".into(), Value::from(legal_for_current));
    info
}

pub(crate) fn finished_info(reason: &str) -> Info {
    let mut info = Info::new();
    info.insert("reason".into(), Value::from(reason));
    info
}

/// Normalizes a raw command for keyword games.
pub(crate) fn normalize(command: &str) -> String {
    command.trim().to_ascii_lowercase()
}
