//! Match orchestration: one game, one decision function per seat.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MatchError;
use crate::game::{zero_scores, Info, Observation, Scores, Status, TurnBasedGame};

pub const DEFAULT_MAX_TURNS: usize = 200;

/// A decision function bound to one seat for the length of a match.
///
/// Returning `None` means the agent could not produce a command at all,
/// which aborts the match. A bad command is still a command: the game
/// scores it and play goes on.
pub trait Agent: Send {
    fn decide(&mut self, observation: &Observation) -> Option<String>;

    fn name(&self) -> &str {
        "agent"
    }
}

impl<F> Agent for F
where
    F: FnMut(&Observation) -> Option<String> + Send,
{
    fn decide(&mut self, observation: &Observation) -> Option<String> {
        self(observation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub max_turns: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn_index: usize,
    pub actor: String,
    pub command: String,
    pub reward: f64,
    pub info: Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub turns: Vec<TurnRecord>,
    pub scores: Scores,
    pub winner: Option<String>,
    pub status: Status,
    /// `true` when the game ended on its own, `false` when the turn ceiling
    /// stopped it.
    pub completed: bool,
}

pub type AgentMap = BTreeMap<String, Box<dyn Agent>>;

/// Drives a set of agents against one game until it ends or the turn
/// ceiling is reached.
///
/// ```
/// use gamemaster_engine::master::{AgentMap, GameMaster, MatchConfig};
/// use gamemaster_engine::game::Observation;
/// use gamemaster_engine::tictactoe::{TicTacToe, TicTacToeConfig};
///
/// fn first_legal(obs: &Observation) -> Option<String> {
///     obs["legal_moves"][0].as_str().map(str::to_string)
/// }
///
/// let game = TicTacToe::new(TicTacToeConfig::default()).unwrap();
/// let mut agents = AgentMap::new();
/// agents.insert("player_x".into(), Box::new(first_legal));
/// agents.insert("player_o".into(), Box::new(first_legal));
///
/// let result = GameMaster::new(game, agents, MatchConfig::default())
///     .unwrap()
///     .run()
///     .unwrap();
/// assert!(result.completed);
/// assert_eq!(result.winner.as_deref(), Some("player_x"));
/// ```
pub struct GameMaster<G> {
    game: G,
    agents: AgentMap,
    max_turns: usize,
}

impl<G: TurnBasedGame> GameMaster<G> {
    /// Fails when any seat of `game` has no agent. Extra agents are ignored.
    pub fn new(game: G, agents: AgentMap, config: MatchConfig) -> Result<Self, MatchError> {
        let missing: Vec<String> = game
            .players()
            .iter()
            .filter(|p| !agents.contains_key(*p))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(MatchError::MissingAgents(missing));
        }
        Ok(Self {
            game,
            agents,
            max_turns: config.max_turns.max(1),
        })
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn into_game(self) -> G {
        self.game
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Resets the game and plays one match.
    pub fn run(&mut self) -> Result<MatchResult, MatchError> {
        self.game.reset();
        let mut running = zero_scores(self.game.players());
        let mut turns = Vec::new();

        for turn_index in 0..self.max_turns {
            if self.game.is_terminal() {
                break;
            }
            let actor = self.game.current_actor().to_string();
            let mut observation = self.game.observation(&actor)?;
            if !observation.contains_key("legal_moves") {
                observation.insert(
                    "legal_moves".into(),
                    Value::from(self.game.legal_actions(&actor)),
                );
            }

            let agent = self
                .agents
                .get_mut(&actor)
                .ok_or_else(|| MatchError::MissingAgents(vec![actor.clone()]))?;
            let command = agent.decide(&observation).ok_or_else(|| MatchError::NoCommand {
                actor: actor.clone(),
                turn: turn_index,
            })?;

            let result = self.game.apply(&actor, &command)?;
            tracing::debug!(
                game = self.game.name(),
                turn = turn_index,
                actor = %actor,
                command = %command,
                reward = result.reward,
                "turn applied"
            );
            *running.entry(actor.clone()).or_insert(0.0) += result.reward;
            turns.push(TurnRecord {
                turn_index,
                actor,
                command,
                reward: result.reward,
                info: result.info,
            });
        }

        let completed = self.game.is_terminal();
        let (scores, winner) = if completed {
            let scores = self.game.final_scores();
            let winner = unique_leader(&scores);
            (scores, winner)
        } else {
            tracing::warn!(
                game = self.game.name(),
                max_turns = self.max_turns,
                "turn ceiling reached before the game ended"
            );
            (running, None)
        };
        tracing::info!(
            game = self.game.name(),
            turns = turns.len(),
            completed,
            winner = winner.as_deref().unwrap_or("-"),
            "match finished"
        );
        Ok(MatchResult {
            turns,
            scores,
            winner,
            status: self.game.status(),
            completed,
        })
    }
}

/// The single highest scorer, or `None` on a tie for first.
pub fn unique_leader(scores: &Scores) -> Option<String> {
    let top = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut leaders = scores.iter().filter(|(_, v)| **v == top);
    match (leaders.next(), leaders.next()) {
        (Some((name, _)), None) => Some(name.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> Scores {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn leader_requires_a_strict_maximum() {
        assert_eq!(
            unique_leader(&scores(&[("a", 1.0), ("b", -1.0)])).as_deref(),
            Some("a")
        );
        assert_eq!(unique_leader(&scores(&[("a", 0.0), ("b", 0.0)])), None);
        assert_eq!(unique_leader(&Scores::new()), None);
    }

    #[test]
    fn config_defaults_to_two_hundred_turns() {
        assert_eq!(MatchConfig::default().max_turns, 200);
    }
}
