//! # gamemaster-ai: Built-in Agents
//!
//! Ready-made decision functions for the game engine. Every agent here reads
//! only the observation it is handed, so they work under the
//! [`GameMaster`](gamemaster_engine::master::GameMaster) exactly like an
//! external agent would.
//!
//! ## Agent Kinds
//!
//! | kind | agent | plays |
//! |---|---|---|
//! | `"first"` | [`baseline::FirstLegal`] | any game |
//! | `"random"` | [`random::RandomLegal`] | any game |
//! | `"threshold"` | [`baseline::ThresholdBlackjack`] | blackjack |
//! | `"passive"` | [`baseline::PassivePoker`] | poker |
//! | `"baseline"` | [`baseline::BaselinePoker`] | poker |
//!
//! ## Quick Start
//!
//! ```rust
//! use gamemaster_ai::create_agent;
//!
//! let agent = create_agent("random", 42).unwrap();
//! assert_eq!(agent.name(), "RandomLegal");
//! assert!(create_agent("oracle", 0).is_err());
//! ```

use serde_json::Value;
use thiserror::Error;

pub use gamemaster_engine::master::Agent;
use gamemaster_engine::game::Observation;

pub mod baseline;
pub mod random;

/// Agent kinds understood by [`create_agent`].
pub const AGENT_KINDS: [&str; 5] = ["first", "random", "threshold", "passive", "baseline"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Unknown agent kind: {0} (expected one of: {kinds})", kinds = AGENT_KINDS.join(", "))]
    UnknownKind(String),
}

/// Builds an agent by kind. `seed` only matters for randomized agents.
pub fn create_agent(kind: &str, seed: u64) -> Result<Box<dyn Agent>, AgentError> {
    let agent: Box<dyn Agent> = match kind.trim().to_ascii_lowercase().as_str() {
        "first" => Box::new(baseline::FirstLegal),
        "random" => Box::new(random::RandomLegal::new(seed)),
        "threshold" => Box::new(baseline::ThresholdBlackjack::default()),
        "passive" => Box::new(baseline::PassivePoker),
        "baseline" => Box::new(baseline::BaselinePoker::new()),
        _ => return Err(AgentError::UnknownKind(kind.to_string())),
    };
    Ok(agent)
}

/// Legal moves listed in an observation, in the order the game gave them.
pub fn legal_moves(observation: &Observation) -> Vec<&str> {
    observation
        .get("legal_moves")
        .and_then(Value::as_array)
        .map(|moves| moves.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// First of `preferred` that is currently legal.
pub(crate) fn pick<'a>(legal: &[&str], preferred: &[&'a str]) -> Option<&'a str> {
    preferred.iter().copied().find(|p| legal.contains(p))
}
