//! Seeded uniform choice among legal moves.

use gamemaster_engine::game::Observation;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::{Agent, legal_moves};

/// Picks uniformly among the legal moves with its own ChaCha20 stream, so
/// the same seed replays the same choices.
#[derive(Debug, Clone)]
pub struct RandomLegal {
    rng: ChaCha20Rng,
}

impl RandomLegal {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomLegal {
    fn decide(&mut self, observation: &Observation) -> Option<String> {
        let legal = legal_moves(observation);
        if legal.is_empty() {
            return None;
        }
        let i = self.rng.random_range(0..legal.len());
        Some(legal[i].to_string())
    }

    fn name(&self) -> &str {
        "RandomLegal"
    }
}
