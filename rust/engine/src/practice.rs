//! Single-seat practice play.
//!
//! A [`PracticeSession`] hands one seat (the hero) to the caller and drives
//! every other seat with a [`HouseSeat`], which sees the game directly rather
//! than through an observation.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::blackjack::{BlackjackConfig, BlackjackGame};
use crate::errors::GameError;
use crate::game::{Observation, TurnBasedGame, TurnResult};
use crate::poker::{CallPolicy, HeadsUpPoker, PokerConfig, ThresholdCallPolicy};

/// House seats get this many consecutive turns to hand play back.
pub const HOUSE_TURN_LIMIT: usize = 64;

pub trait HouseSeat<G: ?Sized> {
    fn act(&mut self, game: &G, actor: &str) -> String;
}

impl<G: ?Sized, F> HouseSeat<G> for F
where
    F: FnMut(&G, &str) -> String,
{
    fn act(&mut self, game: &G, actor: &str) -> String {
        self(game, actor)
    }
}

/// Checks when unopposed; facing a bet, calls or folds per its policy.
#[derive(Debug, Clone, Default)]
pub struct PokerHouse<P> {
    policy: P,
}

impl<P: CallPolicy> PokerHouse<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: CallPolicy> HouseSeat<HeadsUpPoker> for PokerHouse<P> {
    fn act(&mut self, game: &HeadsUpPoker, actor: &str) -> String {
        if !game.awaiting_call() {
            return "check".to_string();
        }
        match game.house_view(actor) {
            Some(view) if self.policy.calls(&view) => "call".to_string(),
            _ => "fold".to_string(),
        }
    }
}

pub type HouseMap<G> = BTreeMap<String, Box<dyn HouseSeat<G>>>;

pub struct PracticeSession<G: TurnBasedGame> {
    game: G,
    hero: String,
    house: HouseMap<G>,
}

impl<G: TurnBasedGame> PracticeSession<G> {
    /// Every seat other than `hero` needs an entry in `house`.
    pub fn new(game: G, hero: &str, house: HouseMap<G>) -> Result<Self, GameError> {
        if !game.players().iter().any(|p| p == hero) {
            return Err(GameError::UnknownActor(hero.to_string()));
        }
        if let Some(uncovered) = game
            .players()
            .iter()
            .find(|p| p.as_str() != hero && !house.contains_key(p.as_str()))
        {
            return Err(GameError::MissingHouseSeat(uncovered.clone()));
        }
        Ok(Self {
            game,
            hero: hero.to_string(),
            house,
        })
    }

    pub fn hero(&self) -> &str {
        &self.hero
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Starts a new match and returns the hero's first observation, after
    /// any house seats that act before the hero.
    pub fn reset(&mut self) -> Result<Observation, GameError> {
        self.game.reset();
        self.run_house()?;
        self.hero_observation()
    }

    /// Applies the hero's command, then lets the house play until the hero
    /// is up again or the match ends. The reward is the hero's total score
    /// change over the whole step, house responses included.
    pub fn step(&mut self, command: &str) -> Result<TurnResult, GameError> {
        let before = self.hero_score();
        let applied = self.game.apply(&self.hero, command)?;
        self.run_house()?;
        Ok(TurnResult {
            observation: self.hero_observation()?,
            reward: self.hero_score() - before,
            done: self.game.is_terminal(),
            info: applied.info,
        })
    }

    fn hero_score(&self) -> f64 {
        self.game
            .final_scores()
            .get(&self.hero)
            .copied()
            .unwrap_or(0.0)
    }

    fn hero_observation(&self) -> Result<Observation, GameError> {
        let mut obs = self.game.observation(&self.hero)?;
        obs.entry("legal_moves")
            .or_insert_with(|| Value::from(self.game.legal_actions(&self.hero)));
        Ok(obs)
    }

    fn run_house(&mut self) -> Result<(), GameError> {
        let mut turns = 0;
        while !self.game.is_terminal() && self.game.current_actor() != self.hero {
            let actor = self.game.current_actor().to_string();
            if turns >= HOUSE_TURN_LIMIT {
                return Err(GameError::HouseStalled { actor, turns });
            }
            let seat = self
                .house
                .get_mut(&actor)
                .ok_or_else(|| GameError::MissingHouseSeat(actor.clone()))?;
            let command = seat.act(&self.game, &actor);
            tracing::debug!(game = self.game.name(), actor = %actor, command = %command, "house move");
            self.game.apply(&actor, &command)?;
            turns += 1;
        }
        Ok(())
    }
}

impl PracticeSession<BlackjackGame> {
    /// One-seat table; the dealer is the only opposition.
    pub fn blackjack(config: BlackjackConfig) -> Result<Self, GameError> {
        let hero = config
            .players
            .first()
            .cloned()
            .ok_or_else(|| GameError::PlayerCount {
                game: "blackjack practice",
                expected: "exactly 1",
                actual: 0,
            })?;
        if config.players.len() != 1 {
            return Err(GameError::PlayerCount {
                game: "blackjack practice",
                expected: "exactly 1",
                actual: config.players.len(),
            });
        }
        let game = BlackjackGame::new(config)?;
        Self::new(game, &hero, HouseMap::new())
    }
}

impl PracticeSession<HeadsUpPoker> {
    /// Hero on the button, the big blind played by a [`PokerHouse`].
    pub fn poker<P>(config: PokerConfig, policy: P) -> Result<Self, GameError>
    where
        P: CallPolicy + 'static,
    {
        let game = HeadsUpPoker::new(config)?;
        let players = game.players().to_vec();
        let mut house: HouseMap<HeadsUpPoker> = HouseMap::new();
        house.insert(players[1].clone(), Box::new(PokerHouse::new(policy)));
        Self::new(game, &players[0], house)
    }

    pub fn poker_default(config: PokerConfig) -> Result<Self, GameError> {
        Self::poker(config, ThresholdCallPolicy::default())
    }
}
