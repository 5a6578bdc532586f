//! Multi-seat blackjack against a shared dealer.
//!
//! Seats act in order, skipping anyone already finished. Once every seat has
//! stood, busted or forfeited, the dealer draws to 17 and each live seat is
//! settled against the dealer total.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::deck::{Deck, DEFAULT_SEED};
use crate::errors::GameError;
use crate::game::{
    check_players, finished_info, normalize, out_of_turn_info, zero_scores, Info, Observation,
    Scores, Status, TurnBasedGame, TurnResult,
};

const DEALER_STANDS_AT: u32 = 17;
const BLACKJACK: u32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackjackRewards {
    pub win: f64,
    pub push: f64,
    pub lose: f64,
    pub bust: f64,
    pub invalid: f64,
}

impl Default for BlackjackRewards {
    fn default() -> Self {
        Self {
            win: 1.0,
            push: 0.1,
            lose: -1.0,
            bust: -1.5,
            invalid: -2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackjackConfig {
    pub players: Vec<String>,
    pub seed: Option<u64>,
    pub rewards: BlackjackRewards,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            players: vec!["player_one".into(), "player_two".into()],
            seed: None,
            rewards: BlackjackRewards::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Push,
    Lose,
    Bust,
    Invalid,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Push => "push",
            Outcome::Lose => "lose",
            Outcome::Bust => "bust",
            Outcome::Invalid => "invalid",
        }
    }
}

fn outcome_value(outcome: Option<Outcome>) -> Value {
    outcome.map(|o| Value::from(o.as_str())).unwrap_or(Value::Null)
}

/// Point value of a card rank 1..=13: faces count 10, aces count 1 here.
pub fn card_value(card: u8) -> u32 {
    u32::from(card.min(10))
}

/// Best total with each ace upgraded to 11 while that stays at or under 21.
pub fn hand_value(cards: &[u8]) -> u32 {
    let mut total: u32 = cards.iter().map(|&c| card_value(c)).sum();
    let mut aces = cards.iter().filter(|&&c| c == 1).count();
    while aces > 0 && total + 10 <= BLACKJACK {
        total += 10;
        aces -= 1;
    }
    total
}

pub fn card_label(card: u8) -> String {
    match card {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        n => n.to_string(),
    }
}

fn labels(cards: &[u8]) -> Vec<String> {
    cards.iter().map(|&c| card_label(c)).collect()
}

#[derive(Debug, Clone, Default)]
struct Seat {
    hand: Vec<u8>,
    done: bool,
    outcome: Option<Outcome>,
}

#[derive(Debug)]
pub struct BlackjackGame {
    config: BlackjackConfig,
    deck: Deck<u8>,
    seats: Vec<Seat>,
    dealer: Vec<u8>,
    current: usize,
    terminal: bool,
    dealer_resolved: bool,
    scores: Scores,
    history: Vec<String>,
}

impl BlackjackGame {
    /// Builds a table and deals the first round. Needs at least one seat.
    pub fn new(config: BlackjackConfig) -> Result<Self, GameError> {
        check_players(
            "blackjack",
            &config.players,
            "at least 1",
            !config.players.is_empty(),
        )?;
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let mut game = Self {
            deck: Deck::blackjack(seed),
            seats: Vec::new(),
            dealer: Vec::new(),
            current: 0,
            terminal: false,
            dealer_resolved: false,
            scores: zero_scores(&config.players),
            history: Vec::new(),
            config,
        };
        game.reset();
        Ok(game)
    }

    pub fn config(&self) -> &BlackjackConfig {
        &self.config
    }

    pub fn dealer_hand(&self) -> &[u8] {
        &self.dealer
    }

    pub fn hand(&self, actor: &str) -> Option<&[u8]> {
        self.seat_index(actor).map(|i| self.seats[i].hand.as_slice())
    }

    pub fn outcome(&self, actor: &str) -> Option<Outcome> {
        self.seat_index(actor).and_then(|i| self.seats[i].outcome)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn seat_index(&self, actor: &str) -> Option<usize> {
        self.config.players.iter().position(|p| p == actor)
    }

    fn require_seat(&self, actor: &str) -> Result<usize, GameError> {
        self.seat_index(actor)
            .ok_or_else(|| GameError::UnknownActor(actor.to_string()))
    }

    fn dealer_revealed(&self) -> bool {
        self.dealer_resolved || self.terminal
    }

    fn upcard(&self) -> String {
        self.dealer.first().map(|&c| card_label(c)).unwrap_or_default()
    }

    /// Moves the turn to the next unfinished seat at or after `from`.
    fn seek_from(&mut self, from: usize) {
        let n = self.seats.len();
        if let Some(offset) = (0..n).find(|o| !self.seats[(from + o) % n].done) {
            self.current = (from + offset) % n;
        } else {
            self.current = 0;
        }
    }

    fn resolve_if_finished(&mut self) {
        if self.terminal {
            return;
        }
        if self.seats.iter().any(|s| !s.done) {
            self.seek_from(self.current + 1);
            return;
        }
        if !self.dealer_resolved {
            while hand_value(&self.dealer) < DEALER_STANDS_AT {
                let card = self.deck.draw();
                self.dealer.push(card);
            }
            let dealer_total = hand_value(&self.dealer);
            let dealer_bust = dealer_total > BLACKJACK;
            self.history.push(format!(
                "Dealer reveals {} (total {}).",
                labels(&self.dealer).join(", "),
                dealer_total
            ));
            let rewards = self.config.rewards;
            for (player, seat) in self.config.players.iter().zip(self.seats.iter_mut()) {
                if matches!(seat.outcome, Some(Outcome::Bust) | Some(Outcome::Invalid)) {
                    continue;
                }
                let total = hand_value(&seat.hand);
                let (outcome, delta) = if dealer_bust || total > dealer_total {
                    (Outcome::Win, rewards.win)
                } else if total == dealer_total {
                    (Outcome::Push, rewards.push)
                } else {
                    (Outcome::Lose, rewards.lose)
                };
                seat.outcome = Some(outcome);
                *self.scores.entry(player.clone()).or_insert(0.0) += delta;
                self.history.push(format!("{player}: {}.", outcome.as_str()));
            }
            self.dealer_resolved = true;
        }
        self.terminal = true;
        tracing::debug!(game = "blackjack", dealer_total = hand_value(&self.dealer), "table settled");
    }

    fn render(&self, seat: usize) -> String {
        let state = &self.seats[seat];
        let dealer = if self.dealer_revealed() {
            labels(&self.dealer).join(", ")
        } else {
            format!("{}, hidden", self.upcard())
        };
        let mut lines = vec![
            "Blackjack Match".to_string(),
            format!(
                "Your hand: {} (total {})",
                labels(&state.hand).join(", "),
                hand_value(&state.hand)
            ),
            format!("Dealer: {dealer}"),
        ];
        match state.outcome {
            Some(outcome) => lines.push(format!("Outcome: {}", outcome.as_str())),
            None => {
                let legal = self.legal_actions(&self.config.players[seat]);
                let legal = if legal.is_empty() {
                    "none".to_string()
                } else {
                    legal.join(", ")
                };
                lines.push(format!("Legal moves: {legal}"));
            }
        }
        if self.dealer_revealed() {
            lines.push(format!("Dealer total: {}", hand_value(&self.dealer)));
        }
        lines.join("\n")
    }

    fn scores_value(&self) -> Value {
        Value::Object(
            self.scores
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(*v)))
                .collect(),
        )
    }
}

impl TurnBasedGame for BlackjackGame {
    fn name(&self) -> &'static str {
        "blackjack"
    }

    fn players(&self) -> &[String] {
        &self.config.players
    }

    /// Reseeds the deck from the configured seed, so every reset deals the
    /// same cards for the same seed.
    fn reset(&mut self) {
        self.deck = Deck::blackjack(self.config.seed.unwrap_or(DEFAULT_SEED));
        self.deck.shuffle();
        self.scores = zero_scores(&self.config.players);
        self.seats = (0..self.config.players.len())
            .map(|_| Seat {
                hand: self.deck.draw_n(2),
                ..Seat::default()
            })
            .collect();
        self.dealer = self.deck.draw_n(2);
        self.current = 0;
        self.terminal = false;
        self.dealer_resolved = false;
        self.history = vec![format!("Dealer shows {}.", self.upcard())];
    }

    fn current_actor(&self) -> &str {
        &self.config.players[self.current]
    }

    fn observation(&self, actor: &str) -> Result<Observation, GameError> {
        let seat = self.require_seat(actor)?;
        let state = &self.seats[seat];
        let (dealer_cards, dealer_total) = if self.dealer_revealed() {
            (
                labels(&self.dealer),
                Value::from(hand_value(&self.dealer)),
            )
        } else {
            (
                vec![self.upcard(), "hidden".to_string()],
                Value::from(self.upcard()),
            )
        };
        let mut obs = Observation::new();
        obs.insert("text".into(), Value::from(self.render(seat)));
        obs.insert("hand".into(), Value::from(labels(&state.hand)));
        obs.insert("hand_total".into(), Value::from(hand_value(&state.hand)));
        obs.insert("dealer_cards".into(), Value::from(dealer_cards));
        obs.insert("dealer_total".into(), dealer_total);
        obs.insert("outcome".into(), outcome_value(state.outcome));
        obs.insert("is_terminal".into(), Value::Bool(self.terminal));
        obs.insert("legal_moves".into(), Value::from(self.legal_actions(actor)));
        Ok(obs)
    }

    fn legal_actions(&self, actor: &str) -> Vec<String> {
        if self.terminal || actor != self.current_actor() {
            return Vec::new();
        }
        match self.seat_index(actor) {
            Some(i) if !self.seats[i].done => vec!["hit".to_string(), "stand".to_string()],
            _ => Vec::new(),
        }
    }

    fn apply(&mut self, actor: &str, command: &str) -> Result<TurnResult, GameError> {
        let seat = self.require_seat(actor)?;
        if self.terminal {
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: 0.0,
                done: true,
                info: finished_info("match_already_finished"),
            });
        }
        let penalty = self.config.rewards.invalid;
        if seat != self.current {
            *self.scores.entry(actor.to_string()).or_insert(0.0) += penalty;
            tracing::warn!(game = "blackjack", actor, "out of turn");
            let info = out_of_turn_info(self.legal_actions(self.current_actor()));
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: penalty,
                done: false,
                info,
            });
        }

        let before = self.scores.get(actor).copied().unwrap_or(0.0);
        let mut info = Info::new();
        match normalize(command).as_str() {
            "hit" => {
                let card = self.deck.draw();
                let state = &mut self.seats[seat];
                state.hand.push(card);
                info.insert("drawn_card".into(), Value::from(card_label(card)));
                if hand_value(&state.hand) > BLACKJACK {
                    state.done = true;
                    state.outcome = Some(Outcome::Bust);
                    *self.scores.entry(actor.to_string()).or_insert(0.0) += self.config.rewards.bust;
                    self.history.push(format!("{actor} hits {} and busts.", card_label(card)));
                } else {
                    info.insert("action".into(), Value::from("hit"));
                    self.history.push(format!("{actor} hits {}.", card_label(card)));
                }
            }
            "stand" => {
                self.seats[seat].done = true;
                info.insert("action".into(), Value::from("stand"));
                self.history.push(format!("{actor} stands."));
            }
            _ => {
                let state = &mut self.seats[seat];
                state.done = true;
                state.outcome = Some(Outcome::Invalid);
                *self.scores.entry(actor.to_string()).or_insert(0.0) += penalty;
                info.insert("invalid".into(), Value::Bool(true));
                info.insert("reason".into(), Value::from("illegal_command"));
                self.history.push(format!("{actor} forfeits with {command:?}."));
                tracing::warn!(game = "blackjack", actor, command, "illegal command");
            }
        }

        self.resolve_if_finished();
        let reward = self.scores.get(actor).copied().unwrap_or(0.0) - before;
        info.insert("outcome".into(), outcome_value(self.seats[seat].outcome));
        info.insert("scores".into(), self.scores_value());
        Ok(TurnResult {
            observation: self.observation(actor)?,
            reward,
            done: self.terminal,
            info,
        })
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn final_scores(&self) -> Scores {
        self.scores.clone()
    }

    fn status(&self) -> Status {
        let outcomes = self
            .config
            .players
            .iter()
            .zip(&self.seats)
            .map(|(p, s)| (p.clone(), outcome_value(s.outcome)))
            .collect();
        let mut status = Status::new();
        status.insert("dealer_hand".into(), Value::from(labels(&self.dealer)));
        status.insert("dealer_total".into(), Value::from(hand_value(&self.dealer)));
        status.insert("player_outcomes".into(), Value::Object(outcomes));
        status.insert("history".into(), Value::from(self.history.clone()));
        status.insert("terminal".into(), Value::Bool(self.terminal));
        status
    }
}
