//! Heads-up limit hold'em with one betting round per street.
//!
//! Each street allows a single bet of a fixed size. `check`/`check` or
//! `bet`/`call` moves play to the next street; `fold` ends the hand at once.
//! The five board cards are drawn when the hand starts and revealed 3, 1, 1.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::{format_cards, Card};
use crate::deck::{Deck, DEFAULT_SEED};
use crate::errors::GameError;
use crate::game::{
    check_players, finished_info, normalize, out_of_turn_info, zero_scores, Info, Observation,
    Scores, Status, TurnBasedGame, TurnResult,
};
use crate::hand::{best_hand, Category, HandRank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
            Stage::Finished => "finished",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Preflop => "Pre-flop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
            Stage::Finished => "Hand Complete",
        }
    }

    /// Board cards revealed on reaching this stage.
    fn board_len(self) -> usize {
        match self {
            Stage::Preflop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            _ => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokerRewards {
    pub bet_amount: f64,
    pub win: f64,
    pub loss: f64,
    pub split: f64,
    pub invalid: f64,
    pub fold: f64,
}

impl Default for PokerRewards {
    fn default() -> Self {
        Self {
            bet_amount: 1.0,
            win: 1.0,
            loss: -1.0,
            split: 0.0,
            invalid: -0.5,
            fold: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokerConfig {
    /// `[button, big_blind]`. The big blind acts first before the flop, the
    /// button first after it.
    pub players: Vec<String>,
    pub seed: Option<u64>,
    pub rewards: PokerRewards,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self {
            players: vec!["player_button".into(), "player_big_blind".into()],
            seed: None,
            rewards: PokerRewards::default(),
        }
    }
}

/// What a seat with full knowledge of the deal sees: its own cards plus the
/// whole planned board, revealed or not.
#[derive(Debug, Clone, Copy)]
pub struct HouseView<'a> {
    pub stage: Stage,
    pub hand: &'a [Card],
    pub board: &'a [Card],
    pub board_plan: &'a [Card],
}

/// Decides whether a house seat calls a bet.
pub trait CallPolicy {
    fn calls(&self, view: &HouseView<'_>) -> bool;
}

impl<F: Fn(&HouseView<'_>) -> bool> CallPolicy for F {
    fn calls(&self, view: &HouseView<'_>) -> bool {
        self(view)
    }
}

/// Calls when the best hand on the final board reaches a per-street
/// category, or when it is a bare high card at or above `high_card_floor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdCallPolicy {
    pub preflop: Category,
    pub flop: Category,
    pub turn: Category,
    pub river: Category,
    pub high_card_floor: u8,
}

impl Default for ThresholdCallPolicy {
    fn default() -> Self {
        Self {
            preflop: Category::OnePair,
            flop: Category::OnePair,
            turn: Category::TwoPair,
            river: Category::TwoPair,
            high_card_floor: 14,
        }
    }
}

impl ThresholdCallPolicy {
    fn threshold(&self, stage: Stage) -> Category {
        match stage {
            Stage::Preflop => self.preflop,
            Stage::Flop => self.flop,
            Stage::Turn => self.turn,
            _ => self.river,
        }
    }
}

impl CallPolicy for ThresholdCallPolicy {
    fn calls(&self, view: &HouseView<'_>) -> bool {
        let cards: Vec<Card> = view.hand.iter().chain(view.board_plan).copied().collect();
        let Ok(rank) = best_hand(&cards) else {
            return false;
        };
        if rank.category >= self.threshold(view.stage) {
            return true;
        }
        rank.category == Category::HighCard
            && rank.tiebreak.first().is_some_and(|&high| high >= self.high_card_floor)
    }
}

#[derive(Debug)]
pub struct HeadsUpPoker {
    config: PokerConfig,
    deck: Deck<Card>,
    hands: [Vec<Card>; 2],
    board_plan: Vec<Card>,
    revealed: usize,
    stage: Stage,
    current: usize,
    checks: u8,
    awaiting_call: bool,
    pot: f64,
    winner: Option<usize>,
    terminal: bool,
    scores: Scores,
    history: Vec<String>,
}

const BUTTON: usize = 0;
const BIG_BLIND: usize = 1;

impl HeadsUpPoker {
    pub fn new(config: PokerConfig) -> Result<Self, GameError> {
        check_players(
            "heads-up poker",
            &config.players,
            "exactly 2",
            config.players.len() == 2,
        )?;
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let mut game = Self {
            deck: Deck::poker(seed),
            hands: [Vec::new(), Vec::new()],
            board_plan: Vec::new(),
            revealed: 0,
            stage: Stage::Preflop,
            current: BIG_BLIND,
            checks: 0,
            awaiting_call: false,
            pot: 0.0,
            winner: None,
            terminal: false,
            scores: zero_scores(&config.players),
            history: Vec::new(),
            config,
        };
        game.reset();
        Ok(game)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pot(&self) -> f64 {
        self.pot
    }

    pub fn board(&self) -> &[Card] {
        &self.board_plan[..self.revealed.min(self.board_plan.len())]
    }

    pub fn hand(&self, actor: &str) -> Option<&[Card]> {
        self.seat(actor).map(|s| self.hands[s].as_slice())
    }

    pub fn awaiting_call(&self) -> bool {
        self.awaiting_call
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Full-knowledge view for a house seat. `None` for unknown actors.
    pub fn house_view(&self, actor: &str) -> Option<HouseView<'_>> {
        let seat = self.seat(actor)?;
        Some(HouseView {
            stage: self.stage,
            hand: &self.hands[seat],
            board: self.board(),
            board_plan: &self.board_plan,
        })
    }

    fn seat(&self, actor: &str) -> Option<usize> {
        self.config.players.iter().position(|p| p == actor)
    }

    fn require_seat(&self, actor: &str) -> Result<usize, GameError> {
        self.seat(actor)
            .ok_or_else(|| GameError::UnknownActor(actor.to_string()))
    }

    fn add_score(&mut self, seat: usize, delta: f64) {
        let name = self.config.players[seat].clone();
        *self.scores.entry(name).or_insert(0.0) += delta;
    }

    fn legal_for_seat(&self, seat: usize) -> Vec<String> {
        if self.terminal || seat != self.current {
            return Vec::new();
        }
        let moves: &[&str] = if self.awaiting_call {
            &["call", "fold"]
        } else {
            &["check", "bet", "fold"]
        };
        moves.iter().map(|m| m.to_string()).collect()
    }

    fn advance_stage(&mut self) {
        self.checks = 0;
        self.awaiting_call = false;
        let (next, note) = match self.stage {
            Stage::Preflop => (Stage::Flop, "Flop revealed."),
            Stage::Flop => (Stage::Turn, "Turn card revealed."),
            Stage::Turn => (Stage::River, "River card revealed."),
            Stage::River | Stage::Showdown => {
                self.stage = Stage::Showdown;
                self.resolve_showdown();
                return;
            }
            Stage::Finished => return,
        };
        self.stage = next;
        self.revealed = next.board_len();
        self.history.push(note.to_string());
        self.current = BUTTON;
        tracing::debug!(game = "poker", stage = %self.stage, "street advanced");
    }

    fn resolve_showdown(&mut self) {
        let ranks: Vec<Option<HandRank>> = self
            .hands
            .iter()
            .map(|h| {
                let cards: Vec<Card> = h.iter().chain(&self.board_plan).copied().collect();
                best_hand(&cards).ok()
            })
            .collect();
        let rewards = self.config.rewards;
        match ranks[0].cmp(&ranks[1]) {
            Ordering::Equal => {
                self.add_score(0, rewards.split);
                self.add_score(1, rewards.split);
                self.winner = None;
                self.history.push("Showdown: split pot.".to_string());
            }
            ord => {
                let winner = if ord == Ordering::Greater { 0 } else { 1 };
                self.add_score(winner, rewards.win);
                self.add_score(1 - winner, rewards.loss);
                self.winner = Some(winner);
                let name = self.config.players[winner].clone();
                self.history.push(format!("Showdown: {name} wins the hand."));
            }
        }
        self.stage = Stage::Finished;
        self.terminal = true;
    }

    fn render(&self, seat: usize, legal: &[String]) -> String {
        let opponent = if self.terminal {
            format_cards(&self.hands[1 - seat])
        } else {
            "hidden".to_string()
        };
        let legal = if legal.is_empty() {
            "none".to_string()
        } else {
            legal.join(", ")
        };
        [
            "Heads-Up Poker Match".to_string(),
            format!("Stage: {}", self.stage.label()),
            format!("Pot: {}", self.pot),
            format!("Board: {}", format_cards(self.board())),
            format!("Your hand: {}", format_cards(&self.hands[seat])),
            format!("Opponent hand: {opponent}"),
            format!("Legal moves: {legal}"),
        ]
        .join("\n")
    }

    fn winner_value(&self) -> Value {
        self.winner
            .map(|w| Value::from(self.config.players[w].clone()))
            .unwrap_or(Value::Null)
    }
}

fn card_labels(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::to_string).collect()
}

impl TurnBasedGame for HeadsUpPoker {
    fn name(&self) -> &'static str {
        "poker"
    }

    fn players(&self) -> &[String] {
        &self.config.players
    }

    /// Reseeds, shuffles, then draws the board plan before the hole cards.
    fn reset(&mut self) {
        self.deck = Deck::poker(self.config.seed.unwrap_or(DEFAULT_SEED));
        self.deck.shuffle();
        self.board_plan = self.deck.draw_n(5);
        self.hands = [self.deck.draw_n(2), self.deck.draw_n(2)];
        self.revealed = 0;
        self.stage = Stage::Preflop;
        self.current = BIG_BLIND;
        self.checks = 0;
        self.awaiting_call = false;
        self.pot = 2.0 * self.config.rewards.bet_amount;
        self.winner = None;
        self.terminal = false;
        self.scores = zero_scores(&self.config.players);
        self.history = vec!["Blinds posted. Hand begins.".to_string()];
    }

    fn current_actor(&self) -> &str {
        &self.config.players[self.current]
    }

    fn observation(&self, actor: &str) -> Result<Observation, GameError> {
        let seat = self.require_seat(actor)?;
        let legal = self.legal_for_seat(seat);
        let mut obs = Observation::new();
        obs.insert("text".into(), Value::from(self.render(seat, &legal)));
        obs.insert("stage".into(), Value::from(self.stage.as_str()));
        obs.insert("pot".into(), Value::from(self.pot));
        obs.insert("board".into(), Value::from(card_labels(self.board())));
        obs.insert("hand".into(), Value::from(card_labels(&self.hands[seat])));
        if self.terminal {
            obs.insert(
                "opponent_hand".into(),
                Value::from(card_labels(&self.hands[1 - seat])),
            );
        }
        obs.insert("legal_moves".into(), Value::from(legal));
        obs.insert("awaiting_call".into(), Value::Bool(self.awaiting_call));
        let to_call = if self.awaiting_call && seat == self.current && !self.terminal {
            self.config.rewards.bet_amount
        } else {
            0.0
        };
        obs.insert("to_call".into(), Value::from(to_call));
        obs.insert("history".into(), Value::from(self.history.clone()));
        obs.insert("is_terminal".into(), Value::Bool(self.terminal));
        Ok(obs)
    }

    fn legal_actions(&self, actor: &str) -> Vec<String> {
        match self.seat(actor) {
            Some(seat) => self.legal_for_seat(seat),
            None => Vec::new(),
        }
    }

    fn apply(&mut self, actor: &str, command: &str) -> Result<TurnResult, GameError> {
        let seat = self.require_seat(actor)?;
        if self.terminal {
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: 0.0,
                done: true,
                info: finished_info("hand_already_finished"),
            });
        }
        let penalty = self.config.rewards.invalid;
        if seat != self.current {
            self.add_score(seat, penalty);
            tracing::warn!(game = "poker", actor, "out of turn");
            let info = out_of_turn_info(self.legal_for_seat(self.current));
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: penalty,
                done: false,
                info,
            });
        }

        let before = self.scores.get(actor).copied().unwrap_or(0.0);
        let mut info = Info::new();
        info.insert("stage".into(), Value::from(self.stage.as_str()));
        info.insert("pot".into(), Value::from(self.pot));

        let legal = self.legal_for_seat(seat);
        let action = normalize(command);
        if !legal.contains(&action) {
            self.add_score(seat, penalty);
            self.history
                .push(format!("{actor} submitted an invalid action: {command}."));
            tracing::warn!(game = "poker", actor, command, "illegal command");
            let mut sorted = legal;
            sorted.sort();
            info.insert("invalid".into(), Value::Bool(true));
            info.insert("reason".into(), Value::from("illegal_command"));
            info.insert("legal_moves".into(), Value::from(sorted));
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: penalty,
                done: false,
                info,
            });
        }

        let opponent = 1 - seat;
        let bet = self.config.rewards.bet_amount;
        match action.as_str() {
            "fold" => {
                self.add_score(seat, self.config.rewards.fold);
                self.add_score(opponent, self.config.rewards.win);
                self.winner = Some(opponent);
                self.terminal = true;
                self.stage = Stage::Finished;
                self.awaiting_call = false;
                let name = self.config.players[opponent].clone();
                self.history.push(format!("{actor} folds. {name} wins the pot."));
            }
            "bet" => {
                self.pot += bet;
                self.awaiting_call = true;
                self.current = opponent;
                self.history.push(format!("{actor} bets one unit."));
            }
            "call" => {
                self.pot += bet;
                self.history.push(format!("{actor} calls."));
                self.advance_stage();
            }
            _ => {
                self.checks += 1;
                self.history.push(format!("{actor} checks."));
                if self.checks >= 2 {
                    self.advance_stage();
                } else {
                    self.current = opponent;
                }
            }
        }

        let reward = self.scores.get(actor).copied().unwrap_or(0.0) - before;
        info.insert("action".into(), Value::from(action));
        info.insert("winner".into(), self.winner_value());
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
        let mut status = Status::new();
        status.insert("stage".into(), Value::from(self.stage.as_str()));
        status.insert("board".into(), Value::from(card_labels(self.board())));
        status.insert("pot".into(), Value::from(self.pot));
        status.insert("winner".into(), self.winner_value());
        status.insert("history".into(), Value::from(self.history.clone()));
        status.insert("terminal".into(), Value::Bool(self.terminal));
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn threshold_policy_calls_on_pair_or_ace_high() {
        let policy = ThresholdCallPolicy::default();
        let plan = parse_cards("2♣ 7♦ 9♥ J♠ 4♣").unwrap();

        let pair = parse_cards("9♠ 3♦").unwrap();
        let view = HouseView { stage: Stage::Flop, hand: &pair, board: &plan[..3], board_plan: &plan };
        assert!(policy.calls(&view));
        // a single pair is below the river threshold
        let view = HouseView { stage: Stage::River, ..view };
        assert!(!policy.calls(&view));

        let ace_high = parse_cards("A♠ 3♦").unwrap();
        let view = HouseView { stage: Stage::River, hand: &ace_high, board: &plan, board_plan: &plan };
        assert!(policy.calls(&view));

        let king_high = parse_cards("K♠ 3♦").unwrap();
        let view = HouseView { stage: Stage::Preflop, hand: &king_high, board: &[], board_plan: &plan };
        assert!(!policy.calls(&view));
    }

    #[test]
    fn plain_functions_are_policies() {
        fn always(_: &HouseView<'_>) -> bool {
            true
        }
        let view = HouseView { stage: Stage::Preflop, hand: &[], board: &[], board_plan: &[] };
        assert!(always.calls(&view));
    }
}
