//! Deterministic rule-based agents.
//!
//! None of these agents keep state between decisions, so a match played with
//! them is fully determined by the game seed.

use gamemaster_engine::cards::{Card, parse_cards};
use gamemaster_engine::game::Observation;
use gamemaster_engine::hand::{Category, best_hand};
use serde_json::Value;

use crate::{Agent, legal_moves, pick};

/// Always plays the first legal move. Works for every game.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegal;

impl Agent for FirstLegal {
    fn decide(&mut self, observation: &Observation) -> Option<String> {
        legal_moves(observation).first().map(|m| m.to_string())
    }

    fn name(&self) -> &str {
        "FirstLegal"
    }
}

/// Blackjack: hit below `stand_on`, stand otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdBlackjack {
    pub stand_on: u64,
}

impl Default for ThresholdBlackjack {
    fn default() -> Self {
        Self { stand_on: 17 }
    }
}

impl Agent for ThresholdBlackjack {
    fn decide(&mut self, observation: &Observation) -> Option<String> {
        let legal = legal_moves(observation);
        let choice = match observation.get("hand_total").and_then(Value::as_u64) {
            Some(total) if total < self.stand_on => pick(&legal, &["hit", "stand"]),
            Some(_) => pick(&legal, &["stand", "hit"]),
            None => None,
        };
        choice.or_else(|| legal.first().copied()).map(str::to_string)
    }

    fn name(&self) -> &str {
        "ThresholdBlackjack"
    }
}

/// Poker: never raises the stakes. Calls any bet and checks otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassivePoker;

impl Agent for PassivePoker {
    fn decide(&mut self, observation: &Observation) -> Option<String> {
        let legal = legal_moves(observation);
        pick(&legal, &["call", "check", "bet", "fold"])
            .or_else(|| legal.first().copied())
            .map(str::to_string)
    }

    fn name(&self) -> &str {
        "PassivePoker"
    }
}

/// Poker: scores its holding from 0 to 10 and bets, calls or folds on it.
///
/// Before the flop the score comes from the two hole cards alone (pairs,
/// high cards, suitedness, connectedness). From the flop on it comes from
/// the best five-card hand on the visible board, with a point added for a
/// queen-or-better top card.
///
/// | score | unopposed | facing a bet |
/// |---|---|---|
/// | 7-10 | bet | call |
/// | 3-6 | check | call when the pot offers at least 60% |
/// | 0-2 | check | fold |
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselinePoker;

impl BaselinePoker {
    pub fn new() -> Self {
        Self
    }

    /// Preflop score for two hole cards.
    pub fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (a, b) = (hole[0].rank.value(), hole[1].rank.value());
        let (high, low) = (a.max(b), a.min(b));
        let suited = hole[0].suit == hole[1].suit;

        if high == low {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }
        let offsuit = match (high, low) {
            (14, 13) => 8,
            (14, 12) => 7,
            (14, 11) | (13, 12) => 6,
            (14, 10) | (13, 11) | (12, 11) => 5,
            (14, _) | (13, 10) | (12, 10) => 4,
            _ if high >= 11 && low >= 9 => 4,
            _ if high - low <= 2 => 3,
            _ => 2,
        };
        let suited_bonus = match (suited, high, low) {
            (false, _, _) => 0,
            (true, 14, 13) => 2,
            (true, _, _) if offsuit >= 4 => 1,
            (true, _, _) if high - low <= 2 => 1 + u8::from(high >= 9),
            _ => 0,
        };
        (offsuit + suited_bonus).min(10)
    }

    /// Postflop score; `None` before three board cards are out.
    pub fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let cards: Vec<Card> = hole.iter().chain(board).copied().collect();
        let rank = best_hand(&cards).ok()?;
        let base = match rank.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let top = rank.tiebreak.first().copied().unwrap_or(0);
        Some((base + u8::from(top >= 12)).min(10))
    }

    /// Share of the final pot already in the middle when calling `to_call`.
    /// Free calls are always worth it.
    fn pot_odds(pot: f64, to_call: f64) -> f64 {
        if to_call <= 0.0 {
            return 1.0;
        }
        pot / (pot + to_call)
    }

    fn cards_at(observation: &Observation, key: &str) -> Vec<Card> {
        let labels: Vec<&str> = observation
            .get(key)
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        parse_cards(&labels.join(" ")).unwrap_or_default()
    }
}

impl Agent for BaselinePoker {
    fn decide(&mut self, observation: &Observation) -> Option<String> {
        let legal = legal_moves(observation);
        if legal.is_empty() {
            return None;
        }
        let hole = Self::cards_at(observation, "hand");
        let board = Self::cards_at(observation, "board");
        let strength = match hole.as_slice() {
            [a, b] => Self::postflop_strength([*a, *b], &board)
                .unwrap_or_else(|| Self::preflop_strength([*a, *b])),
            _ => 0,
        };
        let pot = observation.get("pot").and_then(Value::as_f64).unwrap_or(0.0);
        let to_call = observation
            .get("to_call")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let facing_bet = legal.contains(&"call");

        let preferred: &[&str] = match (facing_bet, strength) {
            (false, 7..=10) => &["bet", "check"],
            (false, _) => &["check", "fold"],
            (true, 7..=10) => &["call"],
            (true, 3..=6) if Self::pot_odds(pot, to_call) >= 0.6 => &["call"],
            (true, _) => &["fold"],
        };
        tracing::trace!(strength, pot, to_call, facing_bet, "baseline poker decision");
        pick(&legal, preferred)
            .or_else(|| legal.first().copied())
            .map(str::to_string)
    }

    fn name(&self) -> &str {
        "BaselinePoker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(labels: &str) -> [Card; 2] {
        let cards = parse_cards(labels).unwrap();
        [cards[0], cards[1]]
    }

    #[test]
    fn preflop_strength_orders_common_holdings() {
        assert_eq!(BaselinePoker::preflop_strength(hole("A♠ A♦")), 10);
        assert_eq!(BaselinePoker::preflop_strength(hole("A♠ K♠")), 10);
        assert_eq!(BaselinePoker::preflop_strength(hole("A♠ K♦")), 8);
        assert_eq!(BaselinePoker::preflop_strength(hole("7♣ 7♦")), 5);
        assert_eq!(BaselinePoker::preflop_strength(hole("7♠ 2♦")), 2);
    }

    fn facing_bet(pot: f64, to_call: f64) -> Observation {
        serde_json::json!({
            "hand": ["7♣", "7♦"],
            "board": [],
            "pot": pot,
            "to_call": to_call,
            "legal_moves": ["call", "fold"],
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn medium_hand_calls_only_at_a_good_price() {
        let mut agent = BaselinePoker::new();
        assert_eq!(agent.decide(&facing_bet(3.0, 1.0)).as_deref(), Some("call"));
        assert_eq!(agent.decide(&facing_bet(1.0, 1.0)).as_deref(), Some("fold"));
    }

    #[test]
    fn price_not_unit_size_drives_the_call() {
        let mut agent = BaselinePoker::new();
        for unit in [0.25, 1.0, 100.0] {
            assert_eq!(
                agent.decide(&facing_bet(3.0 * unit, unit)).as_deref(),
                Some("call"),
                "unit {unit}"
            );
            assert_eq!(
                agent.decide(&facing_bet(unit, unit)).as_deref(),
                Some("fold"),
                "unit {unit}"
            );
        }
        assert_eq!(BaselinePoker::pot_odds(2.0, 0.0), 1.0);
    }

    #[test]
    fn postflop_needs_a_flop() {
        let board = parse_cards("A♣ 9♦").unwrap();
        assert_eq!(BaselinePoker::postflop_strength(hole("A♠ A♦"), &board), None);
        let board = parse_cards("A♣ 9♦ 9♠").unwrap();
        assert_eq!(BaselinePoker::postflop_strength(hole("A♠ A♦"), &board), Some(10));
    }
}
