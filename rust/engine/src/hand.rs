use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Totally ordered hand key: category first, then the tiebreak values
/// compared lexicographically.
///
/// Tiebreak layout per category:
///
/// | category | tiebreak |
/// |---|---|
/// | straight flush, straight | straight high card (wheel = 5) |
/// | four of a kind | quad value, kicker |
/// | full house | trip value, pair value |
/// | flush, high card | all five ranks, descending |
/// | three of a kind | trip value, kickers descending |
/// | two pair | high pair, low pair, kicker |
/// | one pair | pair value, kickers descending |
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreak: Vec<u8>,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.tiebreak.iter().map(|v| v.to_string()).collect();
        write!(f, "{} ({})", self.category.name(), values.join(", "))
    }
}

/// Ranks exactly five cards.
pub fn rank_five(cards: &[Card; 5]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    for c in cards.iter() {
        rank_counts[c.rank.value() as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // (count, value) sorted by count then value, both descending
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let straight_high = if groups.len() == 5 {
        detect_straight_high(&groups)
    } else {
        None
    };

    if let Some(high) = straight_high {
        let category = if is_flush {
            Category::StraightFlush
        } else {
            Category::Straight
        };
        return HandRank {
            category,
            tiebreak: vec![high],
        };
    }

    let ordered: Vec<u8> = groups.iter().map(|&(_, v)| v).collect();
    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => Category::FourOfAKind,
        (3, Some(2)) => Category::FullHouse,
        _ if is_flush => Category::Flush,
        (3, _) => Category::ThreeOfAKind,
        (2, Some(2)) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    };
    HandRank {
        category,
        tiebreak: ordered,
    }
}

/// Best five-card rank from 5, 6 or 7 cards.
///
/// Every five-card subset is ranked and the maximum kept.
///
/// ```
/// use gamemaster_engine::cards::parse_cards;
/// use gamemaster_engine::hand::{best_hand, Category};
///
/// let cards = parse_cards("A♠ 2♠ 3♠ 4♠ 5♠ K♥ K♦").unwrap();
/// let rank = best_hand(&cards).unwrap();
/// assert_eq!(rank.category, Category::StraightFlush);
/// assert_eq!(rank.tiebreak, vec![5]);
/// ```
pub fn best_hand(cards: &[Card]) -> Result<HandRank, GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::CardCount(n));
    }
    let mut best: Option<HandRank> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut hand = [cards[0]; 5];
        let mut slot = 0;
        for (i, &card) in cards.iter().enumerate() {
            if mask & (1 << i) != 0 {
                hand[slot] = card;
                slot += 1;
            }
        }
        let rank = rank_five(&hand);
        if best.as_ref().is_none_or(|b| rank > *b) {
            best = Some(rank);
        }
    }
    best.ok_or(GameError::CardCount(n))
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.cmp(b)
}

/// `groups` holds five distinct ranks, highest first.
fn detect_straight_high(groups: &[(u8, u8)]) -> Option<u8> {
    let high = groups[0].1;
    let low = groups[4].1;
    if high - low == 4 {
        return Some(high);
    }
    let wheel = [
        Rank::Ace.value(),
        Rank::Five.value(),
        Rank::Four.value(),
        Rank::Three.value(),
        Rank::Two.value(),
    ];
    if groups.iter().map(|&(_, v)| v).eq(wheel) {
        return Some(Rank::Five.value());
    }
    None
}
