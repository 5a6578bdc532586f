use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Seed used when a caller does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Shuffled pack drawn from the end.
///
/// The generator belongs to the deck, so two decks built from the same seed
/// deal the same cards in the same order. When the pack runs dry a fresh one
/// is shuffled in from the same generator.
#[derive(Debug)]
pub struct Deck<T> {
    template: Vec<T>,
    cards: Vec<T>,
    rng: ChaCha20Rng,
    reshuffles: u32,
}

impl<T: Clone> Deck<T> {
    /// `template` must be non-empty; the public constructors are
    /// [`Deck::poker`] and [`Deck::blackjack`].
    pub(crate) fn new_with_seed(template: Vec<T>, seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: template.clone(),
            template,
            rng,
            reshuffles: 0,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = self.template.clone();
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> T {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            self.reshuffles += 1;
            tracing::warn!(reshuffles = self.reshuffles, "deck exhausted, shuffling a fresh pack");
            self.shuffle();
        }
    }

    pub fn draw_n(&mut self, n: usize) -> Vec<T> {
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }
}

impl Deck<Card> {
    /// Standard 52-card poker deck.
    pub fn poker(seed: u64) -> Self {
        Self::new_with_seed(full_deck(), seed)
    }
}

impl Deck<u8> {
    /// Value-only blackjack deck: ranks 1 (ace) through 13 (king), four of each.
    pub fn blackjack(seed: u64) -> Self {
        let mut template = Vec::with_capacity(52);
        for _ in 0..4 {
            template.extend(1..=13u8);
        }
        Self::new_with_seed(template, seed)
    }
}
