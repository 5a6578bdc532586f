//! Card, score and reward formatters for terminal display.
//!
//! Suits print as ♥ ♦ ♣ ♠ where the terminal is known to render them and as
//! h d c s otherwise.
//!
//! ## Example
//!
//! ```rust
//! use gamemaster_engine::cards::{Card, Rank, Suit};
//! use gamemaster_cli::formatters::{format_board, format_card, format_reward};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! assert_eq!(format_reward(-0.5), "-0.50");
//! ```

use gamemaster_engine::cards::{Card, Suit};
use gamemaster_engine::game::Scores;

/// On Windows only modern terminals (Windows Terminal, VS Code, anything
/// setting `TERM_PROGRAM`) get suit symbols. Unix-like systems always do.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// `A♠` or `As`.
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// `[A♠ K♥ Q♦]`, or `[]` for no cards.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Signed with two decimals: `+1.00`, `-0.50`, `+0.00`.
pub fn format_reward(reward: f64) -> String {
    format!("{:+.2}", reward)
}

/// `actor=+1.00, other=-1.00` in actor order.
pub fn format_scores(scores: &Scores) -> String {
    scores
        .iter()
        .map(|(actor, score)| format!("{}={}", actor, format_reward(*score)))
        .collect::<Vec<_>>()
        .join(", ")
}
