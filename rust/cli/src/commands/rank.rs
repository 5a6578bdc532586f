//! Rank command handler: best five-card hand among 5 to 7 cards.

use std::io::Write;

use gamemaster_engine::cards::parse_cards;
use gamemaster_engine::hand::best_hand;

use crate::error::CliError;
use crate::formatters::format_board;

/// Prints the cards, the hand category and its tiebreak values.
///
/// ```text
/// Cards: [A♠ K♠ Q♠ J♠ T♠]
/// Category: Straight Flush
/// Tiebreak: [14]
/// ```
pub fn handle_rank_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let parsed = parse_cards(cards).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let rank = best_hand(&parsed).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    writeln!(out, "Cards: {}", format_board(&parsed))?;
    writeln!(out, "Category: {}", rank.category.name())?;
    writeln!(out, "Tiebreak: {:?}", rank.tiebreak)?;
    Ok(())
}
