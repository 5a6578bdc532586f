//! Replay command handler.
//!
//! Prints every match stored in a JSON Lines transcript written by `sim`.
//! Lines that do not parse as a match record are reported on stderr with
//! their line number and skipped.

use std::io::Write;

use gamemaster_engine::logger::parse_record;

use super::play::{format_turn, write_summary};
use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text;
use crate::ui;

pub fn handle_replay_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content =
        read_text(input).map_err(|e| CliError::InvalidInput(format!("Failed to read {}", e)))?;

    let mut replayed = 0usize;
    let mut skipped: Vec<BatchValidationError<usize>> = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = match parse_record(line) {
            Ok(r) => r,
            Err(e) => {
                skipped.push(BatchValidationError {
                    item_context: idx + 1,
                    message: e.to_string(),
                });
                continue;
            }
        };
        replayed += 1;

        let seed = record
            .seed
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        writeln!(
            out,
            "Match {} ({}, seed {}, {})",
            record.match_id,
            record.game,
            seed,
            record.ts.as_deref().unwrap_or("no timestamp")
        )?;
        for turn in &record.result.turns {
            writeln!(out, "  {}", format_turn(turn))?;
        }
        write_summary(&record.result, out)?;
    }

    for e in &skipped {
        ui::display_warning(err, &format!("skipped line {}", e))?;
    }
    if replayed == 0 && !skipped.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no readable matches in {}",
            input
        )));
    }
    writeln!(out, "Replayed {} matches", replayed)?;
    if !skipped.is_empty() {
        writeln!(out, "Skipped {} unreadable lines", skipped.len())?;
    }
    Ok(())
}
