//! # Play Command
//!
//! Runs one match between built-in agents under a
//! [`GameMaster`](gamemaster_engine::GameMaster) and prints the turn-by-turn
//! transcript followed by the final scores and the winner.
//!
//! ```text
//! Game: poker (seed 42)
//! Seats: player_button=baseline, player_big_blind=passive
//!   [  0] player_big_blind: check (+0.00)
//!   ...
//! Completed: yes after 7 turns
//! Scores: player_big_blind=-1.00, player_button=+1.00
//! Winner: player_button
//! ```

use std::io::Write;

use gamemaster_engine::TurnBasedGame;
use gamemaster_engine::master::{GameMaster, MatchConfig, MatchResult, TurnRecord};
use serde_json::Value;

use super::{build_agents, build_game, load_config, resolve_seed};
use crate::cli::GameKind;
use crate::error::CliError;
use crate::formatters::{format_reward, format_scores};

pub fn handle_play_command(
    game: GameKind,
    agents: &[String],
    players: Option<u16>,
    seed: Option<u64>,
    max_turns: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let seed = resolve_seed(seed, &cfg);
    let max_turns = max_turns.map_or(cfg.max_turns, |t| t as usize);

    let table = build_game(game, players, seed, &cfg)?;
    let seats = table.players().to_vec();
    let lineup = build_agents(&seats, agents, game.default_agent(), seed)?;

    writeln!(out, "Game: {} (seed {})", game.as_str(), seed)?;
    let names: Vec<String> = seats
        .iter()
        .map(|s| format!("{}={}", s, lineup.get(s).map_or("-", |a| a.name())))
        .collect();
    writeln!(out, "Seats: {}", names.join(", "))?;

    let mut master = GameMaster::new(table, lineup, MatchConfig { max_turns })?;
    let result = master.run()?;
    for turn in &result.turns {
        writeln!(out, "  {}", format_turn(turn))?;
    }
    write_summary(&result, out)
}

/// One transcript line: index, actor, command and reward, plus the reason
/// when the game rejected the command.
pub(crate) fn format_turn(turn: &TurnRecord) -> String {
    let mut line = format!(
        "[{:>3}] {}: {} ({})",
        turn.turn_index,
        turn.actor,
        turn.command,
        format_reward(turn.reward)
    );
    if turn.info.get("invalid").and_then(Value::as_bool) == Some(true) {
        let reason = turn
            .info
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or("invalid");
        line.push_str(&format!(" rejected: {}", reason));
    }
    line
}

pub(crate) fn write_summary(result: &MatchResult, out: &mut dyn Write) -> Result<(), CliError> {
    if result.completed {
        writeln!(out, "Completed: yes after {} turns", result.turns.len())?;
    } else {
        writeln!(
            out,
            "Completed: no, stopped at the turn limit after {} turns",
            result.turns.len()
        )?;
    }
    writeln!(out, "Scores: {}", format_scores(&result.scores))?;
    match &result.winner {
        Some(w) => writeln!(out, "Winner: {}", w)?,
        None if result.completed => writeln!(out, "Winner: none (tie)")?,
        None => writeln!(out, "Winner: none")?,
    }
    Ok(())
}
