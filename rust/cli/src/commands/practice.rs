//! # Practice Command
//!
//! Interactive single-seat play. The user holds one seat and types commands
//! on stdin; the house plays every other seat. `quit` (or EOF) ends the
//! session early.
//!
//! - blackjack: a one-seat table against the dealer
//! - poker: the user is on the button, the house holds the big blind

use std::io::{BufRead, Write};

use gamemaster_engine::TurnBasedGame;
use gamemaster_engine::blackjack::BlackjackConfig;
use gamemaster_engine::game::Observation;
use gamemaster_engine::poker::PokerConfig;
use gamemaster_engine::practice::PracticeSession;
use serde_json::Value;

use super::{load_config, resolve_seed};
use crate::cli::PracticeGame;
use crate::error::CliError;
use crate::formatters::{format_reward, format_scores};
use crate::io_utils::read_stdin_line;

pub const PRACTICE_SEAT: &str = "player";

pub fn handle_practice_command(
    game: PracticeGame,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let seed = resolve_seed(seed, &cfg);
    writeln!(out, "Practice {} (seed {}). Type quit to leave.", game_name(game), seed)?;

    match game {
        PracticeGame::Blackjack => {
            let session = PracticeSession::blackjack(BlackjackConfig {
                players: vec![PRACTICE_SEAT.to_string()],
                seed: Some(seed),
                rewards: cfg.blackjack,
            })?;
            run_session(session, out, stdin)
        }
        PracticeGame::Poker => {
            let session = PracticeSession::poker_default(PokerConfig {
                seed: Some(seed),
                rewards: cfg.poker,
                ..PokerConfig::default()
            })?;
            run_session(session, out, stdin)
        }
    }
}

fn game_name(game: PracticeGame) -> &'static str {
    match game {
        PracticeGame::Blackjack => "blackjack",
        PracticeGame::Poker => "poker",
    }
}

fn run_session<G: TurnBasedGame>(
    mut session: PracticeSession<G>,
    out: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let observation = session.reset()?;
    write_observation(&observation, out)?;
    let mut total = 0.0;

    while !session.game().is_terminal() {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_ascii_lowercase().as_str(), "quit" | "q") {
            writeln!(out, "Session ended.")?;
            return Ok(());
        }

        let result = session.step(&line)?;
        total += result.reward;
        if result.info.get("invalid").and_then(Value::as_bool) == Some(true) {
            let reason = result
                .info
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("invalid");
            writeln!(out, "Rejected: {}", reason)?;
        }
        writeln!(out, "Reward: {}", format_reward(result.reward))?;
        write_observation(&result.observation, out)?;
    }

    if session.game().is_terminal() {
        writeln!(out, "Match over. Your total: {}", format_reward(total))?;
        writeln!(out, "Scores: {}", format_scores(&session.game().final_scores()))?;
    }
    Ok(())
}

fn write_observation(observation: &Observation, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(text) = observation.get("text").and_then(Value::as_str) {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}
